//! Widget order: defaults, persistence and drag-to-reorder.
//!
//! The order is loaded once at startup, reordered live while a card is
//! dragged, and written back when the card is dropped.

mod descriptor;
mod drag;
mod manager;
mod store;

pub use descriptor::{default_order, title_for, WidgetDescriptor, DEFAULT_WIDGETS};
pub use drag::{move_item, DragController, DragState};
pub use manager::LayoutManager;
pub use store::{LayoutStore, StoreError};
