//! View rendering modules for the TUI.
//!
//! - `grid`: the card grid the dashboard is made of
//! - `notice`: modal overlay for one-shot messages

pub mod grid;
pub mod notice;
