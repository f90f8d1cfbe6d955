//! Owns the live widget order and wires drag gestures to persistence.

use super::descriptor::WidgetDescriptor;
use super::drag::{DragController, DragState};
use super::store::LayoutStore;

/// Current widget order plus the gesture that may be reordering it.
#[derive(Debug, Clone)]
pub struct LayoutManager {
    widgets: Vec<WidgetDescriptor>,
    drag: DragController,
    store: LayoutStore,
}

impl LayoutManager {
    /// Loads the order from `store` (falling back to defaults).
    pub fn load(store: LayoutStore) -> Self {
        let widgets = store.load();
        tracing::debug!("Loaded {} widgets from {}", widgets.len(), store.path().display());
        Self::with_widgets(widgets, store)
    }

    /// Starts from an explicit order.
    pub fn with_widgets(widgets: Vec<WidgetDescriptor>, store: LayoutStore) -> Self {
        Self {
            widgets,
            drag: DragController::new(),
            store,
        }
    }

    /// Widgets in display order, including disabled ones.
    pub fn widgets(&self) -> &[WidgetDescriptor] {
        &self.widgets
    }

    /// Ids in display order.
    pub fn ids(&self) -> Vec<&str> {
        self.widgets.iter().map(|w| w.id.as_str()).collect()
    }

    /// Enabled widgets paired with their index in the full order.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &WidgetDescriptor)> {
        self.widgets.iter().enumerate().filter(|(_, w)| w.enabled)
    }

    /// Number of widgets in the order.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether the order is empty.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Backing store.
    pub fn store(&self) -> &LayoutStore {
        &self.store
    }

    /// Current gesture phase.
    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Index of the carried widget, if a drag is active.
    pub fn dragging_index(&self) -> Option<usize> {
        self.drag.source_index()
    }

    /// Picks up the widget at `index`.
    pub fn begin_drag(&mut self, index: usize) -> bool {
        let started = self.drag.begin(index, self.widgets.len());
        if started {
            tracing::debug!("Drag started on {}", self.widgets[index].id);
        }
        started
    }

    /// Moves the carried widget to `index`.
    pub fn drag_over(&mut self, index: usize) -> bool {
        self.drag.cross(&mut self.widgets, index)
    }

    /// Drops the carried widget and saves the order.
    pub fn end_drag(&mut self) -> bool {
        let widgets = &self.widgets;
        let store = &self.store;
        self.drag.end(|| store.save(widgets))
    }
}
