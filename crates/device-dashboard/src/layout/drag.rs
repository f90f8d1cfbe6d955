//! Drag-to-reorder gesture.
//!
//! Input is reduced to three events, whatever the device:
//!
//! - `begin(i)` picks up the item at `i`
//! - `cross(j)` moves the carried item to `j` immediately (live preview)
//! - `end()` drops it and commits the current order
//!
//! There is no cancel: aborting a drag is routed to `end`, so whatever the
//! order looks like at that moment is kept and committed.

/// Phase of the current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// An item is being carried; `source_index` is its current position.
    Dragging {
        /// Current index of the carried item.
        source_index: usize,
    },
    /// The drop is being persisted.
    Committing,
}

/// Tracks one drag gesture at a time.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    /// Creates an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Whether an item is being carried.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Position of the carried item, if any.
    pub fn source_index(&self) -> Option<usize> {
        match self.state {
            DragState::Dragging { source_index } => Some(source_index),
            _ => None,
        }
    }

    /// Picks up the item at `index` of a list of `len` items.
    ///
    /// Ignored (returns `false`) when out of range or already dragging.
    pub fn begin(&mut self, index: usize, len: usize) -> bool {
        if self.state != DragState::Idle || index >= len {
            return false;
        }
        self.state = DragState::Dragging {
            source_index: index,
        };
        true
    }

    /// Moves the carried item to `target`.
    ///
    /// Returns `true` when `items` changed. Crossing the item's own slot,
    /// crossing out of range, and crossing outside a drag are no-ops.
    pub fn cross<T>(&mut self, items: &mut Vec<T>, target: usize) -> bool {
        let DragState::Dragging { source_index } = self.state else {
            return false;
        };
        if source_index == target || target >= items.len() || source_index >= items.len() {
            return false;
        }
        move_item(items, source_index, target);
        self.state = DragState::Dragging {
            source_index: target,
        };
        true
    }

    /// Drops the carried item and runs `commit` once.
    ///
    /// Returns `false` without calling `commit` when no drag is active.
    pub fn end<F: FnOnce()>(&mut self, commit: F) -> bool {
        if !self.is_dragging() {
            return false;
        }
        self.state = DragState::Committing;
        commit();
        self.state = DragState::Idle;
        true
    }
}

/// Removes the element at `from` and reinserts it at `to`.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= items.len() || to >= items.len() {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}
