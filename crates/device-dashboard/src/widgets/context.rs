//! Widget context providing shared state for widget rendering.
//!
//! The [`WidgetContext`] carries everything a widget may read while
//! rendering. It borrows the application's [`SignalState`] so nothing is
//! cloned per frame.

use crate::signals::SignalState;

/// Shared context passed to widgets during rendering.
///
/// # Example
///
/// ```
/// use device_dashboard::signals::SignalState;
/// use device_dashboard::widgets::WidgetContext;
///
/// let signals = SignalState::default();
/// let ctx = WidgetContext::new(&signals);
/// assert!(!ctx.selected);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct WidgetContext<'a> {
    /// Latest readings.
    pub signals: &'a SignalState,

    /// Whether the card being rendered has keyboard focus.
    pub selected: bool,
}

impl<'a> WidgetContext<'a> {
    /// Creates an unselected context over `signals`.
    pub fn new(signals: &'a SignalState) -> Self {
        Self {
            signals,
            selected: false,
        }
    }

    /// Marks the card as focused.
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}
