//! Location widget.
//!
//! The card never shows a position itself. Activating it asks the
//! collector for a one-shot lookup whose outcome is shown as a notice
//! built by [`location_notice`].

use host_signals::Position;
use ratatui::{
    style::{Color, Style},
    text::Line,
};

use super::parts::{centered_line, hint_line};
use super::{Widget, WidgetAction, WidgetContext};

/// Notice when lookups are turned off.
pub const GEOLOCATION_UNSUPPORTED: &str = "Geolocation not supported";

/// Notice when a lookup fails for any reason.
pub const LOCATION_FAILED: &str = "Location access denied or failed";

/// Widget offering an on-demand location lookup.
pub struct LocationWidget;

impl LocationWidget {
    /// Create a new `LocationWidget`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocationWidget {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry factory.
pub fn create() -> Box<dyn Widget> {
    Box::new(LocationWidget::new())
}

/// Text of the notice shown after a lookup.
pub fn location_notice(result: &Result<Position, String>) -> String {
    match result {
        Ok(pos) => {
            let mut text = format!("Location: {:.6}, {:.6}", pos.latitude, pos.longitude);
            if let Some(accuracy) = pos.accuracy {
                text.push_str(&format!("\nAccuracy: ±{}m", accuracy.round()));
            }
            text
        }
        Err(_) => LOCATION_FAILED.to_string(),
    }
}

impl Widget for LocationWidget {
    fn render(&self, width: u16, _context: &WidgetContext) -> Vec<Line<'static>> {
        vec![
            Line::default(),
            centered_line(
                width,
                "Location access required",
                Style::default().fg(Color::Gray),
            ),
            Line::default(),
            hint_line(width, WidgetAction::Locate.label()),
        ]
    }

    fn id(&self) -> &'static str {
        "location"
    }

    fn action(&self) -> Option<WidgetAction> {
        Some(WidgetAction::Locate)
    }
}
