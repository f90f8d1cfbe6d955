//! Permissions widget.
//!
//! A terminal cannot query per-app permission grants, so every row shows
//! `?` and activating the card points the user at the system settings.

use ratatui::text::Line;

use super::parts::{hint_line, stat_line};
use super::{Widget, WidgetAction, WidgetContext};

/// Notice shown when the card is activated.
pub const PERMISSIONS_NOTICE: &str = "Check system settings for permissions";

/// Rows shown on the card.
pub const PERMISSIONS: [&str; 4] = ["Location", "Camera", "Microphone", "Notifications"];

/// Widget listing permission states.
pub struct PermissionsWidget;

impl PermissionsWidget {
    /// Create a new `PermissionsWidget`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for PermissionsWidget {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry factory.
pub fn create() -> Box<dyn Widget> {
    Box::new(PermissionsWidget::new())
}

impl Widget for PermissionsWidget {
    fn render(&self, width: u16, _context: &WidgetContext) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = PERMISSIONS
            .iter()
            .map(|name| stat_line(width, name, "?"))
            .collect();
        lines.push(hint_line(width, WidgetAction::CheckPermissions.label()));
        lines
    }

    fn id(&self) -> &'static str {
        "permissions"
    }

    fn action(&self) -> Option<WidgetAction> {
        Some(WidgetAction::CheckPermissions)
    }
}
