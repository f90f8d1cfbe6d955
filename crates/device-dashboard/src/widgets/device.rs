//! Device widget: platform, vendor, language and connectivity.

use ratatui::text::Line;

use super::parts::{stat_line, UNKNOWN};
use super::{Widget, WidgetContext};

/// Widget showing what the host is.
pub struct DeviceWidget;

impl DeviceWidget {
    /// Create a new `DeviceWidget`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for DeviceWidget {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry factory.
pub fn create() -> Box<dyn Widget> {
    Box::new(DeviceWidget::new())
}

impl Widget for DeviceWidget {
    fn render(&self, width: u16, context: &WidgetContext) -> Vec<Line<'static>> {
        let s = context.signals;
        let or_unknown = |v: &Option<String>| v.clone().unwrap_or_else(|| UNKNOWN.to_string());
        let online = if s.online.unwrap_or(false) { "Yes" } else { "No" };
        vec![
            stat_line(width, "Platform", or_unknown(&s.platform)),
            stat_line(width, "Vendor", or_unknown(&s.vendor)),
            stat_line(width, "Language", or_unknown(&s.language)),
            stat_line(width, "Online", online),
        ]
    }

    fn id(&self) -> &'static str {
        "device"
    }
}
