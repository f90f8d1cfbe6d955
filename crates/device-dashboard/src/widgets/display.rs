//! Display widget: screen resolution, viewport, scale and color depth.

use ratatui::text::Line;

use super::parts::{stat_line, UNKNOWN};
use super::{Widget, WidgetContext};

/// Widget describing the terminal's screen.
pub struct DisplayWidget;

impl DisplayWidget {
    /// Create a new `DisplayWidget`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for DisplayWidget {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry factory.
pub fn create() -> Box<dyn Widget> {
    Box::new(DisplayWidget::new())
}

fn dimensions<T: std::fmt::Display>(w: Option<T>, h: Option<T>) -> String {
    match (w, h) {
        (Some(w), Some(h)) => format!("{} × {}", w, h),
        _ => UNKNOWN.to_string(),
    }
}

impl Widget for DisplayWidget {
    fn render(&self, width: u16, context: &WidgetContext) -> Vec<Line<'static>> {
        let s = context.signals;
        let pixel_ratio = s
            .pixel_ratio
            .map(|r| r.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string());
        let depth = s
            .color_depth
            .map(|d| d.to_string())
            .unwrap_or_else(|| "?".to_string());
        vec![
            stat_line(width, "Resolution", dimensions(s.screen_width, s.screen_height)),
            stat_line(
                width,
                "Viewport",
                dimensions(s.viewport_width, s.viewport_height),
            ),
            stat_line(width, "Pixel Ratio", pixel_ratio),
            stat_line(width, "Color Depth", format!("{} bit", depth)),
        ]
    }

    fn id(&self) -> &'static str {
        "display"
    }
}
