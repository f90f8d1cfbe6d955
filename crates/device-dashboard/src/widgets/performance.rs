//! Performance widget: core count, touch points and memory pressure.

use ratatui::{style::Color, text::Line};

use super::parts::{format_bytes, gauge_line, stat_line, MemoryEstimate, UNKNOWN};
use super::{Widget, WidgetContext};
use crate::signals::SignalState;

/// Widget showing compute capacity.
pub struct PerformanceWidget;

impl PerformanceWidget {
    /// Create a new `PerformanceWidget`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for PerformanceWidget {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry factory.
pub fn create() -> Box<dyn Widget> {
    Box::new(PerformanceWidget::new())
}

/// Memory label and used ratio, from real readings when the host has them.
fn memory(s: &SignalState) -> (String, f64) {
    match (s.total_memory, s.used_memory) {
        (Some(total), Some(used)) if total > 0 => {
            (format_bytes(total), used as f64 / total as f64)
        }
        _ => {
            let est = MemoryEstimate::from_cores(s.hardware_concurrency);
            (format!("{}MB", est.total_mb), est.ratio())
        }
    }
}

impl Widget for PerformanceWidget {
    fn render(&self, width: u16, context: &WidgetContext) -> Vec<Line<'static>> {
        let s = context.signals;
        let cores = s
            .hardware_concurrency
            .filter(|&c| c > 0)
            .map(|c| c.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string());
        let touch = s
            .max_touch_points
            .filter(|&t| t > 0)
            .map(|t| t.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string());
        let (total, ratio) = memory(s);
        vec![
            stat_line(width, "CPU Cores", cores),
            stat_line(width, "Touch Points", touch),
            stat_line(width, "Memory", total),
            gauge_line(width, ratio, Color::Blue),
        ]
    }

    fn id(&self) -> &'static str {
        "performance"
    }
}
