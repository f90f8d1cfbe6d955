//! Storage widget: used and available space with a breakdown.
//!
//! With a real disk reading the card shows the root filesystem. Without one
//! it falls back to the memory estimate and an approximate
//! System / Apps / Free split of it.

use ratatui::{
    style::{Color, Style},
    text::Line,
};

use super::parts::{format_bytes, gauge_line, stat_line, MemoryEstimate};
use super::{Widget, WidgetContext};

/// Approximate shares of the estimate, as `(label, fraction)`.
pub const ESTIMATE_BREAKDOWN: [(&str, f64); 3] = [("System", 0.3), ("Apps", 0.4), ("Free", 0.3)];

/// Widget showing storage usage.
pub struct StorageWidget;

impl StorageWidget {
    /// Create a new `StorageWidget`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for StorageWidget {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry factory.
pub fn create() -> Box<dyn Widget> {
    Box::new(StorageWidget::new())
}

fn render_disk(width: u16, total: u64, available: u64) -> Vec<Line<'static>> {
    let available = available.min(total);
    let used = total - available;
    vec![
        stat_line(width, "Used", format_bytes(used)),
        gauge_line(width, used as f64 / total as f64, Color::Magenta),
        stat_line(width, "Available", format_bytes(available)),
        stat_line(width, "Total", format_bytes(total)),
    ]
}

fn render_estimate(width: u16, est: MemoryEstimate) -> Vec<Line<'static>> {
    let mut lines = vec![
        stat_line(width, "Used", format!("{}MB", est.used_mb)),
        gauge_line(width, est.ratio(), Color::Magenta),
        stat_line(
            width,
            "Available",
            format!("{}MB", est.total_mb - est.used_mb),
        ),
        Line::styled("─".repeat(width as usize), Style::default().fg(Color::DarkGray)),
    ];
    lines.extend(
        ESTIMATE_BREAKDOWN
            .iter()
            .map(|(label, share)| stat_line(width, label, format!("~{}MB", est.share_mb(*share)))),
    );
    lines
}

impl Widget for StorageWidget {
    fn render(&self, width: u16, context: &WidgetContext) -> Vec<Line<'static>> {
        let s = context.signals;
        match (s.disk_total, s.disk_available) {
            (Some(total), Some(available)) if total > 0 => render_disk(width, total, available),
            _ => render_estimate(width, MemoryEstimate::from_cores(s.hardware_concurrency)),
        }
    }

    fn id(&self) -> &'static str {
        "storage"
    }
}
