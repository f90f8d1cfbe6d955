//! Building blocks shared by the widget renderers.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Fallback text for readings the host does not provide.
pub const UNKNOWN: &str = "Unknown";

/// Core count assumed when the host does not report one.
pub const DEFAULT_CORES: usize = 4;

/// Memory assumed per core when the host does not report memory.
pub const ESTIMATED_MB_PER_CORE: u64 = 512;

/// `label` on the left and `value` flush right within `width` columns.
pub fn stat_line(width: u16, label: &str, value: impl Into<String>) -> Line<'static> {
    let value = value.into();
    let used = label.chars().count() + value.chars().count();
    let gap = (width as usize).saturating_sub(used).max(1);
    Line::from(vec![
        Span::styled(label.to_string(), Style::default().fg(Color::Gray)),
        Span::raw(" ".repeat(gap)),
        Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
    ])
}

/// Horizontal bar filled to `ratio` (clamped to 0..=1) in `color`.
pub fn gauge_line(width: u16, ratio: f64, color: Color) -> Line<'static> {
    let width = width as usize;
    let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
    let filled = (ratio * width as f64).round() as usize;
    Line::from(vec![
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled(
            "░".repeat(width - filled),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// Text centered within `width` columns.
pub fn centered_line(width: u16, text: impl Into<String>, style: Style) -> Line<'static> {
    let text = text.into();
    let pad = (width as usize).saturating_sub(text.chars().count()) / 2;
    Line::from(vec![
        Span::raw(" ".repeat(pad)),
        Span::styled(text, style),
    ])
}

/// Muted hint shown under actionable widgets.
pub fn hint_line(width: u16, text: &str) -> Line<'static> {
    centered_line(
        width,
        format!("[ {} ]", text),
        Style::default().fg(Color::Cyan),
    )
}

/// Human-readable binary size, e.g. `15.5 GB`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

/// Memory estimate used when the host reports none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryEstimate {
    /// Estimated total in MB.
    pub total_mb: u64,
    /// Estimated used share (60%) in MB.
    pub used_mb: u64,
}

impl MemoryEstimate {
    /// `cores × 512 MB`, with 60% considered used.
    pub fn from_cores(cores: Option<usize>) -> Self {
        let cores = cores.filter(|&c| c > 0).unwrap_or(DEFAULT_CORES) as u64;
        let total_mb = cores * ESTIMATED_MB_PER_CORE;
        Self {
            total_mb,
            used_mb: (total_mb as f64 * 0.6).round() as u64,
        }
    }

    /// Rounded share of the estimate, in MB.
    pub fn share_mb(&self, fraction: f64) -> u64 {
        (self.total_mb as f64 * fraction).round() as u64
    }

    /// Used fraction.
    pub fn ratio(&self) -> f64 {
        if self.total_mb == 0 {
            0.0
        } else {
            self.used_mb as f64 / self.total_mb as f64
        }
    }
}
