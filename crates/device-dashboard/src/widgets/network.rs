//! Network widget: connection class, link speed, latency and a signal
//! strength meter.

use host_signals::EffectiveType;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use super::parts::{stat_line, UNKNOWN};
use super::{Widget, WidgetContext};

/// Bars in the strength meter.
pub const STRENGTH_BARS: u8 = 4;

/// Widget showing connection quality.
pub struct NetworkWidget;

impl NetworkWidget {
    /// Create a new `NetworkWidget`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for NetworkWidget {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry factory.
pub fn create() -> Box<dyn Widget> {
    Box::new(NetworkWidget::new())
}

/// Lit bars for a connection class; an unknown class shows full strength.
pub fn strength(effective_type: Option<EffectiveType>) -> u8 {
    effective_type.map_or(STRENGTH_BARS, EffectiveType::strength)
}

/// Meter with `lit` of four bars highlighted.
pub fn strength_bars(lit: u8) -> Vec<Span<'static>> {
    const GLYPHS: [&str; 4] = ["▂", "▄", "▆", "█"];
    GLYPHS
        .iter()
        .zip(1..=STRENGTH_BARS)
        .map(|(glyph, bar)| {
            let color = if bar <= lit {
                Color::Green
            } else {
                Color::DarkGray
            };
            Span::styled(*glyph, Style::default().fg(color))
        })
        .collect()
}

impl Widget for NetworkWidget {
    fn render(&self, width: u16, context: &WidgetContext) -> Vec<Line<'static>> {
        let s = context.signals;
        let kind = s
            .effective_type
            .map(|t| t.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string());
        let speed = s
            .downlink
            .filter(|&d| d > 0.0)
            .map(|d| format!("{} Mbps", d))
            .unwrap_or_else(|| UNKNOWN.to_string());
        let latency = s
            .rtt
            .filter(|&r| r > 0)
            .map(|r| format!("{}ms", r))
            .unwrap_or_else(|| UNKNOWN.to_string());

        let mut meter = vec![Span::styled(
            "Signal Strength ",
            Style::default().fg(Color::Gray),
        )];
        meter.extend(strength_bars(strength(s.effective_type)));

        vec![
            stat_line(width, "Type", kind),
            stat_line(width, "Speed", speed),
            stat_line(width, "Latency", latency),
            Line::from(meter),
        ]
    }

    fn id(&self) -> &'static str {
        "network"
    }
}
