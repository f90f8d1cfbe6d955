//! Battery widget: charge level, charging status and a level gauge.
//!
//! A host without a battery still renders the card, showing a full,
//! discharging battery.

use ratatui::{
    style::{Color, Modifier, Style},
    text::Line,
};

use super::parts::{centered_line, gauge_line};
use super::{Widget, WidgetContext};

/// Level shown when no reading is available.
pub const FALLBACK_LEVEL: u8 = 100;

/// Levels at or below this are drawn in red.
pub const LOW_LEVEL: u8 = 20;

/// Widget showing the battery.
pub struct BatteryWidget;

impl BatteryWidget {
    /// Create a new `BatteryWidget`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for BatteryWidget {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry factory.
pub fn create() -> Box<dyn Widget> {
    Box::new(BatteryWidget::new())
}

/// Gauge color for `level`.
pub fn level_color(level: u8) -> Color {
    if level > LOW_LEVEL {
        Color::Green
    } else {
        Color::Red
    }
}

impl Widget for BatteryWidget {
    fn render(&self, width: u16, context: &WidgetContext) -> Vec<Line<'static>> {
        let s = context.signals;
        let level = s.battery_level.unwrap_or(FALLBACK_LEVEL).min(100);
        let status = if s.charging.unwrap_or(false) {
            "Charging"
        } else {
            "Discharging"
        };
        vec![
            centered_line(
                width,
                format!("{}%", level),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            centered_line(width, status, Style::default().fg(Color::Gray)),
            Line::default(),
            gauge_line(width, f64::from(level) / 100.0, level_color(level)),
        ]
    }

    fn id(&self) -> &'static str {
        "battery"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::SignalState;

    fn render(signals: &SignalState) -> Vec<Line<'static>> {
        BatteryWidget::new().render(20, &WidgetContext::new(signals))
    }

    #[test]
    fn test_absent_reading_shows_full_discharging() {
        let lines = render(&SignalState::default());
        assert_eq!(lines[0].to_string().trim(), "100%");
        assert_eq!(lines[1].to_string().trim(), "Discharging");
        assert_eq!(lines[3].to_string(), "█".repeat(20));
        assert_eq!(lines[3].spans[0].style.fg, Some(Color::Green));
    }

    #[test]
    fn test_charging_reading() {
        let signals = SignalState {
            battery_level: Some(55),
            charging: Some(true),
            ..SignalState::default()
        };
        let lines = render(&signals);
        assert_eq!(lines[0].to_string().trim(), "55%");
        assert_eq!(lines[1].to_string().trim(), "Charging");
        assert_eq!(lines[3].to_string().chars().filter(|&c| c == '█').count(), 11);
    }

    #[test]
    fn test_zero_is_a_real_reading() {
        let signals = SignalState {
            battery_level: Some(0),
            charging: Some(false),
            ..SignalState::default()
        };
        let lines = render(&signals);
        assert_eq!(lines[0].to_string().trim(), "0%");
        assert!(!lines[3].to_string().contains('█'));
    }

    #[test]
    fn test_gauge_color_threshold() {
        assert_eq!(level_color(21), Color::Green);
        assert_eq!(level_color(20), Color::Red);
        assert_eq!(level_color(5), Color::Red);
    }

    #[test]
    fn test_low_battery_gauge_is_red() {
        let signals = SignalState {
            battery_level: Some(15),
            ..SignalState::default()
        };
        let lines = render(&signals);
        assert_eq!(lines[3].spans[0].style.fg, Some(Color::Red));
    }
}
