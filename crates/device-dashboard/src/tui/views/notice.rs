//! Modal notice overlay.
//!
//! Shows a short message centered over the dashboard until the user
//! dismisses it. Used for the outcome of card actions.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Hint on the last line of the notice.
pub const DISMISS_HINT: &str = "[Enter] OK";

/// Area of a notice holding `text`, centered in `area`.
pub fn notice_area(area: Rect, text: &str) -> Rect {
    let longest = text
        .lines()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(DISMISS_HINT.len()) as u16;
    let width = (longest + 4).min(area.width);
    let height = (text.lines().count() as u16 + 4).min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Draws `text` as a modal over `area`.
pub fn render_notice(frame: &mut Frame, area: Rect, text: &str) {
    let modal_area = notice_area(area, text);

    // Clear background
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(" Notice ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let mut lines: Vec<Line> = text.lines().map(Line::raw).collect();
    lines.push(Line::default());
    lines.push(Line::styled(DISMISS_HINT, Style::default().fg(Color::DarkGray)));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, modal_area);
}
