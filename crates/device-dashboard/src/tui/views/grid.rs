//! Card grid view.
//!
//! Cards flow left to right, top to bottom, in layout order. The grid fits
//! as many columns as the minimum card width allows; each row is as tall
//! as its tallest card.

use crate::widgets::WidgetCard;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// Rows the border adds to a card's body.
pub const CARD_CHROME: u16 = 2;

/// How a card is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardHighlight {
    /// Not focused.
    None,
    /// Has keyboard focus.
    Selected,
    /// Being dragged.
    Dragging,
}

impl CardHighlight {
    fn border_style(self) -> Style {
        match self {
            CardHighlight::None => Style::default().fg(Color::DarkGray),
            CardHighlight::Selected => Style::default().fg(Color::Cyan),
            CardHighlight::Dragging => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }
}

/// Number of columns that fit in `width`, at least one.
pub fn grid_columns(width: u16, min_card_width: u16) -> usize {
    (width / min_card_width.max(1)).max(1) as usize
}

/// Width of one column.
pub fn column_width(width: u16, columns: usize) -> u16 {
    width / columns.max(1) as u16
}

/// Positions for cards of the given `heights`.
///
/// Cards that would start below `area` are left out, so the result may be
/// shorter than `heights`. The last visible row is clipped to the area.
pub fn card_rects(area: Rect, heights: &[u16], columns: usize) -> Vec<Rect> {
    let columns = columns.max(1);
    let width = column_width(area.width, columns);
    let bottom = area.y + area.height;
    let mut rects = Vec::with_capacity(heights.len());
    let mut y = area.y;

    for row in heights.chunks(columns) {
        if y >= bottom {
            break;
        }
        let row_height = row.iter().copied().max().unwrap_or(0).min(bottom - y);
        for (col, _) in row.iter().enumerate() {
            rects.push(Rect::new(area.x + col as u16 * width, y, width, row_height));
        }
        y += row_height;
    }
    rects
}

/// Draws one card into `area`.
pub fn render_card(frame: &mut Frame, area: Rect, card: &WidgetCard, highlight: CardHighlight) {
    let title_style = match highlight {
        CardHighlight::None => Style::default().add_modifier(Modifier::BOLD),
        _ => highlight.border_style(),
    };
    let block = Block::default()
        .title(Span::styled(format!(" {} ", card.title), title_style))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(highlight.border_style());

    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(card.lines.clone()), inner);
}
