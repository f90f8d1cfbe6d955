//! Main rendering orchestration for the TUI dashboard.
//!
//! Provides the top-level `render_dashboard` function that composes the
//! status header, the card grid and the footer, with the notice modal on
//! top when one is open.

use crate::tui::app::App;
use crate::tui::views::grid::{self, card_rects, column_width, grid_columns, CardHighlight, CARD_CHROME};
use crate::tui::views::notice::render_notice;
use crate::widgets::battery::{level_color, FALLBACK_LEVEL};
use crate::widgets::network::{strength, strength_bars};
use crate::widgets::parts::UNKNOWN;
use crate::widgets::{render_card, WidgetCard, WidgetContext};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Header text displayed at the top of the dashboard.
pub const HEADER_TEXT: &str = "Device Dashboard";

/// Footer text.
pub const FOOTER_TEXT: &str = "Drag to rearrange widgets • Changes saved automatically";

/// Key hints shown right of the footer text when they fit.
const KEY_HINTS: &str = "[Space] Move  [Enter] Open  [q] Quit";

/// Renders the full dashboard: header, card grid, footer and any notice.
///
/// Updates `app.card_areas` and `app.columns` for mouse hit testing and
/// keyboard navigation.
pub fn render_dashboard(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(3),    // cards
            Constraint::Length(1), // footer
        ])
        .split(area);

    frame.render_widget(Paragraph::new(header_line(app, chunks[0].width)), chunks[0]);
    render_cards(frame, app, chunks[1]);
    frame.render_widget(Paragraph::new(footer_line(app, chunks[2].width)), chunks[2]);

    if let Some(ref text) = app.notice {
        render_notice(frame, area, text);
    }
}

fn render_cards(frame: &mut Frame, app: &mut App, area: Rect) {
    let columns = grid_columns(area.width, app.min_card_width);
    let inner_width = column_width(area.width, columns).saturating_sub(CARD_CHROME);
    let dragging = app.layout.dragging_index();

    let ctx = WidgetContext::new(&app.signals);
    let cards: Vec<(usize, WidgetCard)> = app
        .layout
        .visible()
        .filter_map(|(index, descriptor)| {
            let ctx = ctx.with_selected(app.selected_index == Some(index));
            render_card(&app.registry, descriptor, inner_width, &ctx).map(|card| (index, card))
        })
        .collect();

    let heights: Vec<u16> = cards
        .iter()
        .map(|(_, card)| card.lines.len() as u16 + CARD_CHROME)
        .collect();
    let rects = card_rects(area, &heights, columns);

    for ((index, card), rect) in cards.iter().zip(&rects) {
        let highlight = if dragging == Some(*index) {
            CardHighlight::Dragging
        } else if app.selected_index == Some(*index) {
            CardHighlight::Selected
        } else {
            CardHighlight::None
        };
        grid::render_card(frame, *rect, card, highlight);
    }

    app.columns = columns;
    app.card_areas = cards.iter().map(|(i, _)| *i).zip(rects).collect();
}

/// Title on the left; connection, clock and battery on the right.
pub fn header_line(app: &App, width: u16) -> Line<'static> {
    let s = &app.signals;
    let kind = s
        .effective_type
        .map(|t| t.to_string())
        .unwrap_or_else(|| UNKNOWN.to_string());
    let level = s.battery_level.unwrap_or(FALLBACK_LEVEL).min(100);
    let charge = if s.charging.unwrap_or(false) { "+" } else { "" };

    let mut status = strength_bars(strength(s.effective_type));
    status.push(Span::styled(
        format!(" {}  ", kind),
        Style::default().fg(Color::Gray),
    ));
    status.push(Span::styled(
        format!("{}  ", app.clock),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    status.push(Span::styled("▮", Style::default().fg(level_color(level))));
    status.push(Span::raw(format!(" {}{}%", charge, level)));

    let status_len: usize = status.iter().map(|s| s.content.chars().count()).sum();
    let padding = (width as usize)
        .saturating_sub(HEADER_TEXT.len())
        .saturating_sub(status_len);

    let mut spans = vec![
        Span::styled(
            HEADER_TEXT,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(padding.max(1))),
    ];
    spans.extend(status);
    Line::from(spans)
}

/// Footer text, or what is going on while locating or dragging.
pub fn footer_line(app: &App, width: u16) -> Line<'static> {
    if app.locating {
        return Line::styled("Locating…", Style::default().fg(Color::Yellow));
    }
    if let Some(index) = app.layout.dragging_index() {
        let title = app
            .layout
            .widgets()
            .get(index)
            .map(|w| w.title.clone())
            .unwrap_or_default();
        return Line::styled(
            format!("Moving {}: arrows to move, Enter to drop", title),
            Style::default().fg(Color::Yellow),
        );
    }

    let text_len = FOOTER_TEXT.chars().count();
    let mut spans = vec![Span::styled(FOOTER_TEXT, Style::default().fg(Color::DarkGray))];
    if (width as usize) >= text_len + 2 + KEY_HINTS.len() {
        spans.push(Span::raw(" ".repeat(width as usize - text_len - KEY_HINTS.len())));
        spans.push(Span::styled(KEY_HINTS, Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}
