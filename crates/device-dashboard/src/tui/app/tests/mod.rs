pub(crate) use super::*;
pub(crate) use crate::tui::test_utils::make_app;
pub(crate) use crossterm::event::KeyModifiers;


pub(crate) fn make_mouse_event(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

/// Lays the first `count` cards out in a single row of 10-column cards.
pub(crate) fn lay_out_in_row(app: &mut App, count: usize) {
    app.card_areas = (0..count)
        .map(|i| (i, Rect::new(i as u16 * 10, 1, 10, 5)))
        .collect();
    app.columns = count.max(1);
}

/// Reads the saved order back from disk.
pub(crate) fn saved_ids(app: &App) -> Option<Vec<String>> {
    app.layout
        .store()
        .read_persisted()
        .expect("readable layout file")
        .map(|widgets| widgets.into_iter().map(|w| w.id).collect())
}
