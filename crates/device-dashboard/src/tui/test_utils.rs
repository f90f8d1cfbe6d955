//! Shared test utilities for TUI testing with ratatui TestBackend.
//!
//! Provides helper functions for creating test terminals, extracting buffer
//! content and building an [`App`] whose layout is saved to a temporary
//! directory.

#![cfg(test)]

use crate::layout::{LayoutManager, LayoutStore};
use crate::tui::app::App;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use tempfile::TempDir;

/// Creates a Terminal with TestBackend at the specified dimensions.
pub fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("failed to create test terminal")
}

/// Extracts all text from a specific row in the buffer as a single String.
pub fn row_text(buffer: &Buffer, row: u16) -> String {
    let area = buffer.area();
    if row >= area.height {
        return String::new();
    }
    (0..area.width)
        .map(|col| {
            buffer
                .cell((col, row))
                .map(|cell| cell.symbol())
                .unwrap_or(" ")
        })
        .collect()
}

/// Finds the first row index that contains the given text, or None if not found.
pub fn find_row_with_text(buffer: &Buffer, text: &str) -> Option<u16> {
    let area = buffer.area();
    (0..area.height).find(|&row| row_text(buffer, row).contains(text))
}

/// An app over the default order, saving into a fresh temp directory.
///
/// Keep the returned `TempDir` alive for as long as the app is used.
pub fn make_app() -> (App, TempDir) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let store = LayoutStore::new(dir.path().join("widget-order.json"));
    let mut app = App::new(LayoutManager::load(store));
    app.init_selection();
    (app, dir)
}

/// Renders the full dashboard to a buffer and returns the buffer for inspection.
pub fn render_dashboard_to_buffer(app: &mut App, width: u16, height: u16) -> Buffer {
    let mut terminal = test_terminal(width, height);
    terminal
        .draw(|frame| {
            crate::tui::ui::render_dashboard(frame, app);
        })
        .expect("draw failed");
    terminal.backend().buffer().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_text_extracts_row_content() {
        let mut terminal = test_terminal(20, 5);
        terminal
            .draw(|frame| {
                let area = frame.area();
                let para = ratatui::widgets::Paragraph::new("Hello World");
                frame.render_widget(para, area);
            })
            .expect("draw failed");
        let buffer = terminal.backend().buffer();
        assert!(row_text(buffer, 0).starts_with("Hello World"));
        assert_eq!(row_text(buffer, 9), "");
    }

    #[test]
    fn test_make_app_starts_with_default_order() {
        let (app, dir) = make_app();
        assert_eq!(app.layout.len(), 8);
        assert_eq!(app.selected_index, Some(0));
        assert_eq!(
            app.layout.store().path(),
            dir.path().join("widget-order.json")
        );
    }
}
