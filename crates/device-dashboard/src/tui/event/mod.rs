//! Event handling for the TUI.
//!
//! Wraps crossterm events and adds a tick variant for periodic UI refresh.
//! Keyboard input is translated into selection moves and the three drag
//! gestures; see [`handle_key_event`].

use crate::tui::app::App;
use crate::widgets::WidgetAction;
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseEvent,
};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};

/// Application-level event variants.
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI refresh.
    Tick,
}

/// Event handler that merges terminal input events with periodic ticks.
pub struct EventHandler {
    tick: Interval,
}

impl EventHandler {
    /// Creates a new EventHandler with the specified tick rate.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(tick_rate: Duration) -> Self {
        let mut tick = interval(tick_rate);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { tick }
    }

    /// Waits for the next event, returning either a terminal event or a tick.
    pub async fn next(&mut self, reader: &mut EventStream) -> std::io::Result<Event> {
        loop {
            tokio::select! {
                maybe_event = reader.next() => {
                    match maybe_event {
                        // Windows reports releases too
                        Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                            return Ok(Event::Key(key))
                        }
                        Some(Ok(CrosstermEvent::Mouse(mouse))) => return Ok(Event::Mouse(mouse)),
                        Some(Ok(CrosstermEvent::Resize(w, h))) => return Ok(Event::Resize(w, h)),
                        Some(Err(e)) => return Err(e),
                        Some(Ok(_)) => continue,
                        None => return Err(std::io::Error::new(
                            std::io::ErrorKind::UnexpectedEof,
                            "event stream ended",
                        )),
                    }
                }
                _ = self.tick.tick() => {
                    return Ok(Event::Tick);
                }
            }
        }
    }
}

/// Action produced by handling an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No action to take.
    None,
    /// Quit the application.
    Quit,
    /// Run the action of a card.
    Trigger(WidgetAction),
}

/// Handles a key event by updating the app or returning an action.
///
/// | Key               | Idle                     | Dragging            |
/// |-------------------|--------------------------|---------------------|
/// | arrows / `hjkl`   | move selection           | move carried card   |
/// | `Space` / `m`     | pick up selected card    | drop                |
/// | `Enter`           | activate selected card   | drop                |
/// | `Esc`             | clear selection          | drop                |
///
/// While a notice is shown, `Enter`, `Esc` and `Space` dismiss it and other
/// keys are ignored.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Action {
    if should_quit(key) {
        return Action::Quit;
    }

    if app.notice.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.dismiss_notice();
        }
        return Action::None;
    }

    let dragging = app.layout.dragging_index().is_some();
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => {
            app.move_selection(-1);
            Action::None
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.move_selection(1);
            Action::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection(-(app.columns as isize));
            Action::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection(app.columns as isize);
            Action::None
        }
        KeyCode::Char(' ') | KeyCode::Char('m') => {
            if dragging {
                app.drop_card();
            } else {
                app.pick_up_selected();
            }
            Action::None
        }
        KeyCode::Enter => {
            if dragging {
                app.drop_card();
                Action::None
            } else {
                app.selected_action().map_or(Action::None, Action::Trigger)
            }
        }
        KeyCode::Esc => {
            // No undo: a cancelled drag keeps and saves the live order
            if dragging {
                app.drop_card();
            } else {
                app.selected_index = None;
            }
            Action::None
        }
        _ => Action::None,
    }
}

/// Returns true if the key event should trigger application quit.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q'))
        || (key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c')))
}
