//! Application state and main event loop for the TUI.
//!
//! Manages terminal setup/teardown, panic hooks, and the core render loop.
//! [`App`] is the only writer of the signal state and the widget order:
//! collector messages are drained into it before every frame, and input
//! events are translated into drag gestures on its [`LayoutManager`].

use crate::config::schema::{LocationConfig, SignalsConfig};
use crate::layout::LayoutManager;
use crate::signals::{CollectorMessage, LocationRequest, SignalCollector, SignalState};
use crate::tui::event::{handle_key_event, Action, Event, EventHandler};
use crate::tui::ui::render_dashboard;
use crate::widgets::location::{location_notice, GEOLOCATION_UNSUPPORTED};
use crate::widgets::permissions::PERMISSIONS_NOTICE;
use crate::widgets::{WidgetAction, WidgetRegistry};
use chrono::{DateTime, TimeZone};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::layout::Rect;
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::time::Duration;

/// Core application state for the TUI.
pub struct App {
    /// Whether the application should exit.
    pub should_quit: bool,
    /// Count of ticks processed.
    pub tick_count: u64,
    /// Latest readings, written only by [`App::apply_message`].
    pub signals: SignalState,
    /// Widget order and the drag gesture acting on it.
    pub layout: LayoutManager,
    /// Renderers for the cards.
    pub registry: WidgetRegistry,
    /// Layout index of the focused card.
    pub selected_index: Option<usize>,
    /// Modal notice text, shown until dismissed.
    pub notice: Option<String>,
    /// Whether a location lookup is in flight.
    pub locating: bool,
    /// Local time as `HH:MM`.
    pub clock: String,
    /// Card rectangles from the last render, keyed by layout index.
    ///
    /// Used by mouse hit testing. Empty until the first render.
    pub card_areas: Vec<(usize, Rect)>,
    /// Grid columns used by the last render.
    pub columns: usize,
    /// Narrowest card the grid will lay out.
    pub min_card_width: u16,
    collector: Option<SignalCollector>,
    /// Card under the last left-button press.
    press_card: Option<usize>,
    /// Whether the current drag has moved anything.
    drag_moved: bool,
}

impl App {
    /// Creates an app over `layout` with no readings yet.
    pub fn new(layout: LayoutManager) -> Self {
        Self {
            should_quit: false,
            tick_count: 0,
            signals: SignalState::default(),
            layout,
            registry: WidgetRegistry::new(),
            selected_index: None,
            notice: None,
            locating: false,
            clock: String::new(),
            card_areas: Vec::new(),
            columns: 1,
            min_card_width: crate::config::schema::TuiConfig::default().min_card_width,
            collector: None,
            press_card: None,
            drag_moved: false,
        }
    }

    /// Sets the narrowest card width.
    pub fn with_min_card_width(mut self, width: u16) -> Self {
        self.min_card_width = width;
        self
    }

    /// Layout indices of the cards that are drawn, in display order.
    ///
    /// Disabled widgets and ids without a renderer are left out.
    pub fn card_order(&self) -> Vec<usize> {
        self.layout
            .visible()
            .filter(|(_, w)| self.registry.create(&w.id).is_some())
            .map(|(i, _)| i)
            .collect()
    }

    /// Focuses the first card, if any.
    pub fn init_selection(&mut self) {
        self.selected_index = self.card_order().first().copied();
    }

    /// Moves focus `delta` cards through the display order, clamped to the
    /// ends. During a drag the carried card moves with the focus.
    pub fn move_selection(&mut self, delta: isize) {
        let order = self.card_order();
        if order.is_empty() {
            return;
        }
        let Some(current) = self
            .selected_index
            .and_then(|i| order.iter().position(|&o| o == i))
        else {
            self.selected_index = Some(order[0]);
            return;
        };
        let last = order.len() as isize - 1;
        let target = order[(current as isize + delta).clamp(0, last) as usize];

        if self.layout.dragging_index().is_some() && self.layout.drag_over(target) {
            self.drag_moved = true;
        }
        self.selected_index = Some(target);
    }

    /// Starts dragging the focused card.
    pub fn pick_up_selected(&mut self) -> bool {
        let Some(index) = self.selected_index else {
            return false;
        };
        self.drag_moved = false;
        self.layout.begin_drag(index)
    }

    /// Ends the drag and saves the order.
    pub fn drop_card(&mut self) -> bool {
        self.layout.end_drag()
    }

    /// Action of the focused card.
    pub fn selected_action(&self) -> Option<WidgetAction> {
        let widget = self.layout.widgets().get(self.selected_index?)?;
        self.registry.create(&widget.id)?.action()
    }

    /// Runs a card action.
    pub fn trigger(&mut self, action: WidgetAction) {
        match action {
            WidgetAction::CheckPermissions => {
                self.notice = Some(PERMISSIONS_NOTICE.to_string());
            }
            WidgetAction::Locate => {
                if self.locating {
                    return;
                }
                let started = self
                    .collector
                    .as_ref()
                    .map(SignalCollector::request_location);
                match started {
                    Some(LocationRequest::Started) => self.locating = true,
                    Some(LocationRequest::Disabled) | None => {
                        self.notice = Some(GEOLOCATION_UNSUPPORTED.to_string());
                    }
                }
            }
        }
    }

    /// Closes the notice.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Folds one collector message into the app.
    pub fn apply_message(&mut self, message: CollectorMessage) {
        match message {
            CollectorMessage::Signal(update) => self.signals.apply(update),
            CollectorMessage::Location(result) => {
                self.locating = false;
                self.notice = Some(location_notice(&result));
            }
        }
    }

    /// Updates the clock; returns whether the displayed minute changed.
    pub fn refresh_clock<Tz: TimeZone>(&mut self, now: DateTime<Tz>) -> bool
    where
        Tz::Offset: std::fmt::Display,
    {
        let clock = now.format("%H:%M").to_string();
        if clock == self.clock {
            return false;
        }
        self.clock = clock;
        true
    }

    /// Layout index of the card drawn at (`column`, `row`).
    pub fn card_at(&self, column: u16, row: u16) -> Option<usize> {
        self.card_areas
            .iter()
            .find(|(_, r)| {
                column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
            })
            .map(|(i, _)| *i)
    }

    /// Handles a mouse event and returns the appropriate action.
    ///
    /// Pressing on a card picks it up, dragging across other cards moves it
    /// live, and releasing drops it. A press and release on the same card
    /// without moving anything is a click and runs the card's action. A press
    /// during a keyboard drag is not a click.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Action {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.notice.is_some() {
                    self.dismiss_notice();
                    return Action::None;
                }
                // A keyboard drag owns the gesture; the release only drops it
                if self.layout.dragging_index().is_some() {
                    self.press_card = None;
                    return Action::None;
                }
                self.press_card = self.card_at(mouse.column, mouse.row);
                match self.press_card {
                    Some(index) => {
                        self.selected_index = Some(index);
                        self.drag_moved = false;
                        self.layout.begin_drag(index);
                    }
                    None => self.selected_index = None,
                }
                Action::None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.layout.dragging_index().is_none() {
                    return Action::None;
                }
                if let Some(target) = self.card_at(mouse.column, mouse.row) {
                    if self.layout.drag_over(target) {
                        self.drag_moved = true;
                        self.selected_index = Some(target);
                    }
                }
                Action::None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let pressed = self.press_card.take();
                let is_click = !self.drag_moved
                    && pressed.is_some()
                    && pressed == self.card_at(mouse.column, mouse.row);
                self.drop_card();
                if is_click {
                    self.selected_action().map_or(Action::None, Action::Trigger)
                } else {
                    Action::None
                }
            }
            _ => Action::None,
        }
    }

    /// Forwards a terminal resize to the collector.
    pub fn on_resize(&mut self, width: u16, height: u16) {
        match &self.collector {
            Some(collector) => collector.viewport_changed(width, height),
            None => self.signals.apply(crate::signals::SignalUpdate::Viewport { width, height }),
        }
    }

    /// Drops any carried card, stops collection and flags exit.
    pub fn quit(&mut self) {
        self.drop_card();
        self.collector = None;
        self.should_quit = true;
    }

    /// Runs the TUI application: sets up terminal, enters event loop, restores on exit.
    pub async fn run(
        &mut self,
        signals: &SignalsConfig,
        location: LocationConfig,
        tick_rate: Duration,
    ) -> io::Result<()> {
        // Install panic hook that restores terminal before printing panic info
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        setup_terminal()?;

        let result = self.event_loop(signals, location, tick_rate).await;

        restore_terminal()?;
        result
    }

    /// Main event loop: renders UI and processes events.
    async fn event_loop(
        &mut self,
        signals: &SignalsConfig,
        location: LocationConfig,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;
        let mut events = EventHandler::new(tick_rate);
        let mut reader = EventStream::new();

        let (mut collector, mut rx) = SignalCollector::channel(location);
        collector.start(signals).await;
        self.collector = Some(collector);
        self.refresh_clock(chrono::Local::now());
        self.init_selection();

        loop {
            // Drain collector updates before rendering
            while let Ok(msg) = rx.try_recv() {
                self.apply_message(msg);
            }

            terminal.draw(|frame| {
                render_dashboard(frame, self);
            })?;

            let action = match events.next(&mut reader).await? {
                Event::Key(key) => handle_key_event(self, key),
                Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                Event::Resize(width, height) => {
                    self.on_resize(width, height);
                    Action::None
                }
                Event::Tick => {
                    self.tick_count += 1;
                    self.refresh_clock(chrono::Local::now());
                    Action::None
                }
            };

            match action {
                Action::Quit => {
                    self.quit();
                    return Ok(());
                }
                Action::Trigger(action) => self.trigger(action),
                Action::None => {}
            }
        }
    }
}

/// Enables raw mode and switches to the alternate screen.
fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    Ok(())
}

/// Restores the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

#[cfg(test)]
mod tests;
