//! Device Dashboard library
//!
//! A terminal dashboard of cards describing the machine it runs on: device
//! facts, display, performance, battery, network, storage, location and
//! permissions. The cards can be rearranged by dragging and the order is
//! saved between runs.
//!
//! Readings come from the `host-signals` crate. Battery and network are
//! polled through [`signals::subscribe`], and every reading flows through
//! one channel into the [`tui::app::App`], which is the only writer of the
//! state the widgets render.

/// Configuration loading, defaults and XDG path resolution.
pub mod config;

/// Widget order, its persistence and the drag gesture that reorders it.
pub mod layout;

/// Logging initialization.
pub mod logging;

/// Signal collection and the state the widgets read.
pub mod signals;

/// TUI module providing the terminal user interface for the dashboard.
pub mod tui;

/// Widget system: one renderer per card.
pub mod widgets;
