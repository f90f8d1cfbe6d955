//! TUI module for the device dashboard.
//!
//! Provides a terminal user interface built on ratatui and crossterm: a
//! status header, a grid of widget cards that can be rearranged by dragging
//! and a footer.

pub mod app;
pub mod event;
pub mod ui;
pub mod views;

#[cfg(test)]
pub(crate) mod test_utils;
