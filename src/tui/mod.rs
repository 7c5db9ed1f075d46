//! TUI integration layer (crossterm + ratatui).
//!
//! Kept apart from `kernel` so the document core has no terminal dependency.

pub mod terminal_guard;
pub mod view;
