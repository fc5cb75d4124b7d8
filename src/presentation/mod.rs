//! Presentation layer handling terminal UI and user input.
//!
//! This module renders the component surface with ratatui and routes
//! keyboard input to the presenters: browse keys while idle, form keys to
//! whichever presenter holds the edit session, Escape as the session's
//! cancellation signal.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
