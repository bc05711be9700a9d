//! # Views Module
//!
//! Terminal drawing of the document.

pub mod terminal_renderer;

pub use terminal_renderer::{TerminalRenderer, ViewRenderer, HELP_TEXT};
