//! Step definitions for Cucumber tests
//!
//! Steps are organized by feature domain:
//! - `console` - mock API setup, startup and typed commands
//! - `navigation` - view switching
//! - `bindings` - form filling, submission and rendered results
//! - `theme` - theme preference

pub mod bindings;
pub mod console;
pub mod navigation;
pub mod theme;
