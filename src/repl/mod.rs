//! # Page Architecture
//!
//! Models hold page state, view models hold page behavior, services talk to
//! the outside world, views draw, and the controller runs the loop.

pub mod controllers;
pub mod events;
pub mod layout;
pub mod models;
pub mod services;
pub mod view_models;
pub mod views;

pub use controllers::{AppController, ConsoleController};
pub use events::{EventSource, PageEvent, TerminalEventSource, TestEventSource};
pub use services::{HttpTransport, RequestOutcome, Transport};
