//! # Controllers Module
//!
//! The event loop tying input, page state and network calls together.

pub mod app_controller;

pub use app_controller::{AppController, ConsoleController};
