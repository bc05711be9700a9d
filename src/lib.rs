//! # Ledgerline - Console Front End for a Ledger API
//!
//! A headless page of views, forms and output targets, wired to the ledger's
//! JSON HTTP API and driven from a terminal.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   PageEvent   ┌──────────────┐   begin/settle  ┌──────────┐
//! │ EventSource │──────────────▶│ AppController│────────────────▶│ Binders  │
//! └─────────────┘               │              │                 └────┬─────┘
//!                               │ - listeners  │   navigate           │ render
//! ┌─────────────┐    redraw     │ - event loop │──────────┐      ┌────▼─────┐
//! │    View     │◀──────────────│              │          └─────▶│ Document │
//! └─────────────┘               └──────┬───────┘                 └──────────┘
//!                                      │ spawn
//!                               ┌──────▼───────┐
//!                               │  Transport   │──▶ ledger API
//!                               └──────────────┘
//! ```

pub mod cmd_args;
pub mod config;
pub mod repl;

// Re-export main types for easy access
pub use repl::*;
