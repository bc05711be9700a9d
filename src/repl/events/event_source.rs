//! # Event Source Abstraction
//!
//! The controller never reads input directly. It pulls [`PageEvent`]s from an
//! [`EventSource`], so the same loop runs against a console in production and
//! against a pre-programmed queue in tests:
//!
//! ```text
//! Production:   AppController ──▶ TerminalEventSource ──▶ stdin lines
//! Testing:      AppController ──▶ TestEventSource     ──▶ VecDeque<PageEvent>
//! ```

use super::types::PageEvent;
use anyhow::Result;
use std::time::Duration;

/// Trait for abstracting event input sources
pub trait EventSource: Send {
    /// Wait up to `timeout` for an event.
    ///
    /// Returns true if an event is ready to be read, false if the timeout elapsed.
    fn poll(&mut self, timeout: Duration) -> Result<bool>;

    /// Read the next available event
    ///
    /// This should only be called after poll() returns true.
    fn read(&mut self) -> Result<PageEvent>;

    /// True when no more events will ever arrive
    ///
    /// The console never runs dry (end of input becomes a quit event), so
    /// only queue-backed sources report exhaustion.
    fn is_exhausted(&self) -> bool {
        false
    }
}
