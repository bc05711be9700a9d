//! Test Event Source Implementation
//!
//! Test implementation of EventSource that uses a queue of pre-programmed
//! events, allowing deterministic testing without requiring a console.

use super::event_source::EventSource;
use super::types::PageEvent;
use anyhow::Result;
use std::collections::VecDeque;
use std::time::Duration;

/// Test event source that provides events from a pre-programmed queue
#[derive(Debug, Clone)]
pub struct TestEventSource {
    events: VecDeque<PageEvent>,
    always_ready: bool,
}

impl TestEventSource {
    /// Create a new test event source with an empty event queue
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
            always_ready: true,
        }
    }

    /// Create a test event source with pre-populated events
    pub fn with_events(events: Vec<PageEvent>) -> Self {
        Self {
            events: events.into(),
            always_ready: true,
        }
    }

    /// Queue console lines exactly as a user would type them
    pub fn with_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        Self::with_events(lines.into_iter().map(PageEvent::from_line).collect())
    }

    /// Set whether poll() should report queued events
    ///
    /// When false, poll() always returns false (useful for timeout testing).
    pub fn set_always_ready(&mut self, ready: bool) {
        self.always_ready = ready;
    }

    pub fn push_event(&mut self, event: PageEvent) {
        self.events.push_back(event);
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    pub fn pending_count(&self) -> usize {
        self.events.len()
    }
}

impl Default for TestEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for TestEventSource {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        if !self.always_ready {
            return Ok(false);
        }

        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> Result<PageEvent> {
        self.events
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No events available in test queue"))
    }

    fn is_exhausted(&self) -> bool {
        self.events.is_empty()
    }
}
