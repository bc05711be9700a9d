//! Terminal Event Source Implementation
//!
//! Reads console commands line by line from stdin on a dedicated thread and
//! hands them to the controller as page events.

use super::event_source::EventSource;
use super::types::PageEvent;
use anyhow::Result;
use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// Production event source backed by stdin
#[derive(Debug)]
pub struct TerminalEventSource {
    lines: Receiver<PageEvent>,
    pending: Option<PageEvent>,
}

impl TerminalEventSource {
    /// Spawn the stdin reader
    pub fn new() -> Self {
        Self::from_reader(std::io::BufReader::new(std::io::stdin()))
    }

    /// Read commands from any line source; end of input turns into `Quit`
    pub fn from_reader<R: BufRead + Send + 'static>(reader: R) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in reader.lines() {
                let event = match line {
                    Ok(line) if line.trim().is_empty() => continue,
                    Ok(line) => PageEvent::from_line(&line),
                    Err(e) => {
                        tracing::warn!("stdin read failed: {}", e);
                        break;
                    }
                };
                if tx.send(event).is_err() {
                    return;
                }
            }
            let _ = tx.send(PageEvent::Quit);
        });

        Self {
            lines: rx,
            pending: None,
        }
    }
}

impl Default for TerminalEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for TerminalEventSource {
    fn poll(&mut self, timeout: Duration) -> Result<bool> {
        if self.pending.is_some() {
            return Ok(true);
        }
        match self.lines.recv_timeout(timeout) {
            Ok(event) => {
                self.pending = Some(event);
                Ok(true)
            }
            Err(RecvTimeoutError::Timeout) => Ok(false),
            // Reader thread is gone; report a quit so the loop can wind down
            Err(RecvTimeoutError::Disconnected) => {
                self.pending = Some(PageEvent::Quit);
                Ok(true)
            }
        }
    }

    fn read(&mut self) -> Result<PageEvent> {
        if let Some(event) = self.pending.take() {
            return Ok(event);
        }
        match self.lines.recv() {
            Ok(event) => Ok(event),
            Err(_) => Ok(PageEvent::Quit),
        }
    }
}
