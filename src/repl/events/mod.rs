//! # Events Module
//!
//! Page events, listener entries and the sources that produce events.

pub mod event_source;
pub mod terminal_event_source;
pub mod test_event_source;
pub mod types;

pub use event_source::EventSource;
pub use terminal_event_source::TerminalEventSource;
pub use test_event_source::TestEventSource;
pub use types::{BindingId, EventKind, Listener, PageEvent};
