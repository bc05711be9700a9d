//! # Services Layer
//!
//! Everything that leaves the process: HTTP calls to the ledger API and the
//! persisted theme preference.

pub mod body;
pub mod theme_store;
pub mod transport;

pub use theme_store::{IniThemeStore, MemoryThemeStore, ThemeStore, THEME_KEY};
pub use transport::{
    ApiRequest, HttpTransport, Method, RequestOutcome, Transport, TransportError,
};
