//! # Theme Manager
//!
//! Owns the current theme and funnels every change through the document and
//! the store.

use crate::repl::events::{EventKind, Listener};
use crate::repl::models::{Document, ThemeState};
use crate::repl::services::ThemeStore;

pub struct ThemeManager {
    state: ThemeState,
    store: Box<dyn ThemeStore>,
}

impl std::fmt::Debug for ThemeManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeManager")
            .field("state", &self.state)
            .finish()
    }
}

impl ThemeManager {
    pub fn new(store: Box<dyn ThemeStore>) -> Self {
        Self {
            state: ThemeState::default(),
            store,
        }
    }

    pub fn state(&self) -> ThemeState {
        self.state
    }

    /// Read the stored preference once and apply it (light when absent)
    pub fn bootstrap(&mut self, doc: &mut Document) {
        let stored = match self.store.load() {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Could not read theme preference: {:#}", e);
                None
            }
        };
        let theme = stored
            .as_deref()
            .and_then(|value| match value.parse::<ThemeState>() {
                Ok(theme) => Some(theme),
                Err(e) => {
                    tracing::warn!("Ignoring stored theme: {}", e);
                    None
                }
            })
            .unwrap_or_default();
        self.apply(doc, theme);
    }

    /// Switch between light and dark
    pub fn toggle(&mut self, doc: &mut Document) {
        let current = if doc.is_dark() {
            ThemeState::Dark
        } else {
            ThemeState::Light
        };
        self.apply(doc, current.toggled());
    }

    fn apply(&mut self, doc: &mut Document, theme: ThemeState) {
        self.state = theme;
        doc.set_dark(theme.is_dark());
        if let Err(e) = self.store.save(theme) {
            tracing::warn!("Could not persist theme preference: {:#}", e);
        }
        tracing::debug!("theme applied: {}", theme);
    }

    /// Make `control` toggle the theme
    pub fn register_toggle(&self, doc: &mut Document, control: &str) -> bool {
        doc.add_event_listener(control, EventKind::Click, Listener::ToggleTheme)
    }
}
