//! # View Router
//!
//! Keeps exactly one view of the document visible. The router owns the
//! current selection; the document only mirrors it through each view's hidden
//! flag, and every change goes through [`ViewRouter::navigate`].

use crate::repl::events::{EventKind, Listener};
use crate::repl::models::Document;

/// Id of the view shown at startup and by every back trigger
pub const HOME_VIEW: &str = "view-home";

#[derive(Debug, Clone)]
pub struct ViewRouter {
    known: Vec<String>,
    home: String,
    current: Option<String>,
}

impl ViewRouter {
    /// Build a router over the views present in the document
    pub fn from_document(doc: &Document, home: impl Into<String>) -> Self {
        Self {
            known: doc.view_ids(),
            home: home.into(),
            current: None,
        }
    }

    pub fn home(&self) -> &str {
        &self.home
    }

    /// The selected view, `None` before bootstrap
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn known_views(&self) -> &[String] {
        &self.known
    }

    pub fn is_known(&self, id: &str) -> bool {
        self.known.iter().any(|v| v == id)
    }

    /// Show `view_id` and hide every other view.
    ///
    /// An id outside the known set hides everything; that only happens when
    /// the page wiring points at a view that does not exist.
    pub fn navigate(&mut self, doc: &mut Document, view_id: &str) {
        if self.current.as_deref() == Some(view_id) && doc.is_view_visible(view_id) {
            return;
        }

        if !self.is_known(view_id) {
            tracing::error!("navigation to unknown view '{}'", view_id);
        } else {
            tracing::debug!(
                "navigate: {} -> {}",
                self.current.as_deref().unwrap_or("<none>"),
                view_id
            );
        }

        doc.show_only(view_id);
        self.current = Some(view_id.to_string());
    }

    /// Navigate to the home view
    pub fn go_home(&mut self, doc: &mut Document) {
        let home = self.home.clone();
        self.navigate(doc, &home);
    }

    /// Make `control` a navigation trigger for `view_id`
    pub fn register_trigger(&self, doc: &mut Document, control: &str, view_id: &str) -> bool {
        let added = doc.add_event_listener(
            control,
            EventKind::Click,
            Listener::Navigate(view_id.to_string()),
        );
        if !added {
            tracing::debug!("navigation trigger '{}' not on page, skipped", control);
        }
        added
    }

    /// Make `control` a back trigger
    pub fn register_back(&self, doc: &mut Document, control: &str) -> bool {
        doc.add_event_listener(control, EventKind::Click, Listener::Back)
    }
}
