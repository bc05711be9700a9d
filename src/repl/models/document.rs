//! # Document Model
//!
//! Headless stand-in for the page DOM: a header region, a fixed list of views
//! holding controls, forms and output targets, and a listener table keyed by
//! element id and event kind. Everything is addressed by element id, the same
//! way the page wiring looks elements up.

use super::content::RenderTarget;
use crate::repl::events::{EventKind, Listener};
use std::collections::HashMap;

/// A named input inside a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: String,
    /// Masked when drawn (private keys)
    pub secret: bool,
}

impl FormField {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            value: String::new(),
            secret: false,
        }
    }

    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }
}

/// Snapshot of a form's field values at submit time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// First value recorded under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub submit_label: String,
}

impl Form {
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.field(name).map(|f| f.value.as_str())
    }

    pub fn data(&self) -> FormData {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    Button(Button),
    /// Navigation trigger pointing at a view
    Link { label: String, target: String },
    /// Navigation trigger that always leads home
    BackLink { label: String },
    Form(Form),
    Output(RenderTarget),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub id: String,
    pub kind: ElementKind,
}

impl Element {
    pub fn button(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ElementKind::Button(Button {
                label: label.into(),
                disabled: false,
            }),
        }
    }

    pub fn link(id: impl Into<String>, label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ElementKind::Link {
                label: label.into(),
                target: target.into(),
            },
        }
    }

    pub fn back(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ElementKind::BackLink {
                label: "Back".to_string(),
            },
        }
    }

    pub fn form(id: impl Into<String>, submit_label: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self {
            id: id.into(),
            kind: ElementKind::Form(Form {
                fields,
                submit_label: submit_label.into(),
            }),
        }
    }

    pub fn output(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ElementKind::Output(RenderTarget::new()),
        }
    }
}

/// A full-screen logical section of the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewNode {
    pub id: String,
    pub title: String,
    pub hidden: bool,
    pub elements: Vec<Element>,
}

impl ViewNode {
    /// Views start hidden until the router picks one
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            hidden: true,
            elements: Vec::new(),
        }
    }

    pub fn with(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }
}

type ListenerKey = (String, EventKind);

/// The page: header, views and listeners
#[derive(Debug, Clone, Default)]
pub struct Document {
    title: String,
    header: Vec<Element>,
    views: Vec<ViewNode>,
    dark: bool,
    listeners: HashMap<ListenerKey, Vec<Listener>>,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn add_header_element(&mut self, element: Element) {
        self.header.push(element);
    }

    pub fn add_view(&mut self, view: ViewNode) {
        self.views.push(view);
    }

    pub fn header(&self) -> &[Element] {
        &self.header
    }

    pub fn views(&self) -> &[ViewNode] {
        &self.views
    }

    pub fn view_ids(&self) -> Vec<String> {
        self.views.iter().map(|v| v.id.clone()).collect()
    }

    pub fn view(&self, id: &str) -> Option<&ViewNode> {
        self.views.iter().find(|v| v.id == id)
    }

    /// Views currently shown, in document order
    pub fn visible_views(&self) -> Vec<&str> {
        self.views
            .iter()
            .filter(|v| !v.hidden)
            .map(|v| v.id.as_str())
            .collect()
    }

    pub fn is_view_visible(&self, id: &str) -> bool {
        self.view(id).is_some_and(|v| !v.hidden)
    }

    /// Apply a visibility selection to every view in one pass
    pub(crate) fn show_only(&mut self, id: &str) {
        for view in &mut self.views {
            view.hidden = view.id != id;
        }
    }

    fn elements(&self) -> impl Iterator<Item = &Element> {
        self.header
            .iter()
            .chain(self.views.iter().flat_map(|v| v.elements.iter()))
    }

    fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.header
            .iter_mut()
            .chain(self.views.iter_mut().flat_map(|v| v.elements.iter_mut()))
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    /// Id of the view that owns an element, `None` for header elements
    pub fn view_of(&self, element_id: &str) -> Option<&str> {
        self.views
            .iter()
            .find(|v| v.elements.iter().any(|e| e.id == element_id))
            .map(|v| v.id.as_str())
    }

    pub fn button(&self, id: &str) -> Option<&Button> {
        match self.element(id).map(|e| &e.kind) {
            Some(ElementKind::Button(button)) => Some(button),
            _ => None,
        }
    }

    pub fn button_mut(&mut self, id: &str) -> Option<&mut Button> {
        match self.element_mut(id).map(|e| &mut e.kind) {
            Some(ElementKind::Button(button)) => Some(button),
            _ => None,
        }
    }

    pub fn form(&self, id: &str) -> Option<&Form> {
        match self.element(id).map(|e| &e.kind) {
            Some(ElementKind::Form(form)) => Some(form),
            _ => None,
        }
    }

    pub fn form_mut(&mut self, id: &str) -> Option<&mut Form> {
        match self.element_mut(id).map(|e| &mut e.kind) {
            Some(ElementKind::Form(form)) => Some(form),
            _ => None,
        }
    }

    /// Set a field value; returns false when the form or field does not exist
    pub fn set_field_value(&mut self, form: &str, field: &str, value: impl Into<String>) -> bool {
        match self
            .form_mut(form)
            .and_then(|f| f.fields.iter_mut().find(|fld| fld.name == field))
        {
            Some(fld) => {
                fld.value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn target(&self, id: &str) -> Option<&RenderTarget> {
        match self.element(id).map(|e| &e.kind) {
            Some(ElementKind::Output(target)) => Some(target),
            _ => None,
        }
    }

    pub fn target_mut(&mut self, id: &str) -> Option<&mut RenderTarget> {
        match self.element_mut(id).map(|e| &mut e.kind) {
            Some(ElementKind::Output(target)) => Some(target),
            _ => None,
        }
    }

    /// Text shown by an output target, empty for unknown ids
    pub fn target_text(&self, id: &str) -> String {
        self.target(id).map(RenderTarget::plain_text).unwrap_or_default()
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub fn set_dark(&mut self, dark: bool) {
        self.dark = dark;
    }

    /// Attach a listener; returns false when no element has this id
    pub fn add_event_listener(&mut self, id: &str, kind: EventKind, listener: Listener) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.listeners
            .entry((id.to_string(), kind))
            .or_default()
            .push(listener);
        true
    }

    pub fn listeners(&self, id: &str, kind: EventKind) -> &[Listener] {
        self.listeners
            .get(&(id.to_string(), kind))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_listeners(&self, id: &str) -> bool {
        self.listeners.keys().any(|(key, _)| key == id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }
}
