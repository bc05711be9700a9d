//! # Models Module
//!
//! Page state: the document tree, output contents and the theme flag.

pub mod content;
pub mod document;
pub mod theme;

pub use content::{Block, Content, Entry, EntryValue, RenderTarget};
pub use document::{Button, Document, Element, ElementKind, Form, FormData, FormField, ViewNode};
pub use theme::ThemeState;
