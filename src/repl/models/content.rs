//! # Render Target Content
//!
//! Typed markup held by output targets. Server-controlled strings only ever
//! land in text slots, so nothing here is interpreted as markup.

/// One labelled block produced for an element of a JSON array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// 1-based position in the source array
    pub position: usize,
    /// Pretty-printed JSON of the element
    pub body: String,
}

impl Block {
    pub fn label(&self) -> String {
        format!("[#{}]", self.position)
    }
}

/// Value half of a keyed entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValue {
    /// Plain scalar text shown on the label line
    Scalar(String),
    /// Pretty-printed JSON shown below the label
    Structured(String),
}

/// One key/value line of a rendered object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: EntryValue,
}

impl Entry {
    pub fn label(&self) -> String {
        format!("{}:", self.key)
    }

    /// Text of the entry as a reader sees it
    pub fn plain_text(&self) -> String {
        match &self.value {
            EntryValue::Scalar(text) => format!("{}: {}", self.key, text),
            EntryValue::Structured(json) => format!("{}:\n{}", self.key, json),
        }
    }
}

/// Visual content of a render target
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Content {
    #[default]
    Empty,
    /// Verbatim text, no markup
    Text(String),
    /// Labelled blocks separated by a blank line
    Blocks(Vec<Block>),
    /// Labelled entries separated by a newline
    Entries(Vec<Entry>),
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text(text.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Content::Empty)
    }

    /// Flatten the content to the text shown on screen
    pub fn plain_text(&self) -> String {
        match self {
            Content::Empty => String::new(),
            Content::Text(text) => text.clone(),
            Content::Blocks(blocks) => blocks
                .iter()
                .map(|block| format!("{}\n{}", block.label(), block.body))
                .collect::<Vec<_>>()
                .join("\n\n"),
            Content::Entries(entries) => entries
                .iter()
                .map(Entry::plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// A display surface identified by its element id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderTarget {
    content: Content,
}

impl RenderTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn set_content(&mut self, content: Content) {
        self.content = content;
    }

    /// Replace the content with verbatim text
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = Content::Text(text.into());
    }

    pub fn plain_text(&self) -> String {
        self.content.plain_text()
    }
}
