//! # View Layer
//!
//! Draws the visible part of the document: the header, the one visible view
//! with its controls and output targets, and a status line. The page is
//! redrawn in full after every change; there is no incremental update.

use crate::repl::models::{Content, Document, Element, ElementKind, EntryValue, Form};
use anyhow::Result;
use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use std::borrow::Cow;
use std::io::{self, Write};

// Helper macro to convert crossterm errors to anyhow errors
macro_rules! queue_term {
    ($($arg:expr),* $(,)?) => {
        queue!($($arg),*).map_err(anyhow::Error::from)
    };
}

const INDENT: &str = "  ";

/// Console command reference printed by `help`
pub const HELP_TEXT: &str = "\
commands:
  click <id>                 press a button or link (alias: c)
  set <form> <field> <value> fill a form field
  submit <form>              submit a form (alias: s)
  help                       show this help (alias: ?)
  quit                       leave (aliases: q, exit)";

/// Replace control characters other than newline and tab so server text
/// cannot drive the terminal
fn scrub(text: &str) -> Cow<'_, str> {
    let unsafe_char = |c: char| c.is_control() && c != '\n' && c != '\t';
    if text.chars().any(unsafe_char) {
        Cow::Owned(
            text.chars()
                .map(|c| if unsafe_char(c) { char::REPLACEMENT_CHARACTER } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(text)
    }
}

/// Trait for rendering views
pub trait ViewRenderer {
    /// Draw the page header and its visible view
    fn render_page(&mut self, doc: &Document) -> Result<()>;

    /// Print a one-line notice below the page
    fn render_message(&mut self, message: &str) -> Result<()>;

    fn render_help(&mut self) -> Result<()>;
}

/// Text roles on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Title,
    Label,
    Accent,
    Muted,
}

/// Terminal-based view renderer using crossterm
pub struct TerminalRenderer<W: Write> {
    out: W,
    styled: bool,
    dark: bool,
}

impl TerminalRenderer<io::Stdout> {
    /// Renderer on stdout; plain text when stdout is not a terminal
    pub fn stdout() -> Self {
        Self::new(io::stdout(), atty::is(atty::Stream::Stdout))
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, styled: bool) -> Self {
        Self {
            out,
            styled,
            dark: false,
        }
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn accent(&self) -> Color {
        if self.dark {
            Color::Cyan
        } else {
            Color::DarkBlue
        }
    }

    fn write_styled(&mut self, text: &str, tone: Tone) -> Result<()> {
        let text = scrub(text);
        let text = text.as_ref();
        if !self.styled {
            return queue_term!(self.out, Print(text));
        }
        let accent = self.accent();
        match tone {
            Tone::Title => queue_term!(
                self.out,
                SetAttribute(Attribute::Bold),
                SetForegroundColor(accent),
                Print(text),
                ResetColor,
                SetAttribute(Attribute::Reset)
            ),
            Tone::Label => queue_term!(
                self.out,
                SetAttribute(Attribute::Bold),
                Print(text),
                SetAttribute(Attribute::Reset)
            ),
            Tone::Accent => queue_term!(
                self.out,
                SetForegroundColor(accent),
                Print(text),
                ResetColor
            ),
            Tone::Muted => queue_term!(
                self.out,
                SetAttribute(Attribute::Dim),
                Print(text),
                SetAttribute(Attribute::Reset)
            ),
        }
    }

    fn write_plain(&mut self, text: &str) -> Result<()> {
        queue_term!(self.out, Print(scrub(text)))
    }

    fn newline(&mut self) -> Result<()> {
        queue_term!(self.out, Print("\n"))
    }

    fn render_header(&mut self, doc: &Document) -> Result<()> {
        self.write_styled(&format!("== {} ==", doc.title()), Tone::Title)?;
        for element in doc.header() {
            self.write_plain("  ")?;
            self.render_control(element)?;
        }
        let theme = if doc.is_dark() { "dark" } else { "light" };
        self.write_styled(&format!("  (theme: {theme})"), Tone::Muted)?;
        self.newline()
    }

    /// Buttons and links on one line, `[id] label`
    fn render_control(&mut self, element: &Element) -> Result<()> {
        match &element.kind {
            ElementKind::Button(button) if button.disabled => {
                self.write_styled(&format!("[{}] {}", element.id, button.label), Tone::Muted)
            }
            ElementKind::Button(button) => {
                self.write_styled(&format!("[{}]", element.id), Tone::Accent)?;
                self.write_plain(&format!(" {}", button.label))
            }
            ElementKind::Link { label, .. } | ElementKind::BackLink { label } => {
                self.write_styled(&format!("[{}]", element.id), Tone::Accent)?;
                self.write_plain(&format!(" {label}"))
            }
            _ => Ok(()),
        }
    }

    fn render_form(&mut self, id: &str, form: &Form) -> Result<()> {
        self.write_plain(INDENT)?;
        self.write_styled(&format!("<{id}>"), Tone::Accent)?;
        self.write_plain(&format!(" {}", form.submit_label))?;
        self.newline()?;
        for field in &form.fields {
            let shown = if field.secret {
                "*".repeat(field.value.chars().count())
            } else {
                field.value.clone()
            };
            self.write_plain(&format!("{INDENT}{INDENT}"))?;
            self.write_styled(&format!("{} ({})", field.label, field.name), Tone::Muted)?;
            self.write_plain(&format!(": {shown}"))?;
            self.newline()?;
        }
        Ok(())
    }

    fn render_content(&mut self, id: &str, content: &Content) -> Result<()> {
        let pad = format!("{INDENT}{INDENT}");
        self.write_plain(INDENT)?;
        self.write_styled(&format!("{id}:"), Tone::Muted)?;
        self.newline()?;

        match content {
            Content::Empty => {}
            Content::Text(text) => {
                for line in text.lines() {
                    self.write_plain(&format!("{pad}{line}\n"))?;
                }
            }
            Content::Blocks(blocks) => {
                for (i, block) in blocks.iter().enumerate() {
                    if i > 0 {
                        self.newline()?;
                    }
                    self.write_plain(&pad)?;
                    self.write_styled(&block.label(), Tone::Label)?;
                    self.newline()?;
                    for line in block.body.lines() {
                        self.write_plain(&format!("{pad}{line}\n"))?;
                    }
                }
            }
            Content::Entries(entries) => {
                for entry in entries {
                    self.write_plain(&pad)?;
                    self.write_styled(&entry.label(), Tone::Label)?;
                    match &entry.value {
                        EntryValue::Scalar(text) => {
                            self.write_plain(&format!(" {text}"))?;
                            self.newline()?;
                        }
                        EntryValue::Structured(json) => {
                            self.newline()?;
                            for line in json.lines() {
                                self.write_plain(&format!("{pad}{line}\n"))?;
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn render_element(&mut self, element: &Element) -> Result<()> {
        match &element.kind {
            ElementKind::Form(form) => self.render_form(&element.id, form),
            ElementKind::Output(target) => self.render_content(&element.id, target.content()),
            _ => {
                self.write_plain(INDENT)?;
                self.render_control(element)?;
                self.newline()
            }
        }
    }
}

impl<W: Write> ViewRenderer for TerminalRenderer<W> {
    fn render_page(&mut self, doc: &Document) -> Result<()> {
        self.dark = doc.is_dark();
        self.newline()?;
        self.render_header(doc)?;

        for view in doc.views().iter().filter(|v| !v.hidden) {
            self.newline()?;
            self.write_styled(&format!("# {}", view.title), Tone::Title)?;
            self.write_styled(&format!(" ({})", view.id), Tone::Muted)?;
            self.newline()?;
            for element in &view.elements {
                self.render_element(element)?;
            }
        }

        self.out.flush().map_err(anyhow::Error::from)
    }

    fn render_message(&mut self, message: &str) -> Result<()> {
        self.write_styled(&format!("> {message}"), Tone::Muted)?;
        self.newline()?;
        self.out.flush().map_err(anyhow::Error::from)
    }

    fn render_help(&mut self) -> Result<()> {
        self.write_plain(HELP_TEXT)?;
        self.newline()?;
        self.out.flush().map_err(anyhow::Error::from)
    }
}
