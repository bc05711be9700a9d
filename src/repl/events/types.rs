//! # Core Event Types
//!
//! Page events coming from the input side and the listener table entries
//! that react to them.

use std::fmt;
use std::str::FromStr;

/// DOM-style event kinds a listener can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Submit,
}

/// Index of a binding inside the binder registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(pub usize);

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "binding#{}", self.0)
    }
}

/// Reaction attached to an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listener {
    /// Show the named view
    Navigate(String),
    /// Show the home view
    Back,
    /// Run a registered binding
    Bind(BindingId),
    /// Flip the colour scheme
    ToggleTheme,
}

/// Input events delivered to the app controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// Activate a button or link
    Click { id: String },
    /// Submit a form
    Submit { form: String },
    /// Change the value of a form field
    Input {
        form: String,
        field: String,
        value: String,
    },
    /// Redraw and print the command reference
    Help,
    Quit,
    /// Input line that did not parse
    Unrecognized(String),
}

impl PageEvent {
    pub fn click(id: impl Into<String>) -> Self {
        PageEvent::Click { id: id.into() }
    }

    pub fn submit(form: impl Into<String>) -> Self {
        PageEvent::Submit { form: form.into() }
    }

    pub fn input(
        form: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        PageEvent::Input {
            form: form.into(),
            field: field.into(),
            value: value.into(),
        }
    }

    /// Parse a console line, falling back to `Unrecognized`
    pub fn from_line(line: &str) -> Self {
        line.parse()
            .unwrap_or_else(|_| PageEvent::Unrecognized(line.trim().to_string()))
    }
}

impl FromStr for PageEvent {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim_start()),
            None => (line, ""),
        };

        match command {
            "click" | "c" if !rest.is_empty() && !rest.contains(char::is_whitespace) => {
                Ok(PageEvent::click(rest))
            }
            "submit" | "s" if !rest.is_empty() && !rest.contains(char::is_whitespace) => {
                Ok(PageEvent::submit(rest))
            }
            "set" => {
                let mut parts = rest.splitn(3, char::is_whitespace);
                match (parts.next(), parts.next()) {
                    (Some(form), Some(field)) if !form.is_empty() && !field.is_empty() => {
                        // The value keeps its inner spacing; an absent value clears the field
                        let value = parts.next().unwrap_or("").trim_start();
                        Ok(PageEvent::input(form, field, value))
                    }
                    _ => Err("usage: set <form> <field> <value>".to_string()),
                }
            }
            "help" | "?" if rest.is_empty() => Ok(PageEvent::Help),
            "quit" | "q" | "exit" if rest.is_empty() => Ok(PageEvent::Quit),
            _ => Err(format!("unrecognized command: {line}")),
        }
    }
}
