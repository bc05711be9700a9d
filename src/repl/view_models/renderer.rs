//! # JSON Renderer
//!
//! Projects an arbitrary JSON value onto a render target without knowing its
//! schema. Shapes are tried in a fixed order: string, array, object, then
//! everything else as pretty JSON.

use crate::repl::models::{Block, Content, Entry, EntryValue, RenderTarget};
use serde_json::Value;

/// Placeholder shown when a failure carries no message
pub const DEFAULT_ERROR_MESSAGE: &str = "request failed";

/// Render `value` into `target`, replacing whatever it showed before
pub fn render(target: &mut RenderTarget, value: &Value) {
    target.set_content(project(value));
}

/// Render an error message through the string projection
pub fn render_error(target: &mut RenderTarget, message: &str) {
    let message = if message.is_empty() {
        DEFAULT_ERROR_MESSAGE
    } else {
        message
    };
    render(target, &Value::String(message.to_string()));
}

/// Pure projection of a JSON value to target content
pub fn project(value: &Value) -> Content {
    match value {
        Value::String(text) => Content::Text(text.clone()),
        Value::Array(items) => Content::Blocks(
            items
                .iter()
                .enumerate()
                .map(|(idx, item)| Block {
                    position: idx + 1,
                    body: pretty(item),
                })
                .collect(),
        ),
        Value::Object(map) => Content::Entries(
            map.iter()
                .map(|(key, value)| Entry {
                    key: key.clone(),
                    value: match value {
                        Value::Object(_) | Value::Array(_) => EntryValue::Structured(pretty(value)),
                        other => EntryValue::Scalar(scalar_text(other)),
                    },
                })
                .collect(),
        ),
        other => Content::Text(pretty(other)),
    }
}

/// Two-space indented JSON text
pub fn pretty(value: &Value) -> String {
    // Serializing a Value cannot fail: map keys are always strings
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Plain form of a scalar: strings unquoted, the rest as JSON text
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
