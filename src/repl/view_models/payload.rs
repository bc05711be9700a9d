//! # Payload Shapes and Path Templates
//!
//! Declarative description of how a form snapshot becomes a request: which
//! JSON fields to emit, where each one reads from, and how it is coerced.

use crate::repl::models::FormData;
use regex::Regex;
use serde_json::{Map, Number, Value};
use std::sync::OnceLock;

/// Largest integer a JSON number can carry exactly in the browser
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// How one output field gets its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coercion {
    /// Copy the named input as a string
    PassThrough(String),
    /// Parse the named input as a number
    Numeric(String),
    /// Always the literal `0`
    FixedZero,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    pub output: String,
    pub coercion: Coercion,
}

/// Ordered table of output fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayloadShape {
    fields: Vec<FieldMapping>,
}

impl PayloadShape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, output: &str, input: &str) -> Self {
        self.fields.push(FieldMapping {
            output: output.to_string(),
            coercion: Coercion::PassThrough(input.to_string()),
        });
        self
    }

    pub fn number(mut self, output: &str, input: &str) -> Self {
        self.fields.push(FieldMapping {
            output: output.to_string(),
            coercion: Coercion::Numeric(input.to_string()),
        });
        self
    }

    pub fn zero(mut self, output: &str) -> Self {
        self.fields.push(FieldMapping {
            output: output.to_string(),
            coercion: Coercion::FixedZero,
        });
        self
    }

    pub fn fields(&self) -> &[FieldMapping] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build the JSON body from a form snapshot.
    ///
    /// Inputs missing from the form leave their output key out of the body.
    pub fn build(&self, data: &FormData) -> Value {
        let mut body = Map::new();
        for mapping in &self.fields {
            let value = match &mapping.coercion {
                Coercion::PassThrough(input) => data.get(input).map(|v| Value::String(v.to_string())),
                Coercion::Numeric(input) => data.get(input).map(coerce_number),
                Coercion::FixedZero => Some(Value::from(0)),
            };
            if let Some(value) = value {
                body.insert(mapping.output.clone(), value);
            }
        }
        Value::Object(body)
    }
}

/// Numeric coercion with browser `Number()` parsing rules.
///
/// Blank input is `0`; `0x`/`0o`/`0b` prefixes are radix integers; anything
/// else is a decimal float. Whole numbers in the safe range become JSON
/// integers. Input that is not a finite number becomes `null`, the way a
/// browser serializes `NaN` and `Infinity`.
pub fn coerce_number(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::from(0);
    }

    let lower = trimmed.to_ascii_lowercase();
    let radix = [("0x", 16), ("0o", 8), ("0b", 2)]
        .into_iter()
        .find_map(|(prefix, radix)| lower.strip_prefix(prefix).map(|digits| (digits, radix)));

    let parsed = match radix {
        Some((digits, radix)) if !digits.is_empty() => digits.chars().try_fold(0.0, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        }),
        Some(_) => None,
        // Rust also accepts "inf" and "nan" spellings; those are not numbers here
        None if lower.chars().any(|c| c.is_ascii_alphabetic() && c != 'e') => None,
        None => trimmed.parse::<f64>().ok(),
    };

    match parsed.filter(|n| n.is_finite()) {
        Some(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => Value::from(n as i64),
        Some(n) => Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null),
        None => Value::Null,
    }
}

/// A request path with `{field}` placeholders filled from form input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    template: String,
    params: Vec<String>,
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
    })
}

impl PathTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let params = placeholder_regex()
            .captures_iter(&template)
            .map(|caps| caps[1].to_string())
            .collect();
        Self { template, params }
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Names of the form fields the path depends on
    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn is_parameterized(&self) -> bool {
        !self.params.is_empty()
    }

    /// Substitute every placeholder; `None` when any needed field is missing or empty
    pub fn expand(&self, data: &FormData) -> Option<String> {
        if self
            .params
            .iter()
            .any(|name| data.get(name).map_or(true, str::is_empty))
        {
            return None;
        }
        let expanded = placeholder_regex().replace_all(&self.template, |caps: &regex::Captures| {
            data.get(&caps[1]).unwrap_or_default().to_string()
        });
        Some(expanded.into_owned())
    }
}
