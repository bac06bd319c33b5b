//! Form field value objects

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current values of a form, keyed by field name
pub type FormValues = BTreeMap<String, FieldValue>;

/// Error message per validated field (empty string means no error)
pub type FormErrors = BTreeMap<String, String>;

/// Whether a field has lost focus at least once
pub type TouchedMap = BTreeMap<String, bool>;

/// Type-safe field values
///
/// Serialized untagged so prefill data reads as plain JSON scalars.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Create a text value
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Canonical string form every check runs against.
    ///
    /// `Empty`, `Bool(false)` and NaN all normalize to `""` so that each
    /// representation of "nothing entered" fails `required` the same way.
    pub fn normalized(&self) -> String {
        match self {
            FieldValue::Empty => String::new(),
            FieldValue::Bool(false) => String::new(),
            FieldValue::Bool(true) => "true".to_string(),
            FieldValue::Number(n) if n.is_nan() => String::new(),
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", *n as i64)
            }
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) => s.clone(),
        }
    }

    /// Get the text value (returns empty string for non-text values)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }

    /// True when the normalized form is empty
    pub fn is_blank(&self) -> bool {
        self.normalized().trim().is_empty()
    }
}

/// Structural equality, with NaN equal to NaN so an untouched form never
/// reports dirty
impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Empty, FieldValue::Empty) => true,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
            (FieldValue::Number(a), FieldValue::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (FieldValue::Text(a), FieldValue::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// How a consumer should present a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Input,
    Select,
    TextArea,
}

/// Presentation-facing description of a single form field
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: Option<String>,
}

impl FormField {
    /// Create a new single-line input field
    pub fn input(name: &str, label: &str, required: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Input,
            required,
            placeholder: None,
        }
    }

    /// Create a new select field
    pub fn select(name: &str, label: &str, required: bool) -> Self {
        Self {
            kind: FieldKind::Select,
            ..Self::input(name, label, required)
        }
    }

    /// Create a new multiline field
    pub fn text_area(name: &str, label: &str, required: bool) -> Self {
        Self {
            kind: FieldKind::TextArea,
            ..Self::input(name, label, required)
        }
    }

    /// Attach placeholder text
    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    /// Label with the required marker appended
    pub fn display_label(&self) -> String {
        if self.required {
            format!("{} *", self.label)
        } else {
            self.label.clone()
        }
    }

    pub fn is_multiline(&self) -> bool {
        self.kind == FieldKind::TextArea
    }
}
