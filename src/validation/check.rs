//! Primitive field checks

use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::state::FormValues;

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email shape pattern is valid")
});

/// Signature of a hand-written check: `(normalized value, all values) -> message`
pub type CheckFn = Arc<dyn Fn(&str, &FormValues) -> String + Send + Sync>;

/// What a check tests for
#[derive(Clone)]
pub enum CheckKind {
    Required,
    Email,
    MinLength(usize),
    MaxLength(usize),
    NumberRange { min: f64, max: f64 },
    Pattern(Regex),
    MatchesField(String),
    Custom(CheckFn),
}

impl fmt::Debug for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckKind::Required => write!(f, "Required"),
            CheckKind::Email => write!(f, "Email"),
            CheckKind::MinLength(min) => write!(f, "MinLength({min})"),
            CheckKind::MaxLength(max) => write!(f, "MaxLength({max})"),
            CheckKind::NumberRange { min, max } => write!(f, "NumberRange({min}..={max})"),
            CheckKind::Pattern(re) => write!(f, "Pattern({})", re.as_str()),
            CheckKind::MatchesField(other) => write!(f, "MatchesField({other})"),
            CheckKind::Custom(_) => write!(f, "Custom"),
        }
    }
}

/// A single check with its (optionally overridden) failure message.
///
/// Checks other than [`Check::required`] and [`Check::custom`] pass on an
/// empty value, so presence is only ever enforced by `required`.
#[derive(Debug, Clone)]
pub struct Check {
    kind: CheckKind,
    message: Option<String>,
}

impl Check {
    fn new(kind: CheckKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// Fails when the value is blank after trimming
    pub fn required() -> Self {
        Self::new(CheckKind::Required)
    }

    /// Fails when a non-blank value is not shaped like `local@domain.tld`
    pub fn email() -> Self {
        Self::new(CheckKind::Email)
    }

    /// Fails when a non-empty value has fewer than `min` characters
    pub fn min_length(min: usize) -> Self {
        Self::new(CheckKind::MinLength(min))
    }

    /// Fails when a non-empty value has more than `max` characters
    pub fn max_length(max: usize) -> Self {
        Self::new(CheckKind::MaxLength(max))
    }

    /// Fails when a non-empty value is not a number within `[min, max]`
    pub fn number_range(min: f64, max: f64) -> Self {
        Self::new(CheckKind::NumberRange { min, max })
    }

    /// Fails when a non-empty value does not match `regex`
    pub fn pattern(regex: Regex) -> Self {
        Self::new(CheckKind::Pattern(regex))
    }

    /// Fails when the value differs from the value of another field
    pub fn matches_field(other: impl Into<String>) -> Self {
        Self::new(CheckKind::MatchesField(other.into()))
    }

    /// Wrap an arbitrary check returning a message (empty when it passes)
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str, &FormValues) -> String + Send + Sync + 'static,
    {
        Self::new(CheckKind::Custom(Arc::new(f)))
    }

    /// Override the default failure message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn kind(&self) -> &CheckKind {
        &self.kind
    }

    /// The message reported on failure
    pub fn message(&self) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }
        match &self.kind {
            CheckKind::Required => "This field is required".to_string(),
            CheckKind::Email => "Please enter a valid email".to_string(),
            CheckKind::MinLength(min) => format!("Must be at least {min} characters"),
            CheckKind::MaxLength(max) => format!("Must be less than {max} characters"),
            CheckKind::NumberRange { min, max } => format!("Must be between {min} and {max}"),
            CheckKind::Pattern(_) => "Invalid format".to_string(),
            CheckKind::MatchesField(_) => "Values do not match".to_string(),
            CheckKind::Custom(_) => String::new(),
        }
    }

    /// Run the check against an already normalized value
    pub fn evaluate(&self, value: &str, all: &FormValues) -> String {
        let passes = match &self.kind {
            CheckKind::Required => !value.trim().is_empty(),
            CheckKind::Email => {
                let trimmed = value.trim();
                trimmed.is_empty() || EMAIL_SHAPE.is_match(trimmed)
            }
            CheckKind::MinLength(min) => value.is_empty() || value.chars().count() >= *min,
            CheckKind::MaxLength(max) => value.is_empty() || value.chars().count() <= *max,
            CheckKind::NumberRange { min, max } => {
                value.is_empty()
                    || value
                        .trim()
                        .parse::<f64>()
                        .is_ok_and(|n| !n.is_nan() && n >= *min && n <= *max)
            }
            CheckKind::Pattern(re) => value.is_empty() || re.is_match(value),
            CheckKind::MatchesField(other) => {
                let other_value = all.get(other).map(|v| v.normalized()).unwrap_or_default();
                value == other_value
            }
            CheckKind::Custom(f) => {
                let result = f(value, all);
                return match (&self.message, result.is_empty()) {
                    (Some(message), false) => message.clone(),
                    _ => result,
                };
            }
        };

        if passes {
            String::new()
        } else {
            self.message()
        }
    }
}
