//! Composing per-field checks into validation rules

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::check::Check;
use crate::state::{FieldValue, FormValues};

/// Composed rules keyed by field name
pub type ValidationRules = BTreeMap<String, ValidationRule>;

type RuleFn = Arc<dyn Fn(&FieldValue, &FormValues) -> String + Send + Sync>;

/// A field's validation function: `(current value, all values) -> message`.
///
/// An empty message means the value is valid.
#[derive(Clone)]
pub struct ValidationRule {
    rule: RuleFn,
}

impl ValidationRule {
    /// Wrap a hand-written rule
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&FieldValue, &FormValues) -> String + Send + Sync + 'static,
    {
        Self { rule: Arc::new(f) }
    }

    /// Build a rule that normalizes the value, then reports the first
    /// failing check in list order.
    pub fn from_checks(checks: Vec<Check>) -> Self {
        Self::from_fn(move |value, all| {
            let normalized = value.normalized();
            checks
                .iter()
                .map(|check| check.evaluate(&normalized, all))
                .find(|message| !message.is_empty())
                .unwrap_or_default()
        })
    }

    pub fn validate(&self, value: &FieldValue, all: &FormValues) -> String {
        (self.rule)(value, all)
    }
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule").finish_non_exhaustive()
    }
}

/// Turn a mapping of field name to ordered checks into one rule per field
pub fn compose<I, K>(spec: I) -> ValidationRules
where
    I: IntoIterator<Item = (K, Vec<Check>)>,
    K: Into<String>,
{
    spec.into_iter()
        .map(|(name, checks)| (name.into(), ValidationRule::from_checks(checks)))
        .collect()
}

/// Builder for a rule set, one field at a time
///
/// ```ignore
/// let rules = RuleSpec::new()
///     .field("name", common::name())
///     .field("email", common::email())
///     .compose();
/// ```
#[derive(Debug, Default)]
pub struct RuleSpec {
    fields: Vec<(String, Vec<Check>)>,
}

impl RuleSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the checks for a field, in priority order
    pub fn field(mut self, name: impl Into<String>, checks: Vec<Check>) -> Self {
        self.fields.push((name.into(), checks));
        self
    }

    pub fn compose(self) -> ValidationRules {
        compose(self.fields)
    }
}
