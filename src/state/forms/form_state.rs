//! Form state management
//!
//! [`FormState`] owns one form session: current values, per-field errors,
//! touched flags and the submitting flag. Every mutation goes through one
//! of its operations, and the derived flags are recomputed on each call.

use serde::Serialize;

use super::field::{FieldValue, FormErrors, FormValues, TouchedMap};
use crate::error::FormError;
use crate::submit::SubmitHandler;
use crate::validation::ValidationRules;

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed, the handler was not called
    Invalid,
    /// The handler completed successfully
    Submitted,
    /// The handler failed; the message has already been logged
    Failed(String),
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted)
    }
}

/// Serializable view of the whole session, for debugging output
#[derive(Debug, Clone, Serialize)]
pub struct FormSnapshot {
    pub values: FormValues,
    pub errors: FormErrors,
    pub touched: TouchedMap,
    pub is_valid: bool,
    pub is_dirty: bool,
    pub is_submitting: bool,
}

/// State container for a single form session
#[derive(Debug, Clone)]
pub struct FormState {
    initial_values: FormValues,
    values: FormValues,
    errors: FormErrors,
    touched: TouchedMap,
    is_submitting: bool,
    rules: ValidationRules,
}

impl FormState {
    /// Start a session from initial values and composed rules.
    ///
    /// The key set of `initial_values` is the form's field set for the
    /// whole session.
    pub fn new(initial_values: FormValues, rules: ValidationRules) -> Self {
        Self {
            values: initial_values.clone(),
            initial_values,
            errors: FormErrors::new(),
            touched: TouchedMap::new(),
            is_submitting: false,
            rules,
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn initial_values(&self) -> &FormValues {
        &self.initial_values
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn touched(&self) -> &TouchedMap {
        &self.touched
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Get a single field's current value
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.initial_values.contains_key(name)
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.get(name).copied().unwrap_or(false)
    }

    /// True when no recorded error is non-empty
    pub fn is_valid(&self) -> bool {
        self.errors.values().all(|message| message.is_empty())
    }

    /// True when any value differs from its initial value
    pub fn is_dirty(&self) -> bool {
        self.values
            .iter()
            .any(|(name, value)| self.initial_values.get(name) != Some(value))
    }

    /// The error to display for a field: only once it is touched and
    /// only when non-empty
    pub fn visible_error(&self, name: &str) -> Option<&str> {
        if !self.is_touched(name) {
            return None;
        }
        self.errors
            .get(name)
            .map(String::as_str)
            .filter(|message| !message.is_empty())
    }

    /// Whether a submit trigger should be enabled
    pub fn can_submit(&self) -> bool {
        !self.is_submitting && self.is_valid() && self.is_dirty()
    }

    /// Whether a reset trigger should be enabled
    pub fn can_reset(&self) -> bool {
        !self.is_submitting && self.is_dirty()
    }

    fn ensure_field(&self, name: &str) -> Result<(), FormError> {
        if self.has_field(name) {
            Ok(())
        } else {
            tracing::warn!("Rejected unknown form field `{name}`");
            Err(FormError::UnknownField(name.to_string()))
        }
    }

    /// Record an edit. A recorded error is cleared right away; the field is
    /// only re-validated on blur or submit.
    pub fn change_field(
        &mut self,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), FormError> {
        self.ensure_field(name)?;
        self.values.insert(name.to_string(), value.into());
        if let Some(message) = self.errors.get_mut(name) {
            message.clear();
        }
        Ok(())
    }

    /// Mark a field touched and validate it, returning its error message
    pub fn blur_field(&mut self, name: &str) -> Result<String, FormError> {
        self.ensure_field(name)?;
        self.touched.insert(name.to_string(), true);

        let Some(rule) = self.rules.get(name) else {
            return Ok(String::new());
        };
        let value = self.values.get(name).cloned().unwrap_or_default();
        let message = rule.validate(&value, &self.values);
        tracing::debug!(field = name, error = %message, "Validated field on blur");
        self.errors.insert(name.to_string(), message.clone());
        Ok(message)
    }

    /// Validate every field that has a rule, replacing all recorded errors,
    /// and mark every field touched. Returns true when the form is valid.
    pub fn validate_all(&mut self) -> bool {
        let errors: FormErrors = self
            .rules
            .iter()
            .map(|(name, rule)| {
                let value = self.values.get(name).cloned().unwrap_or_default();
                (name.clone(), rule.validate(&value, &self.values))
            })
            .collect();
        let valid = errors.values().all(|message| message.is_empty());

        self.errors = errors;
        self.touched = self.values.keys().map(|name| (name.clone(), true)).collect();

        tracing::debug!(valid, "Validated form");
        valid
    }

    /// Merge a partial set of values without touching errors or flags.
    ///
    /// Every key is checked before any value is applied.
    pub fn set_values(&mut self, partial: FormValues) -> Result<(), FormError> {
        if let Some(unknown) = partial.keys().find(|name| !self.has_field(name)) {
            tracing::warn!("Rejected unknown form field `{unknown}`");
            return Err(FormError::UnknownField(unknown.clone()));
        }
        self.values.extend(partial);
        Ok(())
    }

    /// Restore the initial values and clear errors, touched flags and the
    /// submitting flag
    pub fn reset(&mut self) {
        self.values = self.initial_values.clone();
        self.errors.clear();
        self.touched.clear();
        self.is_submitting = false;
        tracing::info!("Form reset");
    }

    /// First half of a submission: enter the submitting state and validate.
    ///
    /// Returns the values to hand to the submit handler, or `None` (back to
    /// idle) when validation fails. Every `Some` must be followed by
    /// [`FormState::finish_submit`].
    pub fn begin_submit(&mut self) -> Option<FormValues> {
        self.is_submitting = true;
        if !self.validate_all() {
            self.is_submitting = false;
            tracing::info!("Form submission blocked by validation errors");
            return None;
        }
        tracing::info!("Submitting form");
        Some(self.values.clone())
    }

    /// Second half of a submission: leave the submitting state and report
    /// the handler's result. Failures are logged, never propagated.
    pub fn finish_submit(&mut self, result: anyhow::Result<()>) -> SubmitOutcome {
        self.is_submitting = false;
        match result {
            Ok(()) => {
                tracing::info!("Form submitted");
                SubmitOutcome::Submitted
            }
            Err(err) => {
                tracing::error!("Form submission error: {err:#}");
                SubmitOutcome::Failed(format!("{err:#}"))
            }
        }
    }

    /// Validate, then hand a snapshot of the values to `handler`.
    ///
    /// Not guarded against re-entry; callers disable their submit trigger
    /// while [`FormState::is_submitting`] is true.
    pub async fn submit<H>(&mut self, handler: &H) -> SubmitOutcome
    where
        H: SubmitHandler + ?Sized,
    {
        let Some(values) = self.begin_submit() else {
            return SubmitOutcome::Invalid;
        };
        let result = handler.submit(values).await;
        self.finish_submit(result)
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            values: self.values.clone(),
            errors: self.errors.clone(),
            touched: self.touched.clone(),
            is_valid: self.is_valid(),
            is_dirty: self.is_dirty(),
            is_submitting: self.is_submitting,
        }
    }
}
