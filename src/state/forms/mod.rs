//! Form domain layer
//!
//! Session state for a single form: values, errors, touched flags and the
//! submitting flag, plus the operations a consumer calls on user actions.

mod field;
mod form_state;
mod shared;

pub use field::{FieldKind, FieldValue, FormErrors, FormField, FormValues, TouchedMap};
pub use form_state::{FormSnapshot, FormState, SubmitOutcome};
pub use shared::SharedForm;
