//! formstate - form state and validation engine
//!
//! Tracks the values, per-field errors, touched flags and submission state
//! of a single form session, with validation rules composed from ordered
//! checks.
//!
//! # Example
//!
//! ```ignore
//! use formstate::state::{FieldValue, FormState};
//! use formstate::validation::{common, compose};
//!
//! let initial = [("email".to_string(), FieldValue::text(""))].into_iter().collect();
//! let mut form = FormState::new(initial, compose([("email", common::email())]));
//!
//! form.change_field("email", "bad")?;
//! assert_eq!(form.blur_field("email")?, "Please enter a valid email address");
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod forms;
pub mod state;
pub mod submit;
pub mod validation;

pub use error::FormError;
pub use state::{FieldValue, FormState, FormValues, SharedForm, SubmitOutcome};
pub use submit::SubmitHandler;
