//! Field validation
//!
//! Each field gets one [`ValidationRule`], composed from an ordered list of
//! [`Check`]s. The first check that fails decides the message, so list
//! order is the priority order (`required` before format checks).
//!
//! # Example
//!
//! ```ignore
//! use formstate::validation::{common, compose, Check};
//!
//! let rules = compose([
//!     ("name", common::name()),
//!     ("age", vec![Check::required(), Check::number_range(1.0, 120.0)]),
//! ]);
//! ```

mod check;
pub mod common;
mod rules;

pub use check::{Check, CheckFn, CheckKind};
pub use rules::{compose, RuleSpec, ValidationRule, ValidationRules};
