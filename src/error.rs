//! Library error types

use thiserror::Error;

/// Errors from addressing a form by field name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The name is not part of the form's initial key set
    #[error("unknown field `{0}`")]
    UnknownField(String),
}
