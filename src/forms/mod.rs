//! Concrete form definitions

pub mod user_form;

pub use user_form::FormMode;
