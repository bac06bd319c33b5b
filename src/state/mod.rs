//! Form session state module

mod forms;

pub use forms::*;
