//! Submission handlers

mod store;
mod traits;

pub use store::{StoredUser, UserStore};
pub use traits::SubmitHandler;

#[cfg(test)]
pub use traits::MockSubmitHandler;
