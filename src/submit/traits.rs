//! Trait abstraction for submit callbacks to enable mocking in tests

use anyhow::Result;
use async_trait::async_trait;
use std::future::Future;

use crate::state::FormValues;

/// Receives the form values once the whole form has validated
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    /// Persist or otherwise act on a snapshot of the values
    async fn submit(&self, values: FormValues) -> Result<()>;
}

#[async_trait]
impl<F, Fut> SubmitHandler for F
where
    F: Fn(FormValues) -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    async fn submit(&self, values: FormValues) -> Result<()> {
        (self)(values).await
    }
}
