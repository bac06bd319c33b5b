//! In-memory user store used as the submit target
//!
//! Stands in for the persistence layer a real consumer would call, with an
//! optional simulated latency and a switch that makes every call fail.

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;

use super::traits::SubmitHandler;
use crate::state::FormValues;

/// A user record as stored after a successful submission
#[derive(Debug, Clone, Serialize)]
pub struct StoredUser {
    pub id: Uuid,
    pub values: FormValues,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stores submitted users in memory
#[derive(Debug, Default)]
pub struct UserStore {
    users: Mutex<Vec<StoredUser>>,
    /// When set, submissions update this user instead of creating one
    target: Option<Uuid>,
    delay: Duration,
    fail: bool,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate persistence latency on every submission
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Make every submission fail
    pub fn with_failures(mut self, fail: bool) -> Self {
        self.fail = fail;
        self
    }

    /// Insert an existing user and direct later submissions at it
    pub fn editing(mut self, values: FormValues) -> Self {
        let now = Utc::now();
        let user = StoredUser {
            id: Uuid::new_v4(),
            values,
            created_at: now,
            updated_at: now,
        };
        self.target = Some(user.id);
        self.users
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(user);
        self
    }

    pub fn target(&self) -> Option<Uuid> {
        self.target
    }

    /// Copy of all stored users
    pub fn users(&self) -> Vec<StoredUser> {
        self.users
            .lock()
            .map(|users| users.clone())
            .unwrap_or_default()
    }

    /// The most recently created or updated user
    pub fn latest(&self) -> Option<StoredUser> {
        self.users()
            .into_iter()
            .max_by_key(|user| user.updated_at)
    }
}

#[async_trait]
impl SubmitHandler for UserStore {
    async fn submit(&self, values: FormValues) -> Result<()> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            bail!("User store rejected the submission");
        }

        let now = Utc::now();
        let mut users = self
            .users
            .lock()
            .map_err(|_| anyhow!("User store lock poisoned"))?;

        match self.target {
            Some(id) => {
                let user = users
                    .iter_mut()
                    .find(|user| user.id == id)
                    .ok_or_else(|| anyhow!("User {id} not found"))?;
                user.values = values;
                user.updated_at = now;
                tracing::info!("Updated user {id}");
            }
            None => {
                let id = Uuid::new_v4();
                users.push(StoredUser {
                    id,
                    values,
                    created_at: now,
                    updated_at: now,
                });
                tracing::info!("Created user {id}");
            }
        }
        Ok(())
    }
}
