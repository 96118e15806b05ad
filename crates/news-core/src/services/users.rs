use std::sync::Arc;

use crate::domain::{User, UserId, sample_users};
use crate::error::DomainError;
use crate::ports::UserRepository;

/// Result of the startup seed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Inserted(usize),
    AlreadyPresent(u64),
}

/// User profile lookups and the idempotent startup seed.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.list().await?)
    }

    pub async fn get(&self, id: UserId) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    /// Insert the sample users if, and only if, the collection is empty.
    pub async fn seed(&self) -> Result<SeedOutcome, DomainError> {
        let count = self.users.count().await?;
        if count > 0 {
            tracing::info!(users = count, "Users already exist, skipping seed");
            return Ok(SeedOutcome::AlreadyPresent(count));
        }

        let users = sample_users();
        let inserted = users.len();
        self.users.insert_many(users).await?;
        tracing::info!(users = inserted, "Users seeded");

        Ok(SeedOutcome::Inserted(inserted))
    }
}
