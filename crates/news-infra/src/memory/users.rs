use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use news_core::domain::{User, UserId};
use news_core::error::RepoError;
use news_core::ports::UserRepository;

/// Users keyed by id; a `BTreeMap` keeps listings ordered.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<BTreeMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.store.read().await.values().cloned().collect())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.store.read().await.len() as u64)
    }

    async fn insert_many(&self, users: Vec<User>) -> Result<(), RepoError> {
        let mut store = self.store.write().await;

        if let Some(dup) = users.iter().find(|u| store.contains_key(&u.id)) {
            return Err(RepoError::Constraint(format!(
                "user {} already exists",
                dup.id
            )));
        }

        for user in users {
            store.insert(user.id, user);
        }
        Ok(())
    }
}
