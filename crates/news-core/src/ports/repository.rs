use async_trait::async_trait;

use crate::domain::{Article, ArticleId, ArticlePage, ArticlePatch, ArticleQuery, User, UserId};
use crate::error::RepoError;

/// Read access to the seeded user profiles.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError>;

    /// All users ordered by id.
    async fn list(&self) -> Result<Vec<User>, RepoError>;

    async fn count(&self) -> Result<u64, RepoError>;

    /// Bulk insert, used by the startup seed.
    async fn insert_many(&self, users: Vec<User>) -> Result<(), RepoError>;
}

/// Article documents with their embedded comments.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn insert(&self, article: Article) -> Result<Article, RepoError>;

    async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>, RepoError>;

    /// Matching articles, newest first, windowed by the query.
    async fn list(&self, query: &ArticleQuery) -> Result<ArticlePage, RepoError>;

    /// Merge `patch` into the stored article and advance its revision.
    ///
    /// Returns `Ok(None)` when no article has this id. When `patch.revision`
    /// is set and differs from the stored revision, nothing is written and
    /// `RepoError::Conflict` is returned.
    async fn update(&self, id: ArticleId, patch: ArticlePatch)
    -> Result<Option<Article>, RepoError>;

    /// Returns whether an article was removed.
    async fn delete(&self, id: ArticleId) -> Result<bool, RepoError>;
}
