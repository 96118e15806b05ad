use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use news_core::domain::{Article, ArticleId, ArticlePage, ArticlePatch, ArticleQuery};
use news_core::error::RepoError;
use news_core::ports::ArticleRepository;

/// Article documents held in a map behind an async `RwLock`.
///
/// Each call takes the lock once, so a conditional update checks and writes
/// the revision atomically.
#[derive(Default)]
pub struct InMemoryArticleRepository {
    store: RwLock<HashMap<ArticleId, Article>>,
}

impl InMemoryArticleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn insert(&self, article: Article) -> Result<Article, RepoError> {
        let mut store = self.store.write().await;
        if store.contains_key(&article.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        store.insert(article.id, article.clone());
        Ok(article)
    }

    async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn list(&self, query: &ArticleQuery) -> Result<ArticlePage, RepoError> {
        let store = self.store.read().await;

        let mut matching: Vec<&Article> = store.values().filter(|a| query.matches(a)).collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        let total = matching.len() as u64;
        let items = match query.window() {
            None => matching.into_iter().cloned().collect(),
            Some((offset, limit)) => matching
                .into_iter()
                .skip(usize::try_from(offset).unwrap_or(usize::MAX))
                .take(usize::try_from(limit).unwrap_or(usize::MAX))
                .cloned()
                .collect(),
        };

        Ok(ArticlePage { items, total })
    }

    async fn update(
        &self,
        id: ArticleId,
        patch: ArticlePatch,
    ) -> Result<Option<Article>, RepoError> {
        let mut store = self.store.write().await;

        let Some(article) = store.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(expected) = patch.revision {
            if expected != article.revision {
                return Err(RepoError::Conflict {
                    expected,
                    actual: article.revision,
                });
            }
        }

        article.apply_patch(patch);
        Ok(Some(article.clone()))
    }

    async fn delete(&self, id: ArticleId) -> Result<bool, RepoError> {
        Ok(self.store.write().await.remove(&id).is_some())
    }
}
