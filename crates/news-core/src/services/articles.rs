//! Article use cases, including the comment read-modify-write cycle.
//!
//! Comments live inside their article, so adding or removing one means
//! reading the article, computing a new comment sequence and writing the
//! whole sequence back. The write is conditional on the revision that was
//! read; a writer that loses the race re-reads and recomputes instead of
//! overwriting the winner's comment.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{
    Article, ArticleId, ArticlePage, ArticlePatch, ArticleQuery, Comment, CommentId, NewArticle,
    NewComment, UserId, append_comment, remove_comment,
};
use crate::error::{DomainError, RepoError};
use crate::ports::{ArticleRepository, UserRepository};

/// Conditional comment writes retried after the first attempt.
pub const DEFAULT_WRITE_RETRIES: u32 = 5;

#[derive(Clone)]
pub struct ArticleService {
    articles: Arc<dyn ArticleRepository>,
    users: Arc<dyn UserRepository>,
    write_retries: u32,
}

impl ArticleService {
    pub fn new(articles: Arc<dyn ArticleRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self {
            articles,
            users,
            write_retries: DEFAULT_WRITE_RETRIES,
        }
    }

    pub fn with_write_retries(mut self, retries: u32) -> Self {
        self.write_retries = retries;
        self
    }

    pub async fn create(&self, draft: NewArticle) -> Result<Article, DomainError> {
        let article = Article::create(draft, Utc::now())?;
        self.ensure_users_exist(&[article.author_id]).await?;

        let saved = self.articles.insert(article).await?;
        tracing::info!(article_id = %saved.id, author_id = saved.author_id, "Article created");
        Ok(saved)
    }

    pub async fn get(&self, id: ArticleId) -> Result<Article, DomainError> {
        self.articles
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("News", id))
    }

    pub async fn list(&self, query: &ArticleQuery) -> Result<ArticlePage, DomainError> {
        query.validate()?;
        Ok(self.articles.list(query).await?)
    }

    /// Merge the supplied fields. A patch carrying `comments` replaces the
    /// whole sequence; without a `revision` that is a last-writer-wins write.
    pub async fn update(&self, id: ArticleId, patch: ArticlePatch) -> Result<Article, DomainError> {
        patch.validate()?;

        // A missing article outranks a bad reference.
        let referenced = patch.referenced_users();
        if !referenced.is_empty() {
            self.get(id).await?;
            self.ensure_users_exist(&referenced).await?;
        }

        match self.articles.update(id, patch).await {
            Ok(Some(article)) => Ok(article),
            Ok(None) => Err(DomainError::not_found("News", id)),
            Err(RepoError::Conflict { expected, actual }) => Err(DomainError::Conflict(format!(
                "news {id} is at revision {actual}, not {expected}"
            ))),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, id: ArticleId) -> Result<(), DomainError> {
        if !self.articles.delete(id).await? {
            return Err(DomainError::not_found("News", id));
        }
        tracing::info!(article_id = %id, "Article deleted");
        Ok(())
    }

    /// Append a comment with id `max + 1` and return the updated article.
    pub async fn add_comment(
        &self,
        id: ArticleId,
        comment: NewComment,
    ) -> Result<Article, DomainError> {
        let (user_id, text) = comment.validate()?;
        self.ensure_users_exist(&[user_id]).await?;

        self.mutate_comments(id, |comments| {
            append_comment(comments, user_id, text.clone(), Utc::now())
        })
        .await
    }

    /// Drop one comment, keeping the others in order, and return the updated article.
    pub async fn remove_comment(
        &self,
        id: ArticleId,
        comment_id: CommentId,
    ) -> Result<Article, DomainError> {
        self.mutate_comments(id, |comments| {
            remove_comment(comments, comment_id)
                .ok_or_else(|| DomainError::not_found("Comment", comment_id))
        })
        .await
    }

    async fn mutate_comments<F>(&self, id: ArticleId, compute: F) -> Result<Article, DomainError>
    where
        F: Fn(&[Comment]) -> Result<Vec<Comment>, DomainError> + Send + Sync,
    {
        for attempt in 0..=self.write_retries {
            let article = self.get(id).await?;
            let comments = compute(&article.comments)?;
            let patch = ArticlePatch::comments_at(comments, article.revision);

            match self.articles.update(id, patch).await {
                Ok(Some(updated)) => return Ok(updated),
                Ok(None) => return Err(DomainError::not_found("News", id)),
                Err(RepoError::Conflict { expected, actual }) => {
                    tracing::debug!(
                        article_id = %id,
                        attempt,
                        expected,
                        actual,
                        "Comment write lost a race, re-reading"
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::warn!(
            article_id = %id,
            retries = self.write_retries,
            "Giving up on comment write after repeated conflicts"
        );
        Err(DomainError::Conflict(format!(
            "comments on news {id} changed too often, try again"
        )))
    }

    async fn ensure_users_exist(&self, ids: &[UserId]) -> Result<(), DomainError> {
        for &user_id in ids {
            if self.users.find_by_id(user_id).await?.is_none() {
                return Err(DomainError::reference("User", user_id));
            }
        }
        Ok(())
    }
}
