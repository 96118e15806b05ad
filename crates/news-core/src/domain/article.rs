use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Comment, CommentId, UserId};
use crate::error::DomainError;

/// Articles are keyed by an opaque, store-generated identifier.
pub type ArticleId = Uuid;

/// Page size used when a caller asks for a page without a limit.
pub const DEFAULT_PAGE_LIMIT: u64 = 10;

/// Upper bound on a single page.
pub const MAX_PAGE_LIMIT: u64 = 100;

/// News article with its embedded comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub body: String,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub comments: Vec<Comment>,
    /// Incremented on every write; used for conditional updates.
    pub revision: i64,
}

impl Article {
    /// Validate a draft and build a fresh article with no comments.
    pub fn create(draft: NewArticle, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let (title, body, author_id) = draft.validate()?;

        Ok(Self {
            id: Uuid::new_v4(),
            title,
            body,
            author_id,
            created_at: now,
            comments: Vec::new(),
            revision: 0,
        })
    }

    /// Merge the supplied fields and advance the revision.
    ///
    /// Callers are responsible for checking `patch.revision` first.
    pub fn apply_patch(&mut self, patch: ArticlePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(body) = patch.body {
            self.body = body;
        }
        if let Some(author_id) = patch.author_id {
            self.author_id = author_id;
        }
        if let Some(comments) = patch.comments {
            self.comments = comments;
        }
        self.revision += 1;
    }
}

/// Input for creating an article. Every field is required.
#[derive(Debug, Clone, Default)]
pub struct NewArticle {
    pub title: Option<String>,
    pub body: Option<String>,
    pub author_id: Option<UserId>,
}

impl NewArticle {
    fn validate(self) -> Result<(String, String, UserId), DomainError> {
        let title = self.title.filter(|t| !t.trim().is_empty());
        let body = self.body.filter(|b| !b.trim().is_empty());

        match (title, body, self.author_id) {
            (Some(title), Some(body), Some(author_id)) => Ok((title, body, author_id)),
            (title, body, author_id) => {
                let missing: Vec<&str> = [
                    ("title", title.is_none()),
                    ("body", body.is_none()),
                    ("author_id", author_id.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();

                Err(DomainError::Validation(format!(
                    "Missing required fields: {}",
                    missing.join(", ")
                )))
            }
        }
    }
}

/// Partial update of an article. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticlePatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub author_id: Option<UserId>,
    /// Replaces the whole comment sequence.
    pub comments: Option<Vec<Comment>>,
    /// When set, the write only happens if the stored revision still matches.
    pub revision: Option<i64>,
}

impl ArticlePatch {
    /// A patch that writes back a full comment sequence read at `revision`.
    pub fn comments_at(comments: Vec<Comment>, revision: i64) -> Self {
        Self {
            comments: Some(comments),
            revision: Some(revision),
            ..Self::default()
        }
    }

    /// Supplied text fields must not be blank, and supplied comment ids
    /// must be positive with room left for a successor.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(DomainError::Validation(
                "Title cannot be empty".to_string(),
            ));
        }
        if self.body.as_deref().is_some_and(|b| b.trim().is_empty()) {
            return Err(DomainError::Validation(
                "Content cannot be empty".to_string(),
            ));
        }
        if let Some(comments) = &self.comments {
            if comments.iter().any(|c| c.text.trim().is_empty()) {
                return Err(DomainError::Validation(
                    "Comment cannot be empty".to_string(),
                ));
            }
            if let Some(bad) = comments
                .iter()
                .find(|c| c.id < 1 || c.id == CommentId::MAX)
            {
                return Err(DomainError::Validation(format!(
                    "Comment id {} is out of range",
                    bad.id
                )));
            }
        }
        Ok(())
    }

    /// User ids this patch would make the article reference.
    pub fn referenced_users(&self) -> Vec<UserId> {
        let mut ids: Vec<UserId> = self.author_id.into_iter().collect();
        if let Some(comments) = &self.comments {
            ids.extend(comments.iter().map(|c| c.user_id));
        }
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

/// Listing parameters: optional page window and search term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleQuery {
    /// 1-based page number.
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Case-insensitive substring matched against title and body.
    pub search: Option<String>,
}

impl ArticleQuery {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.page == Some(0) {
            return Err(DomainError::Validation(
                "page must be at least 1".to_string(),
            ));
        }
        if let Some(limit) = self.limit {
            if limit == 0 || limit > MAX_PAGE_LIMIT {
                return Err(DomainError::Validation(format!(
                    "limit must be between 1 and {MAX_PAGE_LIMIT}"
                )));
            }
        }
        // Offsets are signed 64-bit in the store.
        if self.window().is_some() {
            let limit = self.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
            let page = self.page.unwrap_or(1);
            let in_range = (page - 1)
                .checked_mul(limit)
                .is_some_and(|offset| i64::try_from(offset).is_ok());
            if !in_range {
                return Err(DomainError::Validation(
                    "page is out of range".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// `(offset, limit)` of the requested page, or `None` for the full list.
    pub fn window(&self) -> Option<(u64, u64)> {
        if self.page.is_none() && self.limit.is_none() {
            return None;
        }
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        let page = self.page.unwrap_or(1).max(1);
        Some(((page - 1).saturating_mul(limit), limit))
    }

    /// Trimmed, non-empty search term.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn matches(&self, article: &Article) -> bool {
        match self.search_term() {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                article.title.to_lowercase().contains(&term)
                    || article.body.to_lowercase().contains(&term)
            }
        }
    }
}

/// One page of a listing plus the number of matching articles overall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticlePage {
    pub items: Vec<Article>,
    pub total: u64,
}
