//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use news_core::domain::{
    Article, ArticlePatch, ArticleQuery, Comment, NewArticle, NewComment, User,
};

/// Public view of a user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// A comment as it appears inside an article, in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDto {
    pub id: i64,
    pub user_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            user_id: comment.user_id,
            text: comment.text,
            created_at: comment.created_at,
        }
    }
}

impl From<CommentDto> for Comment {
    fn from(dto: CommentDto) -> Self {
        Self {
            id: dto.id,
            user_id: dto.user_id,
            text: dto.text,
            created_at: dto.created_at,
        }
    }
}

/// A news article with its comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleResponse {
    pub id: String,
    pub title: String,
    pub body: String,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
    pub comments: Vec<CommentDto>,
    pub revision: i64,
}

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.to_string(),
            title: article.title,
            body: article.body,
            author_id: article.author_id,
            created_at: article.created_at,
            comments: article.comments.into_iter().map(Into::into).collect(),
            revision: article.revision,
        }
    }
}

/// Request to publish an article. Fields are optional on the wire so that
/// a missing field surfaces as a validation error rather than a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateArticleRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<i64>,
}

impl From<CreateArticleRequest> for NewArticle {
    fn from(req: CreateArticleRequest) -> Self {
        Self {
            title: req.title,
            body: req.body,
            author_id: req.author_id,
        }
    }
}

/// Partial update. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateArticleRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<i64>,
    /// Replaces the whole comment sequence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<CommentDto>>,
    /// Makes the write conditional on the article still being at this revision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<i64>,
}

impl From<UpdateArticleRequest> for ArticlePatch {
    fn from(req: UpdateArticleRequest) -> Self {
        Self {
            title: req.title,
            body: req.body,
            author_id: req.author_id,
            comments: req
                .comments
                .map(|comments| comments.into_iter().map(Into::into).collect()),
            revision: req.revision,
        }
    }
}

/// Request to add a comment to an article.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddCommentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl From<AddCommentRequest> for NewComment {
    fn from(req: AddCommentRequest) -> Self {
        Self {
            user_id: req.user_id,
            text: req.text,
        }
    }
}

/// Query string for `GET /news`. The underscore-prefixed spellings used by
/// older clients are accepted as aliases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListNewsParams {
    #[serde(default, alias = "_page", skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(default, alias = "_limit", skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

impl From<ListNewsParams> for ArticleQuery {
    fn from(params: ListNewsParams) -> Self {
        Self {
            page: params.page,
            limit: params.limit,
            search: params.q,
        }
    }
}

/// Body of a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

/// Paths of the collections, advertised by the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointIndex {
    pub users: String,
    pub news: String,
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
    pub status: String,
    pub database: String,
    pub endpoints: EndpointIndex,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}
