//! Domain entities - the core business objects.

mod article;
mod comment;
mod user;

pub use article::{
    Article, ArticleId, ArticlePage, ArticlePatch, ArticleQuery, DEFAULT_PAGE_LIMIT,
    MAX_PAGE_LIMIT, NewArticle,
};
pub use comment::{Comment, CommentId, NewComment, append_comment, next_comment_id, remove_comment};
pub use user::{User, UserId, sample_users};
