//! Comment handlers. Both return the whole updated article.

use actix_web::{HttpResponse, web};

use news_core::DomainError;
use news_core::domain::{CommentId, NewComment};
use news_shared::dto::{AddCommentRequest, ArticleResponse};

use super::news::parse_article_id;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /news/{id}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<AddCommentRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_article_id(&path)?;
    let article = state
        .articles
        .add_comment(id, NewComment::from(body.into_inner()))
        .await?;

    Ok(HttpResponse::Created().json(ArticleResponse::from(article)))
}

/// DELETE /news/{id}/comments/{comment_id}
pub async fn remove_comment(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (raw_id, raw_comment_id) = path.into_inner();
    let id = parse_article_id(&raw_id)?;
    let comment_id: CommentId = raw_comment_id
        .parse()
        .map_err(|_| AppError::from(DomainError::not_found("Comment", &raw_comment_id)))?;

    let article = state.articles.remove_comment(id, comment_id).await?;

    Ok(HttpResponse::Ok().json(ArticleResponse::from(article)))
}
