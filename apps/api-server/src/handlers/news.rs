//! News article handlers.

use actix_web::{HttpResponse, web};

use news_core::DomainError;
use news_core::domain::{ArticleId, ArticlePatch, ArticleQuery, NewArticle};
use news_shared::dto::{
    ArticleResponse, CreateArticleRequest, DeleteResponse, ListNewsParams, UpdateArticleRequest,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Header carrying the number of articles matching a list query.
pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

/// Parse an article id taken from the path. Malformed ids are reported as
/// missing articles, the same as well-formed ids that match nothing.
pub(super) fn parse_article_id(raw: &str) -> Result<ArticleId, AppError> {
    ArticleId::parse_str(raw).map_err(|_| DomainError::not_found("News", raw).into())
}

/// GET /news
pub async fn list_news(
    state: web::Data<AppState>,
    params: web::Query<ListNewsParams>,
) -> AppResult<HttpResponse> {
    let query = ArticleQuery::from(params.into_inner());
    let page = state.articles.list(&query).await?;

    let items: Vec<ArticleResponse> = page.items.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok()
        .insert_header((TOTAL_COUNT_HEADER, page.total.to_string()))
        .json(items))
}

/// GET /news/{id}
pub async fn get_news(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_article_id(&path)?;
    let article = state.articles.get(id).await?;

    Ok(HttpResponse::Ok().json(ArticleResponse::from(article)))
}

/// POST /news
pub async fn create_news(
    state: web::Data<AppState>,
    body: web::Json<CreateArticleRequest>,
) -> AppResult<HttpResponse> {
    let article = state
        .articles
        .create(NewArticle::from(body.into_inner()))
        .await?;

    Ok(HttpResponse::Created().json(ArticleResponse::from(article)))
}

/// PATCH /news/{id}
pub async fn update_news(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateArticleRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_article_id(&path)?;
    let article = state
        .articles
        .update(id, ArticlePatch::from(body.into_inner()))
        .await?;

    Ok(HttpResponse::Ok().json(ArticleResponse::from(article)))
}

/// DELETE /news/{id}
pub async fn delete_news(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_article_id(&path)?;
    state.articles.delete(id).await?;

    Ok(HttpResponse::Ok().json(DeleteResponse {
        success: true,
        message: "News deleted successfully".to_string(),
    }))
}
