//! User handlers. Users are read-only over HTTP.

use actix_web::{HttpResponse, web};

use news_core::DomainError;
use news_core::domain::UserId;
use news_shared::dto::UserResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /users
pub async fn list_users(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users: Vec<UserResponse> = state
        .users
        .list()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(HttpResponse::Ok().json(users))
}

/// GET /users/{id}
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let raw = path.into_inner();
    // A non-numeric id can never match a user.
    let id: UserId = raw
        .parse()
        .map_err(|_| AppError::from(DomainError::not_found("User", &raw)))?;

    let user = state.users.get(id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}
