//! Health check endpoint.

use actix_web::{HttpResponse, web};
use news_shared::dto::{EndpointIndex, HealthResponse};

use crate::state::AppState;

/// Health check endpoint - returns server status and the backing store.
///
/// GET /
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let response = HealthResponse {
        message: "News Portal API is running!".to_string(),
        status: "healthy".to_string(),
        database: state.database.to_string(),
        endpoints: EndpointIndex {
            users: "/users".to_string(),
            news: "/news".to_string(),
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    };

    HttpResponse::Ok().json(response)
}
