use actix_web::{HttpRequest, HttpResponse};
use news_shared::RouteNotFoundResponse;

/// Every route the server answers, as listed in 404 bodies.
pub const AVAILABLE_ROUTES: &[&str] = &[
    "GET /",
    "GET /users",
    "GET /users/:id",
    "GET /news",
    "GET /news/:id",
    "POST /news",
    "PATCH /news/:id",
    "DELETE /news/:id",
    "POST /news/:id/comments",
    "DELETE /news/:id/comments/:commentId",
];

pub async fn route_not_found(req: HttpRequest) -> HttpResponse {
    tracing::debug!(method = %req.method(), path = %req.path(), "No route matched");

    HttpResponse::NotFound().json(RouteNotFoundResponse {
        error: "Not Found".to_string(),
        message: format!("Route {} {} not found", req.method(), req.path()),
        available_routes: AVAILABLE_ROUTES.iter().map(|r| r.to_string()).collect(),
    })
}
