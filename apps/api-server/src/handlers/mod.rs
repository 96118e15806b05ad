//! HTTP handlers and route configuration.

mod comments;
mod fallback;
mod health;
mod news;
mod users;


use actix_web::web;

use crate::middleware::error::{json_error_handler, query_error_handler};

pub use fallback::route_not_found;

/// Configure all application routes.
///
/// A known path hit with an unsupported method falls through to the
/// same 404 as an unknown path.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(
            web::resource("/")
                .route(web::get().to(health::health_check))
                .default_service(web::to(route_not_found)),
        )
        // Users
        .service(
            web::resource("/users")
                .route(web::get().to(users::list_users))
                .default_service(web::to(route_not_found)),
        )
        .service(
            web::resource("/users/{id}")
                .route(web::get().to(users::get_user))
                .default_service(web::to(route_not_found)),
        )
        // News
        .service(
            web::resource("/news")
                .route(web::get().to(news::list_news))
                .route(web::post().to(news::create_news))
                .default_service(web::to(route_not_found)),
        )
        .service(
            web::resource("/news/{id}")
                .route(web::get().to(news::get_news))
                .route(web::patch().to(news::update_news))
                .route(web::delete().to(news::delete_news))
                .default_service(web::to(route_not_found)),
        )
        // Comments
        .service(
            web::resource("/news/{id}/comments")
                .route(web::post().to(comments::add_comment))
                .default_service(web::to(route_not_found)),
        )
        .service(
            web::resource("/news/{id}/comments/{comment_id}")
                .route(web::delete().to(comments::remove_comment))
                .default_service(web::to(route_not_found)),
        )
        .default_service(web::to(route_not_found));
}
