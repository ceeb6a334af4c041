// API route configuration

use crate::api::handlers;
use crate::api::models::ApiResponse;
use actix_web::{error::InternalError, web, HttpResponse};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        tracing::debug!(error = %err, "rejected query string");
        let response =
            HttpResponse::BadRequest().json(ApiResponse::<()>::error("Invalid query string"));
        InternalError::from_response(err, response).into()
    }))
    .route("/api/health", web::get().to(handlers::health_check))
    .service(
        web::scope("/api/v1/movies")
            .route("", web::get().to(handlers::list_movies))
            .route("/", web::get().to(handlers::list_movies))
            .route(
                "/year/{year}",
                web::get().to(handlers::list_movies_by_year),
            )
            .route(
                "/genre/{genre}",
                web::get().to(handlers::list_movies_by_genre),
            )
            .route("/{id}", web::get().to(handlers::get_movie)),
    );
}
