// Additional middleware for logging, CORS, etc.

use actix_web::middleware::{Compress, Logger};

pub fn setup_middleware() -> (Logger, Compress) {
    let logger = Logger::default();
    let compress = Compress::default();
    (logger, compress)
}

// CORS configuration
use actix_cors::Cors;
use actix_web::http::header;

/// Read-only CORS policy. `None` (or a `*` entry) allows any origin.
pub fn setup_cors(allowed_origins: Option<&str>) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600);

    let Some(allowed_origins) = allowed_origins else {
        return cors.allow_any_origin();
    };

    let origins: Vec<&str> = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .collect();

    if origins.is_empty() || origins.contains(&"*") {
        return cors.allow_any_origin();
    }

    origins
        .into_iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
