// HTTP request handlers for API endpoints

use crate::api::error::ApiError;
use crate::api::models::*;
use crate::movies::params::{parse_genre, parse_movie_id};
use crate::movies::{Movie, MovieService, SortOrder, Year};
use actix_web::{web, HttpResponse};

/// Health check endpoint
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "UP".to_string(),
    })
}

/// Page through every movie
pub async fn list_movies(
    service: web::Data<MovieService>,
    query: web::Query<QueryPairs>,
) -> Result<HttpResponse, ApiError> {
    let query = PageQuery::from(query.as_slice());
    let page = service.pagination(query.page.as_deref(), query.limit.as_deref());
    let movies = service.list_all(page).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(movies)))
}

/// Movie details with its rating aggregate
pub async fn get_movie(
    service: web::Data<MovieService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_movie_id(&path)?;

    match service.get_by_id(id).await? {
        Some(movie) => Ok(HttpResponse::Ok().json(ApiResponse::success(movie))),
        None => Ok(HttpResponse::NotFound().json(ApiResponse::<Movie>::empty())),
    }
}

/// Movies released in a given year
pub async fn list_movies_by_year(
    service: web::Data<MovieService>,
    path: web::Path<String>,
    query: web::Query<QueryPairs>,
) -> Result<HttpResponse, ApiError> {
    let query = YearQuery::from(query.as_slice());
    let sort = SortOrder::from_query(query.sort.as_deref())?;
    let year: Year = path.parse()?;
    let page = service.pagination(query.page.as_deref(), query.limit.as_deref());

    tracing::debug!(year = year.get(), %sort, ?page, "movies by year requested");

    let movies = service.list_by_year(year, sort, page).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(movies)))
}

/// Movies whose genres mention the given term
pub async fn list_movies_by_genre(
    service: web::Data<MovieService>,
    path: web::Path<String>,
    query: web::Query<QueryPairs>,
) -> Result<HttpResponse, ApiError> {
    let query = PageQuery::from(query.as_slice());
    let genre = parse_genre(&path)?;
    let page = service.pagination(query.page.as_deref(), query.limit.as_deref());

    let movies = service.list_by_genre(&genre, page).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(movies)))
}

/// Fallback for paths no route matches
pub async fn route_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error("Route Not Found"))
}
