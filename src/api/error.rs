// Maps query-layer failures onto HTTP responses

use crate::api::models::ApiResponse;
use crate::error::{FetchError, Operation, ValidationError};
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{message}")]
    Fetch {
        message: &'static str,
        #[source]
        source: FetchError,
    },
}

impl From<FetchError> for ApiError {
    fn from(source: FetchError) -> Self {
        ApiError::Fetch {
            message: public_message(source.operation),
            source,
        }
    }
}

fn public_message(op: Operation) -> &'static str {
    match op {
        Operation::GetById => "Failed to fetch movie",
        other => other.failure_message(),
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Fetch { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiResponse::<()>::error(self.to_string()))
    }
}
