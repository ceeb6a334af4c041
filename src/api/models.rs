// API request/response models (DTOs)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Standard API response wrapper. `data` and `error` are always present, possibly null.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            data: Some(data),
            error: None,
        }
    }

    /// Successful response carrying no data.
    pub fn empty() -> Self {
        Self {
            status: ResponseStatus::Success,
            data: None,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Raw `?key=value` pairs in request order. Repeated keys are kept; lookups use the first.
pub type QueryPairs = Vec<(String, String)>;

fn first(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
}

/// `?page=&limit=` on the list endpoints. Kept as text so bad values fall back to defaults.
#[derive(Debug, Default, PartialEq)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl From<&[(String, String)]> for PageQuery {
    fn from(pairs: &[(String, String)]) -> Self {
        Self {
            page: first(pairs, "page"),
            limit: first(pairs, "limit"),
        }
    }
}

/// `?sort=&page=&limit=` on the year endpoint.
#[derive(Debug, Default, PartialEq)]
pub struct YearQuery {
    pub sort: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl From<&[(String, String)]> for YearQuery {
    fn from(pairs: &[(String, String)]) -> Self {
        Self {
            sort: first(pairs, "sort"),
            page: first(pairs, "page"),
            limit: first(pairs, "limit"),
        }
    }
}
