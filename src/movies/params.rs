//! Typed request parameters and the syntactic checks that run before any query.

use crate::error::ValidationError;
use std::fmt;
use std::str::FromStr;

/// Release-date ordering for the year listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    /// Parse an optional `sort` query value; absent or empty means ascending.
    pub fn from_query(raw: Option<&str>) -> Result<Self, ValidationError> {
        match raw {
            None => Ok(SortOrder::Asc),
            Some(v) => v.parse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(ValidationError::InvalidSort(s.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        })
    }
}

/// A calendar year usable as a release-date prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Year(u16);

impl Year {
    pub fn get(self) -> u16 {
        self.0
    }

    /// The four-digit `LIKE` prefix matching every date in this year.
    pub fn like_prefix(self) -> String {
        format!("{:04}%", self.0)
    }
}

impl FromStr for Year {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u16>()
            .ok()
            .filter(|year| *year <= 9999)
            .map(Year)
            .ok_or_else(|| ValidationError::InvalidYear(s.to_string()))
    }
}

impl TryFrom<i64> for Year {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .ok()
            .filter(|year| *year <= 9999)
            .map(Year)
            .ok_or_else(|| ValidationError::InvalidYear(value.to_string()))
    }
}

/// Parse a movie identifier from a path segment.
pub fn parse_movie_id(raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::InvalidMovieId(raw.to_string()))
}

/// A genre search term, used verbatim. Only the empty string is rejected.
pub fn parse_genre(raw: &str) -> Result<String, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::InvalidGenre);
    }
    Ok(raw.to_string())
}

/// Page number and size. Arithmetic is performed as given; nothing is clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Resolve raw `page`/`limit` query values. Missing, non-integer or zero values
    /// fall back to page 1 and `default_limit`; anything else passes through.
    pub fn from_query(page: Option<&str>, limit: Option<&str>, default_limit: i64) -> Self {
        Self {
            page: non_zero_int(page).unwrap_or(1),
            limit: non_zero_int(limit).unwrap_or(default_limit),
        }
    }

    /// `(page - 1) * limit`. A page below 1 yields a negative offset.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

fn non_zero_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v != 0)
}
