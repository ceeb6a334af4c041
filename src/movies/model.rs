//! Movie records as stored and as served, plus the row transformation between them.

use crate::db::{Row, SqlValue};
use crate::error::TransformError;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Number;

/// A column that may be missing from the projection (`None`) or NULL in storage (`Some(None)`).
pub type Nullable<T> = Option<Option<T>>;

/// `{id, name}` pair stored inside the JSON-encoded genre and company columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntry {
    pub id: i64,
    pub name: String,
}

/// Served form of a JSON-encoded list column.
///
/// An empty stored string stays an empty string and is not turned into an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListField {
    Null,
    Empty,
    Items(Vec<NamedEntry>),
}

impl ListField {
    fn parse(field: &'static str, raw: Option<String>) -> Result<Self, TransformError> {
        match raw {
            None => Ok(ListField::Null),
            Some(text) if text.is_empty() => Ok(ListField::Empty),
            Some(text) => serde_json::from_str(&text)
                .map(ListField::Items)
                .map_err(|source| TransformError::Json { field, source }),
        }
    }
}

impl Serialize for ListField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ListField::Null => serializer.serialize_none(),
            ListField::Empty => serializer.serialize_str(""),
            ListField::Items(items) => items.serialize(serializer),
        }
    }
}

/// A movie row as stored. Only the projected columns are populated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieRecord {
    pub movie_id: Nullable<i64>,
    pub imdb_id: Nullable<String>,
    pub title: Nullable<String>,
    pub overview: Nullable<String>,
    pub production_companies: Nullable<String>,
    pub release_date: Nullable<String>,
    pub budget: Nullable<String>,
    pub revenue: Nullable<Number>,
    pub runtime: Nullable<Number>,
    pub language: Nullable<String>,
    pub genres: Nullable<String>,
    pub status: Nullable<String>,
    /// Present only for the rating aggregation join.
    pub avg_rating: Option<f64>,
    pub rating_count: Option<i64>,
}

impl TryFrom<Row> for MovieRecord {
    type Error = TransformError;

    fn try_from(mut row: Row) -> Result<Self, Self::Error> {
        Ok(Self {
            movie_id: column(&mut row, "movieId", "an integer", as_integer)?,
            imdb_id: column(&mut row, "imdbId", "text", as_text)?,
            title: column(&mut row, "title", "text", as_text)?,
            overview: column(&mut row, "overview", "text", as_text)?,
            production_companies: column(&mut row, "productionCompanies", "text", as_text)?,
            release_date: column(&mut row, "releaseDate", "text", as_text)?,
            budget: column(&mut row, "budget", "text", as_text)?,
            revenue: column(&mut row, "revenue", "a number", as_number)?,
            runtime: column(&mut row, "runtime", "a number", as_number)?,
            language: column(&mut row, "language", "text", as_text)?,
            genres: column(&mut row, "genres", "text", as_text)?,
            status: column(&mut row, "status", "text", as_text)?,
            avg_rating: column(&mut row, "avgRating", "a number", as_real)?.flatten(),
            rating_count: column(&mut row, "ratingCount", "an integer", as_integer)?.flatten(),
        })
    }
}

fn column<T>(
    row: &mut Row,
    name: &'static str,
    expected: &'static str,
    decode: fn(SqlValue) -> Option<T>,
) -> Result<Nullable<T>, TransformError> {
    match row.shift_remove(name) {
        None => Ok(None),
        Some(SqlValue::Null) => Ok(Some(None)),
        Some(value) => decode(value).map(|v| Some(Some(v))).ok_or(
            TransformError::UnexpectedType {
                column: name,
                expected,
            },
        ),
    }
}

fn as_integer(value: SqlValue) -> Option<i64> {
    match value {
        SqlValue::Integer(v) => Some(v),
        _ => None,
    }
}

fn as_real(value: SqlValue) -> Option<f64> {
    match value {
        SqlValue::Integer(v) => Some(v as f64),
        SqlValue::Real(v) => Some(v),
        _ => None,
    }
}

fn as_number(value: SqlValue) -> Option<Number> {
    match value {
        SqlValue::Integer(v) => Some(Number::from(v)),
        SqlValue::Real(v) => Number::from_f64(v),
        _ => None,
    }
}

// Numeric text columns (budget) are sometimes stored with numeric affinity.
fn as_text(value: SqlValue) -> Option<String> {
    match value {
        SqlValue::Text(v) => Some(v),
        SqlValue::Integer(v) => Some(v.to_string()),
        SqlValue::Real(v) => Some(v.to_string()),
        SqlValue::Null => None,
    }
}

/// A movie as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_id: Nullable<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_id: Nullable<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Nullable<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Nullable<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_companies: Option<ListField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Nullable<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Nullable<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Nullable<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Nullable<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Nullable<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<ListField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Nullable<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<i64>,
}

/// Turn a stored record into its served form.
///
/// Meant to run exactly once per stored row. Malformed JSON in a list column is
/// returned as an error, never replaced by a default.
pub fn transform(record: MovieRecord) -> Result<Movie, TransformError> {
    let genres = record
        .genres
        .map(|raw| ListField::parse("genres", raw))
        .transpose()?;
    let production_companies = record
        .production_companies
        .map(|raw| ListField::parse("productionCompanies", raw))
        .transpose()?;

    Ok(Movie {
        movie_id: record.movie_id,
        imdb_id: record.imdb_id,
        title: record.title,
        overview: record.overview,
        production_companies,
        release_date: record.release_date,
        budget: record.budget.map(|budget| budget.map(display_budget)),
        revenue: record.revenue,
        runtime: record.runtime,
        language: record.language,
        genres,
        status: record.status,
        avg_rating: record.avg_rating.map(round_rating),
        rating_count: record.rating_count,
    })
}

/// Decode and transform a raw row in one step.
pub fn movie_from_row(row: Row) -> Result<Movie, TransformError> {
    transform(MovieRecord::try_from(row)?)
}

fn display_budget(raw: String) -> String {
    if raw.is_empty() {
        raw
    } else {
        format!("${raw}")
    }
}

fn round_rating(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
