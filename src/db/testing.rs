//! In-memory [`Database`] used by unit tests: returns canned rows and records every statement.

use super::{Database, Row, SqlParam, SqlValue};
use crate::error::QueryError;
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Default)]
pub(crate) struct RecordingDatabase {
    rows: Vec<Row>,
    fail: bool,
    calls: Mutex<Vec<(String, Vec<SqlParam>)>>,
}

impl RecordingDatabase {
    pub(crate) fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<(String, Vec<SqlParam>)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, sql: &str, params: &[SqlParam]) -> Result<(), QueryError> {
        self.calls
            .lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec()));
        if self.fail {
            return Err(QueryError::from(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl Database for RecordingDatabase {
    async fn query_many(&self, sql: &str, params: &[SqlParam]) -> Result<Vec<Row>, QueryError> {
        self.record(sql, params)?;
        Ok(self.rows.clone())
    }

    async fn query_one(
        &self,
        sql: &str,
        params: &[SqlParam],
    ) -> Result<Option<Row>, QueryError> {
        self.record(sql, params)?;
        Ok(self.rows.first().cloned())
    }
}

/// Build a row from `(column, value)` pairs.
pub(crate) fn row<const N: usize>(columns: [(&str, SqlValue); N]) -> Row {
    columns
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

pub(crate) fn text(v: &str) -> SqlValue {
    SqlValue::Text(v.to_string())
}

/// A complete stored movie row with well-formed JSON columns.
pub(crate) fn full_movie_row() -> Row {
    row([
        ("movieId", SqlValue::Integer(1)),
        ("imdbId", text("tt1")),
        ("title", text("Title")),
        ("overview", text("")),
        (
            "productionCompanies",
            text(r#"[{"id": 1, "name": "Production1"}, {"id": 2, "name": "Production2"}]"#),
        ),
        ("releaseDate", text("2024-10-12")),
        ("budget", text("12345")),
        ("revenue", SqlValue::Integer(0)),
        ("runtime", SqlValue::Integer(0)),
        ("language", SqlValue::Null),
        (
            "genres",
            text(r#"[{"id": 1, "name": "Genre1"}, {"id": 2, "name": "Genre2"}]"#),
        ),
        ("status", text("released")),
    ])
}
