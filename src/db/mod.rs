//! Storage access capability.
//!
//! The service only sees [`Database`]; the SQLite pool is one implementation and
//! tests substitute an in-memory fake.

pub mod sqlite;
#[cfg(test)]
pub(crate) mod testing;

use crate::error::QueryError;
use async_trait::async_trait;
use indexmap::IndexMap;

pub use sqlite::SqliteDatabase;

/// Positional statement parameter. Values are always bound, never interpolated.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(i64),
    Text(String),
}

impl From<i64> for SqlParam {
    fn from(v: i64) -> Self {
        SqlParam::Int(v)
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        SqlParam::Text(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        SqlParam::Text(v.to_string())
    }
}

/// A single column value as read back from the store.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

/// One result row, column name to value, in projection order.
pub type Row = IndexMap<String, SqlValue>;

/// A statement plus its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub fn bind(mut self, param: impl Into<SqlParam>) -> Self {
        self.params.push(param.into());
        self
    }
}

#[async_trait]
pub trait Database: Send + Sync {
    /// Run a statement and return every row it produces.
    async fn query_many(&self, sql: &str, params: &[SqlParam]) -> Result<Vec<Row>, QueryError>;

    /// Run a statement and return its first row, if any.
    async fn query_one(&self, sql: &str, params: &[SqlParam])
        -> Result<Option<Row>, QueryError>;
}
