use super::{Database, Row, SqlParam, SqlValue};
use crate::config::DatabaseConfig;
use crate::error::QueryError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row as _, SqlitePool, TypeInfo, ValueRef};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Alias under which the ratings dataset is attached to every pooled connection.
pub const RATINGS_ALIAS: &str = "ratings";

/// SQLite-backed [`Database`]: a read-only pool over the movie dataset with the
/// ratings dataset attached.
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    #[instrument(skip(config), fields(movie_db = %config.movie_db_path.display()))]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let connect_options = SqliteConnectOptions::new()
            .filename(&config.movie_db_path)
            .read_only(true);

        // ATTACH cannot take a bound parameter. The path comes from configuration, not requests.
        let attach_sql = attach_statement(&config.ratings_db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(600))
            .after_connect(move |conn, _meta| {
                let attach = attach_sql.clone();
                Box::pin(async move {
                    sqlx::query(&attach).execute(&mut *conn).await?;
                    Ok(())
                })
            })
            .connect_with(connect_options)
            .await
            .with_context(|| {
                format!(
                    "failed to open movie database at {} (ratings at {})",
                    config.movie_db_path.display(),
                    config.ratings_db_path.display()
                )
            })?;

        info!(
            ratings_db = %config.ratings_db_path.display(),
            max_connections = config.max_connections,
            "connected to sqlite"
        );
        Ok(Self { pool })
    }
}

fn attach_statement(path: &Path) -> String {
    let escaped = path.to_string_lossy().replace('\'', "''");
    format!("ATTACH DATABASE '{escaped}' AS {RATINGS_ALIAS}")
}

fn prepare<'q>(
    sql: &'q str,
    params: &[SqlParam],
) -> sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
    params
        .iter()
        .fold(sqlx::query(sql), |query, param| match param {
            SqlParam::Int(v) => query.bind(*v),
            SqlParam::Text(v) => query.bind(v.clone()),
        })
}

/// Decode a row by the runtime storage class of each value, keeping projection order.
fn decode_row(row: &SqliteRow) -> Result<Row, sqlx::Error> {
    let mut out = Row::with_capacity(row.columns().len());
    for column in row.columns() {
        let idx = column.ordinal();
        let raw = row.try_get_raw(idx)?;
        let value = if raw.is_null() {
            SqlValue::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" | "BOOLEAN" => SqlValue::Integer(row.try_get_unchecked(idx)?),
                "REAL" => SqlValue::Real(row.try_get_unchecked(idx)?),
                "BLOB" => {
                    let bytes: Vec<u8> = row.try_get_unchecked(idx)?;
                    SqlValue::Text(String::from_utf8_lossy(&bytes).into_owned())
                }
                _ => SqlValue::Text(row.try_get_unchecked(idx)?),
            }
        };
        out.insert(column.name().to_string(), value);
    }
    Ok(out)
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn query_many(&self, sql: &str, params: &[SqlParam]) -> Result<Vec<Row>, QueryError> {
        debug!(sql, params = params.len(), "query_many");
        let rows = prepare(sql, params).fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| decode_row(row).map_err(QueryError::from))
            .collect()
    }

    async fn query_one(
        &self,
        sql: &str,
        params: &[SqlParam],
    ) -> Result<Option<Row>, QueryError> {
        debug!(sql, params = params.len(), "query_one");
        let row = prepare(sql, params).fetch_optional(&self.pool).await?;
        Ok(row.as_ref().map(decode_row).transpose()?)
    }
}
