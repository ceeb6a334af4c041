use super::model::{movie_from_row, Movie};
use super::params::{Pagination, SortOrder, Year};
use super::queries;
use crate::db::{Database, Row, Statement};
use crate::error::{FetchCause, FetchError, Operation};
use std::sync::Arc;
use tracing::{error, instrument};

/// Read-only movie queries over an injected [`Database`].
///
/// Holds no per-call state; concurrent calls are independent.
#[derive(Clone)]
pub struct MovieService {
    db: Arc<dyn Database>,
    default_limit: i64,
}

impl MovieService {
    pub fn new(db: Arc<dyn Database>, default_limit: i64) -> Self {
        Self { db, default_limit }
    }

    /// Page size used when a caller does not ask for one.
    pub fn default_limit(&self) -> i64 {
        self.default_limit
    }

    /// Resolve raw page/limit values against this service's default page size.
    pub fn pagination(&self, page: Option<&str>, limit: Option<&str>) -> Pagination {
        Pagination::from_query(page, limit, self.default_limit)
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self, page: Pagination) -> Result<Vec<Movie>, FetchError> {
        self.fetch_many(Operation::ListAll, queries::list_all(page))
            .await
    }

    /// `Ok(None)` when the movie does not exist or has no ratings.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Movie>, FetchError> {
        let op = Operation::GetById;
        let stmt = queries::by_id(id);
        let row = self
            .db
            .query_one(&stmt.sql, &stmt.params)
            .await
            .map_err(|e| fail(op, e))?;
        row.map(|row| decode(op, row)).transpose()
    }

    #[instrument(skip(self))]
    pub async fn list_by_year(
        &self,
        year: Year,
        sort: SortOrder,
        page: Pagination,
    ) -> Result<Vec<Movie>, FetchError> {
        self.fetch_many(Operation::ListByYear, queries::by_year(year, sort, page))
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_by_genre(
        &self,
        genre: &str,
        page: Pagination,
    ) -> Result<Vec<Movie>, FetchError> {
        self.fetch_many(Operation::ListByGenre, queries::by_genre(genre, page))
            .await
    }

    async fn fetch_many(&self, op: Operation, stmt: Statement) -> Result<Vec<Movie>, FetchError> {
        let rows = self
            .db
            .query_many(&stmt.sql, &stmt.params)
            .await
            .map_err(|e| fail(op, e))?;
        rows.into_iter().map(|row| decode(op, row)).collect()
    }
}

fn decode(op: Operation, row: Row) -> Result<Movie, FetchError> {
    movie_from_row(row).map_err(|e| fail(op, e))
}

/// Log the original cause, then re-signal it under the operation's name.
fn fail(op: Operation, cause: impl Into<FetchCause>) -> FetchError {
    let err = FetchError::new(op, cause);
    error!(operation = %op, error = ?err.cause, "{}", err);
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::{full_movie_row, row, text, RecordingDatabase};
    use crate::db::{SqlParam, SqlValue, SqliteDatabase};
    use crate::movies::model::ListField;
    use std::sync::Mutex;

    fn service(db: RecordingDatabase) -> (MovieService, Arc<RecordingDatabase>) {
        let db = Arc::new(db);
        (MovieService::new(db.clone(), 50), db)
    }

    #[tokio::test]
    async fn list_all_pages_through_the_store() {
        let (svc, db) = service(RecordingDatabase::with_rows(vec![full_movie_row()]));

        let movies = svc.list_all(Pagination::new(1, 50)).await.unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].budget, Some(Some("$12345".into())));

        svc.list_all(Pagination::new(2, 10)).await.unwrap();

        let calls = db.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].1, vec![SqlParam::Int(50), SqlParam::Int(0)]);
        assert_eq!(calls[1].1, vec![SqlParam::Int(10), SqlParam::Int(10)]);
    }

    #[tokio::test]
    async fn empty_result_is_an_empty_list() {
        let (svc, _) = service(RecordingDatabase::default());
        let movies = svc.list_all(Pagination::new(999, 50)).await.unwrap();
        assert!(movies.is_empty());
    }

    #[tokio::test]
    async fn get_by_id_returns_none_without_a_row() {
        let (svc, db) = service(RecordingDatabase::default());
        assert_eq!(svc.get_by_id(4).await.unwrap(), None);
        assert_eq!(db.calls()[0].1, vec![SqlParam::Int(4)]);
    }

    #[tokio::test]
    async fn get_by_id_rounds_the_aggregate() {
        let mut raw = full_movie_row();
        raw.insert("avgRating".into(), SqlValue::Real(9.198765));
        raw.insert("ratingCount".into(), SqlValue::Integer(8327));
        let (svc, _) = service(RecordingDatabase::with_rows(vec![raw]));

        let movie = svc.get_by_id(1).await.unwrap().expect("movie");
        assert_eq!(movie.avg_rating, Some(9.2));
        assert_eq!(movie.rating_count, Some(8327));
    }

    #[tokio::test]
    async fn store_failure_becomes_a_named_fetch_error() {
        let (svc, _) = service(RecordingDatabase::failing());

        let err = svc.list_all(Pagination::new(1, 10)).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch movies");
        assert_eq!(err.operation, Operation::ListAll);

        let err = svc.get_by_id(1).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch movie by ID");

        let err = svc
            .list_by_year(Year::try_from(2024_i64).unwrap(), SortOrder::Asc, Pagination::new(1, 10))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch movies by year");

        let err = svc
            .list_by_genre("drama", Pagination::new(1, 10))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch movies by genre");
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn store_failure_is_logged_with_its_cause() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::ERROR)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let (svc, _) = service(RecordingDatabase::failing());
        svc.list_all(Pagination::new(1, 10)).await.unwrap_err();

        let out = logs.contents();
        assert!(out.contains("ERROR"), "{out}");
        assert!(out.contains("operation=list_all"), "{out}");
        assert!(out.contains("PoolTimedOut"), "{out}");
    }

    #[tokio::test]
    async fn malformed_stored_json_is_not_swallowed() {
        let bad = row([("movieId", SqlValue::Integer(1)), ("genres", text("[{"))]);
        let (svc, _) = service(RecordingDatabase::with_rows(vec![bad]));

        let err = svc
            .list_by_genre("drama", Pagination::new(1, 10))
            .await
            .unwrap_err();
        assert!(err.is_transform());
        assert_eq!(err.operation, Operation::ListByGenre);
    }

    #[tokio::test]
    async fn pagination_uses_the_configured_default() {
        let (svc, _) = service(RecordingDatabase::default());
        assert_eq!(svc.default_limit(), 50);
        assert_eq!(svc.pagination(None, None), Pagination::new(1, 50));
        assert_eq!(svc.pagination(Some("3"), Some("7")), Pagination::new(3, 7));
    }

    async fn sqlite_service() -> (MovieService, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = crate::db::sqlite::tests::seed_datasets(&dir).await;
        let db = SqliteDatabase::connect(&config).await.unwrap();
        (MovieService::new(Arc::new(db), 50), dir)
    }

    fn ids(movies: &[Movie]) -> Vec<i64> {
        movies.iter().filter_map(|m| m.movie_id.flatten()).collect()
    }

    #[tokio::test]
    async fn sqlite_lists_in_natural_order_with_paging() {
        let (svc, _dir) = sqlite_service().await;

        let all = svc.list_all(Pagination::new(1, 50)).await.unwrap();
        assert_eq!(ids(&all), vec![1, 2, 3, 4]);
        assert_eq!(all[1].genres, Some(ListField::Items(vec![crate::movies::NamedEntry {
            id: 18,
            name: "Drama".into(),
        }])));
        assert_eq!(all[3].genres, Some(ListField::Null));

        let second = svc.list_all(Pagination::new(2, 3)).await.unwrap();
        assert_eq!(ids(&second), vec![4]);

        let beyond = svc.list_all(Pagination::new(10, 3)).await.unwrap();
        assert!(beyond.is_empty());
    }

    #[tokio::test]
    async fn sqlite_get_by_id_aggregates_ratings() {
        let (svc, _dir) = sqlite_service().await;

        let movie = svc.get_by_id(1).await.unwrap().expect("rated movie");
        assert_eq!(movie.avg_rating, Some(4.17));
        assert_eq!(movie.rating_count, Some(3));
        assert_eq!(movie.budget, Some(Some("$12345".into())));
        assert_eq!(movie.production_companies, Some(ListField::Items(vec![
            crate::movies::NamedEntry {
                id: 7,
                name: "Studio A".into(),
            }
        ])));
    }

    #[tokio::test]
    async fn sqlite_get_by_id_skips_unrated_and_missing_movies() {
        let (svc, _dir) = sqlite_service().await;
        assert_eq!(svc.get_by_id(4).await.unwrap(), None);
        assert_eq!(svc.get_by_id(404).await.unwrap(), None);
    }

    #[tokio::test]
    async fn sqlite_year_matches_prefix_in_requested_order() {
        let (svc, _dir) = sqlite_service().await;
        let year = Year::try_from(2024_i64).unwrap();

        let desc = svc
            .list_by_year(year, SortOrder::Desc, Pagination::new(1, 50))
            .await
            .unwrap();
        assert_eq!(ids(&desc), vec![2, 4, 1]);

        let asc = svc
            .list_by_year(year, SortOrder::Asc, Pagination::new(1, 50))
            .await
            .unwrap();
        assert_eq!(ids(&asc), vec![1, 4, 2]);
    }

    #[tokio::test]
    async fn sqlite_genre_match_ignores_case() {
        let (svc, _dir) = sqlite_service().await;

        let horror = svc
            .list_by_genre("horror", Pagination::new(1, 50))
            .await
            .unwrap();
        assert_eq!(ids(&horror), vec![1, 3]);

        // Matches anywhere in the stored JSON text, not just genre names.
        let by_key = svc
            .list_by_genre("\"name\"", Pagination::new(1, 50))
            .await
            .unwrap();
        assert_eq!(ids(&by_key), vec![1, 2, 3]);
    }
}
