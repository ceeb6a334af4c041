//! Statements for the four movie access patterns. Every user-supplied value is a bound
//! parameter; only the sort keyword is spliced in, and it comes from a closed enum.

use super::params::{Pagination, SortOrder, Year};
use crate::db::sqlite::RATINGS_ALIAS;
use crate::db::Statement;

const LIST_COLUMNS: &str = "m.movieId, m.imdbId, m.title, m.genres, m.releaseDate, m.budget";

/// Every stored movie, in the store's natural row order.
pub fn list_all(page: Pagination) -> Statement {
    paginate(
        Statement::new(format!("SELECT {LIST_COLUMNS} FROM movies m")),
        page,
    )
}

/// One movie with its rating aggregate. A movie without ratings produces no row.
pub fn by_id(id: i64) -> Statement {
    Statement::new(format!(
        "SELECT m.movieId, m.imdbId, m.title, m.overview, m.productionCompanies, \
         m.releaseDate, m.budget, m.revenue, m.runtime, m.language, m.genres, m.status, \
         AVG(r.rating) AS avgRating, COUNT(r.rating) AS ratingCount \
         FROM movies m \
         INNER JOIN {RATINGS_ALIAS}.ratings r ON r.movieId = m.movieId \
         WHERE m.movieId = ? \
         GROUP BY m.movieId \
         HAVING COUNT(r.rating) > 0"
    ))
    .bind(id)
}

/// Movies whose release date starts with `year`, ordered by release date.
pub fn by_year(year: Year, sort: SortOrder, page: Pagination) -> Statement {
    paginate(
        Statement::new(format!(
            "SELECT {LIST_COLUMNS} FROM movies m \
             WHERE m.releaseDate LIKE ? \
             ORDER BY m.releaseDate {}",
            sort.as_sql()
        ))
        .bind(year.like_prefix()),
        page,
    )
}

/// Movies whose stored genre text contains `genre`, ignoring case.
///
/// This matches against the raw JSON text, so a term can also hit other parts of it.
pub fn by_genre(genre: &str, page: Pagination) -> Statement {
    paginate(
        Statement::new(format!(
            "SELECT {LIST_COLUMNS} FROM movies m WHERE LOWER(m.genres) LIKE ?"
        ))
        .bind(format!("%{}%", genre.to_lowercase())),
        page,
    )
}

fn paginate(mut statement: Statement, page: Pagination) -> Statement {
    statement.sql.push_str(" LIMIT ? OFFSET ?");
    statement.bind(page.limit).bind(page.offset())
}
