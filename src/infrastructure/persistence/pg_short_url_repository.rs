//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{AdminFilter, ClickedFilter, ShortUrl};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;

/// PostgreSQL repository for short URL entries.
///
/// Queries are built at runtime with bound parameters, so the crate builds
/// without a live database. Atomicity comes from single statements:
/// `INSERT … ON CONFLICT DO NOTHING` for get-or-create and
/// `clicks = clicks + 1` for click counting.
pub struct PgShortUrlRepository {
    pool: Arc<PgPool>,
}

impl PgShortUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<ShortUrl>, AppError> {
        let row = sqlx::query_as::<_, ShortUrl>(
            r#"
            SELECT id, long_url, short_code, created_at, clicks
            FROM short_urls
            WHERE long_url = $1
            "#,
        )
        .bind(long_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }
}

/// Escapes `LIKE` wildcards and wraps the term for a substring match.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Bind values for the admin filter, in `$1..$5` order.
fn filter_binds(
    filter: &AdminFilter,
) -> (
    Option<bool>,
    Option<chrono::DateTime<chrono::Utc>>,
    Option<chrono::DateTime<chrono::Utc>>,
    Option<String>,
    Option<i64>,
) {
    let clicked = filter.clicked.map(|c| c == ClickedFilter::AtLeastOnce);
    let search = filter.search.as_deref().filter(|s| !s.is_empty());

    (
        clicked,
        filter.created_from,
        filter.created_to,
        search.map(like_pattern),
        search.and_then(|s| s.parse::<i64>().ok()),
    )
}

const FILTER_WHERE: &str = r#"
    WHERE ($1::boolean IS NULL OR ($1 AND clicks > 0) OR (NOT $1 AND clicks = 0))
      AND ($2::timestamptz IS NULL OR created_at >= $2)
      AND ($3::timestamptz IS NULL OR created_at <= $3)
      AND ($4::text IS NULL
           OR short_code ILIKE $4
           OR long_url ILIKE $4
           OR id = $5::bigint)
"#;

#[async_trait]
impl ShortUrlRepository for PgShortUrlRepository {
    async fn get_or_create_by_long_url(
        &self,
        long_url: &str,
    ) -> Result<(ShortUrl, bool), AppError> {
        let inserted = sqlx::query_as::<_, ShortUrl>(
            r#"
            INSERT INTO short_urls (long_url)
            VALUES ($1)
            ON CONFLICT (long_url) DO NOTHING
            RETURNING id, long_url, short_code, created_at, clicks
            "#,
        )
        .bind(long_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        if let Some(entry) = inserted {
            return Ok((entry, true));
        }

        // Lost the insert race or the row already existed
        self.find_by_long_url(long_url)
            .await?
            .map(|entry| (entry, false))
            .ok_or_else(|| {
                AppError::internal(
                    "Entry vanished during get-or-create",
                    json!({ "long_url": long_url }),
                )
            })
    }

    async fn assign_short_code(&self, id: i64, short_code: &str) -> Result<ShortUrl, AppError> {
        // COALESCE keeps a code that a concurrent request already stored
        let row = sqlx::query_as::<_, ShortUrl>(
            r#"
            UPDATE short_urls
            SET short_code = COALESCE(short_code, $2)
            WHERE id = $1
            RETURNING id, long_url, short_code, created_at, clicks
            "#,
        )
        .bind(id)
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.ok_or_else(|| AppError::not_found("Short link not found", json!({ "id": id })))
    }

    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<ShortUrl>, AppError> {
        let row = sqlx::query_as::<_, ShortUrl>(
            r#"
            SELECT id, long_url, short_code, created_at, clicks
            FROM short_urls
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn increment_clicks(&self, short_code: &str) -> Result<Option<ShortUrl>, AppError> {
        let row = sqlx::query_as::<_, ShortUrl>(
            r#"
            UPDATE short_urls
            SET clicks = clicks + 1
            WHERE short_code = $1
            RETURNING id, long_url, short_code, created_at, clicks
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn delete_by_short_code(&self, short_code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM short_urls WHERE short_code = $1")
            .bind(short_code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<ShortUrl>, AppError> {
        let rows = sqlx::query_as::<_, ShortUrl>(
            r#"
            SELECT id, long_url, short_code, created_at, clicks
            FROM short_urls
            ORDER BY clicks DESC, created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn search(
        &self,
        filter: &AdminFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ShortUrl>, AppError> {
        let (clicked, from, to, pattern, id) = filter_binds(filter);

        let sql = format!(
            "SELECT id, long_url, short_code, created_at, clicks FROM short_urls {FILTER_WHERE} \
             ORDER BY id LIMIT $6 OFFSET $7"
        );

        let rows = sqlx::query_as::<_, ShortUrl>(&sql)
            .bind(clicked)
            .bind(from)
            .bind(to)
            .bind(pattern)
            .bind(id)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows)
    }

    async fn count_matching(&self, filter: &AdminFilter) -> Result<i64, AppError> {
        let (clicked, from, to, pattern, id) = filter_binds(filter);

        let sql = format!("SELECT COUNT(*) FROM short_urls {FILTER_WHERE}");

        let count: i64 = sqlx::query_scalar(&sql)
            .bind(clicked)
            .bind(from)
            .bind(to)
            .bind(pattern)
            .bind(id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("abc"), "%abc%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_filter_binds() {
        let filter = AdminFilter {
            clicked: Some(ClickedFilter::Never),
            search: Some("42".to_string()),
            ..Default::default()
        };

        let (clicked, from, to, pattern, id) = filter_binds(&filter);
        assert_eq!(clicked, Some(false));
        assert!(from.is_none());
        assert!(to.is_none());
        assert_eq!(pattern.as_deref(), Some("%42%"));
        assert_eq!(id, Some(42));
    }

    #[test]
    fn test_filter_binds_ignores_empty_search() {
        let filter = AdminFilter {
            search: Some(String::new()),
            ..Default::default()
        };

        let (clicked, _, _, pattern, id) = filter_binds(&filter);
        assert!(clicked.is_none());
        assert!(pattern.is_none());
        assert!(id.is_none());
    }
}
