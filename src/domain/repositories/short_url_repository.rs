//! Repository trait for short URL storage.

use crate::domain::entities::{AdminFilter, ShortUrl};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract for [`ShortUrl`] entries.
///
/// The store is the only shared mutable state in the service, so the two
/// racy operations are atomic here rather than in callers:
/// [`get_or_create_by_long_url`](Self::get_or_create_by_long_url) and
/// [`increment_clicks`](Self::increment_clicks).
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortUrlRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryShortUrlRepository`] - process memory
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortUrlRepository: Send + Sync {
    /// Returns the entry for `long_url`, creating it if absent.
    ///
    /// The boolean is `true` when this call inserted the row. Concurrent calls
    /// with the same URL create at most one row. New rows have no short code
    /// yet; see [`assign_short_code`](Self::assign_short_code).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn get_or_create_by_long_url(&self, long_url: &str)
    -> Result<(ShortUrl, bool), AppError>;

    /// Stores the short code of entry `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the entry no longer exists.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn assign_short_code(&self, id: i64, short_code: &str) -> Result<ShortUrl, AppError>;

    /// Finds an entry by exact short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Atomically adds one click and returns the updated entry.
    ///
    /// Returns `Ok(None)` if no entry has this code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn increment_clicks(&self, short_code: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Deletes the entry with this code. Returns `Ok(false)` if none existed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete_by_short_code(&self, short_code: &str) -> Result<bool, AppError>;

    /// Lists entries by clicks descending, then creation time descending.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<ShortUrl>, AppError>;

    /// Counts all entries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;

    /// Lists entries matching `filter`, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn search(
        &self,
        filter: &AdminFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ShortUrl>, AppError>;

    /// Counts entries matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count_matching(&self, filter: &AdminFilter) -> Result<i64, AppError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if it is not.
    async fn ping(&self) -> Result<(), AppError>;
}
