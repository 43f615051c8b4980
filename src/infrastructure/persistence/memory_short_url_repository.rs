//! In-process implementation of the short URL repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::cmp::Reverse;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::entities::{AdminFilter, ShortUrl};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;

#[derive(Debug, Default)]
struct Store {
    last_id: i64,
    entries: Vec<ShortUrl>,
}

/// Repository keeping entries in memory for the lifetime of the process.
///
/// Every operation holds one mutex for its whole duration, which gives the
/// same get-or-create and increment atomicity as the Postgres store.
///
/// # Use Cases
///
/// - Local runs without a database (`STORAGE_BACKEND=memory`)
/// - HTTP tests
pub struct InMemoryShortUrlRepository {
    store: Mutex<Store>,
}

impl InMemoryShortUrlRepository {
    /// Creates an empty repository. Ids start at 1.
    pub fn new() -> Self {
        debug!("Using in-memory short URL store");
        Self {
            store: Mutex::new(Store::default()),
        }
    }
}

impl Default for InMemoryShortUrlRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn paginate(entries: Vec<ShortUrl>, offset: i64, limit: i64) -> Vec<ShortUrl> {
    let skip = usize::try_from(offset).unwrap_or(0);
    let take = usize::try_from(limit).unwrap_or(0);
    entries.into_iter().skip(skip).take(take).collect()
}

#[async_trait]
impl ShortUrlRepository for InMemoryShortUrlRepository {
    async fn get_or_create_by_long_url(
        &self,
        long_url: &str,
    ) -> Result<(ShortUrl, bool), AppError> {
        let mut store = self.store.lock().await;

        if let Some(existing) = store.entries.iter().find(|e| e.long_url == long_url) {
            return Ok((existing.clone(), false));
        }

        store.last_id += 1;
        let entry = ShortUrl::new(store.last_id, long_url.to_string(), None, Utc::now(), 0);
        store.entries.push(entry.clone());

        Ok((entry, true))
    }

    async fn assign_short_code(&self, id: i64, short_code: &str) -> Result<ShortUrl, AppError> {
        let mut store = self.store.lock().await;

        let entry = store
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "id": id })))?;

        if entry.short_code.is_none() {
            entry.short_code = Some(short_code.to_string());
        }

        Ok(entry.clone())
    }

    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<ShortUrl>, AppError> {
        let store = self.store.lock().await;

        Ok(store
            .entries
            .iter()
            .find(|e| e.short_code.as_deref() == Some(short_code))
            .cloned())
    }

    async fn increment_clicks(&self, short_code: &str) -> Result<Option<ShortUrl>, AppError> {
        let mut store = self.store.lock().await;

        Ok(store
            .entries
            .iter_mut()
            .find(|e| e.short_code.as_deref() == Some(short_code))
            .map(|entry| {
                entry.clicks += 1;
                entry.clone()
            }))
    }

    async fn delete_by_short_code(&self, short_code: &str) -> Result<bool, AppError> {
        let mut store = self.store.lock().await;

        let before = store.entries.len();
        store
            .entries
            .retain(|e| e.short_code.as_deref() != Some(short_code));

        Ok(store.entries.len() < before)
    }

    async fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<ShortUrl>, AppError> {
        let store = self.store.lock().await;

        let mut entries = store.entries.clone();
        entries.sort_by_key(|e| (Reverse(e.clicks), Reverse(e.created_at), Reverse(e.id)));

        Ok(paginate(entries, offset, limit))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let store = self.store.lock().await;
        Ok(i64::try_from(store.entries.len()).unwrap_or(i64::MAX))
    }

    async fn search(
        &self,
        filter: &AdminFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ShortUrl>, AppError> {
        let store = self.store.lock().await;

        let mut entries: Vec<ShortUrl> = store
            .entries
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.id);

        Ok(paginate(entries, offset, limit))
    }

    async fn count_matching(&self, filter: &AdminFilter) -> Result<i64, AppError> {
        let store = self.store.lock().await;
        let count = store.entries.iter().filter(|e| filter.matches(e)).count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
