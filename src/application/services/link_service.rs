//! Short link creation, resolution and listing.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use crate::domain::entities::{AdminFilter, Page, ShortUrl};
use crate::domain::entities::page::num_pages;
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;
use crate::utils::request_host::RequestHost;
use crate::utils::short_code::{encode, is_valid_code};
use crate::utils::url_normalizer::{normalize_url, validate_long_url};

/// Page size of the public listing.
pub const LIST_PAGE_SIZE: u32 = 20;

/// Number of entries shown under the submission form.
pub const TOP_ENTRIES: u32 = 20;

/// Service behind every page of the shortener.
///
/// Composes the normalizer, the code validator and the encoder with a
/// [`ShortUrlRepository`]. Works with any repository, including a
/// `dyn ShortUrlRepository` chosen at startup.
pub struct LinkService<R: ShortUrlRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: ShortUrlRepository + ?Sized> LinkService<R> {
    /// Creates a new link service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Shortens a submitted URL on behalf of a request to `host`.
    ///
    /// The URL is normalized, checked for self-reference, then fetched or
    /// created. The same normalized URL always yields the same entry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::SelfReference`] if the URL contains this host.
    /// Returns [`AppError::Internal`] on storage errors.
    #[tracing::instrument(skip(self, host), fields(host = %host.hostname))]
    pub async fn shorten(&self, long_url: &str, host: &RequestHost) -> Result<ShortUrl, AppError> {
        let normalized = normalize_url(long_url.trim());

        if host.is_referenced_by(&normalized) {
            debug!("Rejected URL pointing at this host");
            return Err(AppError::self_reference(
                "You can't shorten a link to this service",
                json!({ "long_url": normalized, "host": host.hostname }),
            ));
        }

        self.store(&normalized).await.map(|(entry, _)| entry)
    }

    /// Validates and stores one URL from the bulk seed utility.
    ///
    /// Returns the entry and whether it was newly created.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for unusable URLs.
    /// Returns [`AppError::Internal`] on storage errors.
    #[tracing::instrument(skip(self))]
    pub async fn seed(&self, raw_url: &str) -> Result<(ShortUrl, bool), AppError> {
        let normalized = validate_long_url(raw_url).map_err(|e| {
            AppError::validation(e.to_string(), json!({ "long_url": raw_url }))
        })?;

        self.store(&normalized).await
    }

    /// Get-or-create followed by code assignment for fresh rows.
    async fn store(&self, normalized: &str) -> Result<(ShortUrl, bool), AppError> {
        let (entry, created) = self
            .repository
            .get_or_create_by_long_url(normalized)
            .await?;

        if entry.has_code() {
            return Ok((entry, created));
        }

        let id = u64::try_from(entry.id).map_err(|_| {
            AppError::internal(
                "Store returned a non-positive id",
                json!({ "id": entry.id }),
            )
        })?;
        let code = encode(id);
        let entry = self.repository.assign_short_code(entry.id, &code).await?;

        if created {
            metrics::counter!("shortener_links_created_total").increment(1);
            info!(id = entry.id, code = %code, "Created short link");
        } else {
            info!(id = entry.id, code = %code, "Assigned missing short code");
        }

        Ok((entry, created))
    }

    /// Resolves a code for redirecting and counts the click.
    ///
    /// Malformed codes are answered as not found without a store lookup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for malformed or unknown codes.
    /// Returns [`AppError::Internal`] on storage errors.
    #[tracing::instrument(skip(self))]
    pub async fn resolve(&self, code: &str) -> Result<ShortUrl, AppError> {
        if !is_valid_code(code) {
            return Err(not_found(code));
        }

        match self.repository.increment_clicks(code).await? {
            Some(entry) => {
                metrics::counter!("shortener_redirects_total").increment(1);
                Ok(entry)
            }
            None => Err(not_found(code)),
        }
    }

    /// Reads an entry for the info page without touching its counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] for malformed codes.
    /// Returns [`AppError::NotFound`] for unknown codes.
    /// Returns [`AppError::Internal`] on storage errors.
    #[tracing::instrument(skip(self))]
    pub async fn info(&self, code: &str) -> Result<ShortUrl, AppError> {
        if !is_valid_code(code) {
            return Err(AppError::bad_request(
                "This short link is malformed",
                json!({ "code": code }),
            ));
        }

        self.repository
            .find_by_short_code(code)
            .await?
            .ok_or_else(|| not_found(code))
    }

    /// Deletes an entry immediately and irreversibly.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for malformed or unknown codes.
    /// Returns [`AppError::Internal`] on storage errors.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, code: &str) -> Result<(), AppError> {
        if !is_valid_code(code) {
            return Err(not_found(code));
        }

        if self.repository.delete_by_short_code(code).await? {
            info!("Deleted short link");
            Ok(())
        } else {
            Err(not_found(code))
        }
    }

    /// Most clicked entries, newest first among equals.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn top(&self, limit: u32) -> Result<Vec<ShortUrl>, AppError> {
        self.repository.list_page(0, i64::from(limit)).await
    }

    /// One page of the public listing, [`LIST_PAGE_SIZE`] entries per page.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for page 0 or a page past the end.
    /// Returns [`AppError::Internal`] on storage errors.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, page: u32) -> Result<Page<ShortUrl>, AppError> {
        let total = self.repository.count().await?;
        check_page(page, total, LIST_PAGE_SIZE)?;

        let items = self
            .repository
            .list_page(offset(page, LIST_PAGE_SIZE), i64::from(LIST_PAGE_SIZE))
            .await?;

        Ok(Page::new(items, page, LIST_PAGE_SIZE, total))
    }

    /// One page of the admin listing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for page 0 or a page past the end.
    /// Returns [`AppError::Internal`] on storage errors.
    #[tracing::instrument(skip(self))]
    pub async fn admin_list(
        &self,
        filter: &AdminFilter,
        page: u32,
        page_size: u32,
    ) -> Result<Page<ShortUrl>, AppError> {
        let total = self.repository.count_matching(filter).await?;
        check_page(page, total, page_size)?;

        let items = self
            .repository
            .search(filter, offset(page, page_size), i64::from(page_size))
            .await?;

        Ok(Page::new(items, page, page_size, total))
    }

    /// Checks that the store answers.
    ///
    /// # Errors
    ///
    /// Returns the store's error if it does not.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

fn not_found(code: &str) -> AppError {
    metrics::counter!("shortener_not_found_total").increment(1);
    AppError::not_found("Short link not found", json!({ "code": code }))
}

fn check_page(page: u32, total: i64, page_size: u32) -> Result<(), AppError> {
    let last = num_pages(total, page_size);
    if page == 0 || page > last {
        return Err(AppError::not_found(
            "Invalid page",
            json!({ "page": page, "num_pages": last }),
        ));
    }
    Ok(())
}

fn offset(page: u32, page_size: u32) -> i64 {
    i64::from(page.saturating_sub(1)) * i64::from(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockShortUrlRepository;
    use chrono::Utc;

    fn host() -> RequestHost {
        RequestHost {
            authority: "sho.rt:8000".to_string(),
            hostname: "sho.rt".to_string(),
        }
    }

    fn entry(id: i64, url: &str, code: Option<&str>, clicks: i64) -> ShortUrl {
        ShortUrl::new(
            id,
            url.to_string(),
            code.map(str::to_string),
            Utc::now(),
            clicks,
        )
    }

    #[tokio::test]
    async fn test_shorten_creates_and_assigns_code() {
        let mut repo = MockShortUrlRepository::new();

        repo.expect_get_or_create_by_long_url()
            .withf(|url| url == "http://example.com")
            .times(1)
            .returning(|url| Ok((entry(125, url, None, 0), true)));

        repo.expect_assign_short_code()
            .withf(|id, code| *id == 125 && code == "21")
            .times(1)
            .returning(|id, code| Ok(entry(id, "http://example.com", Some(code), 0)));

        let service = LinkService::new(Arc::new(repo));
        let result = service.shorten("example.com", &host()).await.unwrap();

        assert_eq!(result.id, 125);
        assert_eq!(result.code(), "21");
        assert_eq!(result.long_url, "http://example.com");
    }

    #[tokio::test]
    async fn test_shorten_existing_entry_is_reused() {
        let mut repo = MockShortUrlRepository::new();

        repo.expect_get_or_create_by_long_url()
            .times(1)
            .returning(|url| Ok((entry(7, url, Some("7"), 3), false)));
        repo.expect_assign_short_code().times(0);

        let service = LinkService::new(Arc::new(repo));
        let result = service
            .shorten("https://example.com", &host())
            .await
            .unwrap();

        assert_eq!(result.code(), "7");
        assert_eq!(result.clicks, 3);
    }

    #[tokio::test]
    async fn test_shorten_repairs_missing_code_on_existing_entry() {
        let mut repo = MockShortUrlRepository::new();

        repo.expect_get_or_create_by_long_url()
            .times(1)
            .returning(|url| Ok((entry(62, url, None, 0), false)));
        repo.expect_assign_short_code()
            .withf(|id, code| *id == 62 && code == "10")
            .times(1)
            .returning(|id, code| Ok(entry(id, "https://example.com", Some(code), 0)));

        let service = LinkService::new(Arc::new(repo));
        let result = service
            .shorten("https://example.com", &host())
            .await
            .unwrap();

        assert_eq!(result.code(), "10");
    }

    #[tokio::test]
    async fn test_shorten_rejects_self_reference() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_get_or_create_by_long_url().times(0);

        let service = LinkService::new(Arc::new(repo));
        let result = service.shorten("sho.rt/abc/", &host()).await;

        assert!(matches!(result, Err(AppError::SelfReference { .. })));
    }

    #[tokio::test]
    async fn test_shorten_rejects_non_positive_id() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_get_or_create_by_long_url()
            .returning(|url| Ok((entry(0, url, None, 0), true)));
        repo.expect_assign_short_code().times(0);

        let service = LinkService::new(Arc::new(repo));
        let result = service.shorten("example.com", &host()).await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_seed_validates_input() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_get_or_create_by_long_url().times(0);

        let service = LinkService::new(Arc::new(repo));
        let result = service.seed("http: // kaktam.ru /").await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_seed_normalizes_and_stores() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_get_or_create_by_long_url()
            .withf(|url| url == "http://hh.ru")
            .times(1)
            .returning(|url| Ok((entry(1, url, None, 0), true)));
        repo.expect_assign_short_code()
            .returning(|id, code| Ok(entry(id, "http://hh.ru", Some(code), 0)));

        let service = LinkService::new(Arc::new(repo));
        let (result, created) = service.seed("hh.ru").await.unwrap();

        assert_eq!(result.code(), "1");
        assert!(created);
    }

    #[tokio::test]
    async fn test_resolve_increments_clicks() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_increment_clicks()
            .withf(|code| code == "b9")
            .times(1)
            .returning(|code| Ok(Some(entry(1, "https://example.com", Some(code), 1))));

        let service = LinkService::new(Arc::new(repo));
        let result = service.resolve("b9").await.unwrap();

        assert_eq!(result.clicks, 1);
        assert_eq!(result.long_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_malformed_code_skips_store() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_increment_clicks().times(0);

        let service = LinkService::new(Arc::new(repo));

        assert!(matches!(
            service.resolve("!!!").await,
            Err(AppError::NotFound { .. })
        ));
        assert!(matches!(
            service.resolve("").await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_resolve_unknown_code() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_increment_clicks().returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(repo));

        assert!(matches!(
            service.resolve("zzz").await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_info_malformed_code_is_bad_request() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_find_by_short_code().times(0);

        let service = LinkService::new(Arc::new(repo));

        assert!(matches!(
            service.info("!!!").await,
            Err(AppError::BadRequest { .. })
        ));
    }

    #[tokio::test]
    async fn test_info_does_not_count_clicks() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_find_by_short_code()
            .times(1)
            .returning(|code| Ok(Some(entry(5, "https://example.com", Some(code), 4))));
        repo.expect_increment_clicks().times(0);

        let service = LinkService::new(Arc::new(repo));
        let result = service.info("5").await.unwrap();

        assert_eq!(result.clicks, 4);
    }

    #[tokio::test]
    async fn test_info_unknown_code() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_find_by_short_code().returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(repo));

        assert!(matches!(
            service.info("abc").await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_outcomes() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_delete_by_short_code()
            .withf(|code| code == "abc")
            .returning(|_| Ok(true));
        repo.expect_delete_by_short_code()
            .withf(|code| code == "gone")
            .returning(|_| Ok(false));

        let service = LinkService::new(Arc::new(repo));

        assert!(service.delete("abc").await.is_ok());
        assert!(matches!(
            service.delete("gone").await,
            Err(AppError::NotFound { .. })
        ));
        assert!(matches!(
            service.delete("no-such!").await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_uses_page_offsets() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_count().returning(|| Ok(45));
        repo.expect_list_page()
            .withf(|offset, limit| *offset == 20 && *limit == 20)
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = LinkService::new(Arc::new(repo));
        let page = service.list(2).await.unwrap();

        assert_eq!(page.number, 2);
        assert_eq!(page.num_pages(), 3);
    }

    #[tokio::test]
    async fn test_list_rejects_out_of_range_pages() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_count().returning(|| Ok(45));
        repo.expect_list_page().times(0);

        let service = LinkService::new(Arc::new(repo));

        assert!(matches!(service.list(0).await, Err(AppError::NotFound { .. })));
        assert!(matches!(service.list(4).await, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_first_page_of_empty_store() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_count().returning(|| Ok(0));
        repo.expect_list_page().returning(|_, _| Ok(vec![]));

        let service = LinkService::new(Arc::new(repo));
        let page = service.list(1).await.unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.num_pages(), 1);
    }

    #[tokio::test]
    async fn test_top_reads_first_entries() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_list_page()
            .withf(|offset, limit| *offset == 0 && *limit == 20)
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = LinkService::new(Arc::new(repo));

        assert!(service.top(TOP_ENTRIES).await.unwrap().is_empty());
    }
}
