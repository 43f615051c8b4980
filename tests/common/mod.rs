#![allow(dead_code)]

use axum_test::TestServer;
use shortener::domain::entities::ShortUrl;
use shortener::domain::repositories::ShortUrlRepository;
use shortener::infrastructure::persistence::InMemoryShortUrlRepository;
use shortener::routes::app_router;
use shortener::state::AppState;
use shortener::utils::short_code::encode;
use shortener::web::middleware::admin_auth::AdminCredentials;
use std::sync::Arc;

pub const HOST: &str = "sho.rt:8000";

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "s3cret";
/// `Basic base64("admin:s3cret")`
pub const ADMIN_AUTHORIZATION: &str = "Basic YWRtaW46czNjcmV0";

pub fn create_test_state() -> (AppState, Arc<InMemoryShortUrlRepository>) {
    let repo = Arc::new(InMemoryShortUrlRepository::new());
    let state = AppState::new(repo.clone(), None);
    (state, repo)
}

pub fn create_admin_state() -> (AppState, Arc<InMemoryShortUrlRepository>) {
    let repo = Arc::new(InMemoryShortUrlRepository::new());
    let admin = AdminCredentials::new(ADMIN_USERNAME, ADMIN_PASSWORD);
    let state = AppState::new(repo.clone(), Some(admin));
    (state, repo)
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(app_router(state)).unwrap()
}

/// Stores `long_url` the way the submit flow does and returns the entry.
pub async fn create_test_link(repo: &InMemoryShortUrlRepository, long_url: &str) -> ShortUrl {
    let (entry, _) = repo.get_or_create_by_long_url(long_url).await.unwrap();
    repo.assign_short_code(entry.id, &encode(entry.id as u64))
        .await
        .unwrap()
}

pub async fn click(repo: &InMemoryShortUrlRepository, code: &str, times: usize) {
    for _ in 0..times {
        repo.increment_clicks(code).await.unwrap();
    }
}
