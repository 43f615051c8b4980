//! Handler for short link redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its long URL and counts the click.
///
/// # Endpoint
///
/// `GET /{code}/` (and `GET /{code}`)
///
/// # Request Flow
///
/// 1. Reject codes with characters outside the alphabet (404, no lookup)
/// 2. Atomically increment the entry's clicks
/// 3. Return 301 Moved Permanently
///
/// Every hit counts; repeated clicks are not deduplicated.
///
/// # Errors
///
/// Returns 404 Not Found if the code is malformed or unknown.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let entry = state.link_service.resolve(&code).await?;
    let location = location_header(&entry.long_url)?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]))
}

/// Builds a `Location` value, percent-encoding targets that are not plain ASCII.
fn location_header(long_url: &str) -> Result<HeaderValue, AppError> {
    if let Ok(value) = HeaderValue::from_str(long_url) {
        return Ok(value);
    }

    Url::parse(long_url)
        .ok()
        .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
        .ok_or_else(|| {
            AppError::internal(
                "Stored URL is not a valid redirect target",
                json!({ "long_url": long_url }),
            )
        })
}
