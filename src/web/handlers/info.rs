//! Entry detail page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_host::host_from_headers;
use crate::web::views::EntryView;

/// Template for `templates/info.html`.
#[derive(Template, WebTemplate)]
#[template(path = "info.html")]
pub struct InfoTemplate {
    pub entry: EntryView,
}

/// Shows short code, long URL, clicks and creation time. Read-only.
///
/// # Endpoint
///
/// `GET /info/{code}`
///
/// # Errors
///
/// Returns 400 Bad Request for malformed codes and 404 Not Found for unknown ones.
pub async fn info_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let entry = state.link_service.info(&code).await?;
    let host = host_from_headers(&headers).ok();

    Ok(InfoTemplate {
        entry: EntryView::new(&entry, host.as_ref()),
    })
}
