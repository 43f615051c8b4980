//! Paginated listing of all short links.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_host::host_from_headers;
use crate::web::dto::pagination::ListQuery;
use crate::web::views::EntryView;

/// Template for `templates/list.html`.
#[derive(Template, WebTemplate)]
#[template(path = "list.html")]
pub struct ListTemplate {
    pub entries: Vec<EntryView>,
    pub number: u32,
    pub num_pages: u32,
    pub total: i64,
    pub previous: Option<u32>,
    pub next: Option<u32>,
}

/// Lists links by clicks, newest first among equals, 20 per page.
///
/// # Endpoint
///
/// `GET /list/?page=N`
///
/// # Errors
///
/// Returns 404 Not Found for page 0 or a page past the end.
pub async fn list_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let page = state.link_service.list(query.page()).await?;
    let host = host_from_headers(&headers).ok();

    Ok(ListTemplate {
        entries: EntryView::list(&page.items, host.as_ref()),
        number: page.number,
        num_pages: page.num_pages(),
        total: page.total,
        previous: page.previous(),
        next: page.next(),
    })
}
