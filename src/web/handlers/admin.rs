//! Read-only administrative listing.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::IntoResponse,
};
use url::form_urlencoded;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_host::host_from_headers;
use crate::web::dto::pagination::AdminQuery;
use crate::web::views::EntryView;

/// Template for `templates/admin.html`.
#[derive(Template, WebTemplate)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub entries: Vec<EntryView>,
    pub number: u32,
    pub num_pages: u32,
    pub page_size: u32,
    pub total: i64,
    pub previous: Option<u32>,
    pub next: Option<u32>,
    /// Current filters as a query string prefix, ending in `&` when non-empty.
    pub query_base: String,
    pub clicked: String,
    pub from: String,
    pub to: String,
    pub q: String,
}

/// Lists every entry by id with filters.
///
/// # Endpoint
///
/// `GET /admin/` behind HTTP Basic auth
///
/// # Query Parameters
///
/// - `clicked`: `never` or `once`
/// - `from` / `to`: creation time range, RFC 3339 or `YYYY-MM-DD`
/// - `q`: substring of code or URL, or an exact id
/// - `page` / `page_size`: pagination (page size 10..=1000, default 100)
///
/// # Errors
///
/// Returns 400 Bad Request for invalid filters or paging, and 404 Not Found
/// for a page past the end.
pub async fn admin_handler(
    State(state): State<AppState>,
    Query(query): Query<AdminQuery>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let (page, page_size) = query.paging()?;
    let filter = query.filter()?;

    let result = state
        .link_service
        .admin_list(&filter, page, page_size)
        .await?;
    let host = host_from_headers(&headers).ok();

    Ok(AdminTemplate {
        entries: EntryView::list(&result.items, host.as_ref()),
        number: result.number,
        num_pages: result.num_pages(),
        page_size,
        total: result.total,
        previous: result.previous(),
        next: result.next(),
        query_base: query_base(&query, page_size),
        clicked: query.clicked.clone().unwrap_or_default(),
        from: query.from.clone().unwrap_or_default(),
        to: query.to.clone().unwrap_or_default(),
        q: query.q.clone().unwrap_or_default(),
    })
}

/// Encodes the active filters so pagination links keep them.
fn query_base(query: &AdminQuery, page_size: u32) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let params = [
        ("clicked", &query.clicked),
        ("from", &query.from),
        ("to", &query.to),
        ("q", &query.q),
    ];

    for (key, value) in params {
        if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
            serializer.append_pair(key, value);
        }
    }
    serializer.append_pair("page_size", &page_size.to_string());

    let mut base = serializer.finish();
    base.push('&');
    base
}
