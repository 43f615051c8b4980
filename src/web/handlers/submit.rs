//! Index page: submission form, top entries and shortening result.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Form, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use tracing::debug;
use validator::Validate;

use crate::application::services::link_service::TOP_ENTRIES;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_host::host_from_headers;
use crate::web::dto::submit::{SubmitForm, form_errors};
use crate::web::views::EntryView;

/// Form plus the most clicked entries, rendered from `templates/index.html`.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub long_url: String,
    pub errors: Vec<String>,
    pub entries: Vec<EntryView>,
}

/// Shortening result, rendered from `templates/result.html`.
#[derive(Template, WebTemplate)]
#[template(path = "result.html")]
pub struct ResultTemplate {
    pub entry: EntryView,
}

/// Renders the empty form and the top entries.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    render_index(&state, &headers, SubmitForm::default(), Vec::new()).await
}

/// Shortens a submitted URL.
///
/// # Endpoint
///
/// `POST /` with form field `long_url`
///
/// # Responses
///
/// - **200** with the result page
/// - **200** with the form and inline validation errors
/// - **400** if the URL points at this service
pub async fn submit_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SubmitForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.validate() {
        debug!(long_url = %form.long_url, "Submitted URL failed validation");
        let messages = form_errors(&errors);
        return Ok(render_index(&state, &headers, form, messages)
            .await?
            .into_response());
    }

    let host = host_from_headers(&headers)?;
    let entry = state.link_service.shorten(&form.long_url, &host).await?;

    Ok(ResultTemplate {
        entry: EntryView::new(&entry, Some(&host)),
    }
    .into_response())
}

async fn render_index(
    state: &AppState,
    headers: &HeaderMap,
    form: SubmitForm,
    errors: Vec<String>,
) -> Result<IndexTemplate, AppError> {
    let host = host_from_headers(headers).ok();
    let top = state.link_service.top(TOP_ENTRIES).await?;

    Ok(IndexTemplate {
        long_url: form.long_url,
        errors,
        entries: EntryView::list(&top, host.as_ref()),
    })
}
