//! Handler for deleting a short link.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect},
};

use crate::error::AppError;
use crate::state::AppState;

/// Deletes a short link and sends the browser back where it came from.
///
/// # Endpoint
///
/// `GET /delete/{code}`
///
/// Deletion is immediate: no confirmation step and no soft delete.
///
/// # Responses
///
/// - **303** to the `Referer` header, or to `/` without one
///
/// # Errors
///
/// Returns 404 Not Found if the code is malformed or unknown.
pub async fn delete_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    state.link_service.delete(&code).await?;

    let target = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or("/");

    Ok(Redirect::to(target))
}
