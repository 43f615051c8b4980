//! Application error type and its HTML rendering.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

/// Errors surfaced by services and handlers.
///
/// Every variant carries a user-facing message and structured details that
/// are logged but never rendered.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Submitted form data is unusable.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Submitted URL points back at this service.
    #[error("{message}")]
    SelfReference { message: String, details: Value },

    /// Malformed request, e.g. a short code with foreign characters on the info page.
    #[error("{message}")]
    BadRequest { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Unauthorized { message: String, details: Value },

    /// Store failure or broken invariant.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn validation(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn self_reference(message: impl Into<String>, details: Value) -> Self {
        Self::SelfReference {
            message: message.into(),
            details,
        }
    }

    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::BadRequest {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::SelfReference { .. } | Self::BadRequest { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> &Value {
        match self {
            Self::Validation { details, .. }
            | Self::SelfReference { details, .. }
            | Self::BadRequest { details, .. }
            | Self::NotFound { details, .. }
            | Self::Unauthorized { details, .. }
            | Self::Internal { details, .. } => details,
        }
    }
}

/// Error page, rendered from `templates/error.html`.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    pub reason: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(details = %self.details(), "{}", self);
        } else {
            tracing::debug!(status = status.as_u16(), details = %self.details(), "{}", self);
        }

        // Internal details never reach the page
        let message = if status.is_server_error() {
            "Something went wrong on our side. Please try again later.".to_string()
        } else {
            self.to_string()
        };

        let page = ErrorTemplate {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Error").to_string(),
            message,
        };

        let mut response = (status, page).into_response();

        if matches!(self, Self::Unauthorized { .. }) {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Basic realm=\"shortener admin\""),
            );
        }

        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::internal(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        AppError::internal("Database error", json!({ "reason": e.to_string() }))
    }
}
