//! HTTP Basic authentication for the admin view.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBasic;
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::{error::AppError, state::AppState};

/// Configured admin login. Only a digest of the password is kept in memory.
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password_digest: [u8; 32],
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: &str) -> Self {
        Self {
            username: username.into(),
            password_digest: digest(password),
        }
    }

    /// Returns `true` if the pair matches the configured login.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        // Compare digests so the check does not depend on where the passwords differ
        let password_ok = digest(password) == self.password_digest;
        let username_ok = digest(username) == digest(&self.username);
        password_ok && username_ok
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password_digest", &"***")
            .finish()
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

/// Authenticates admin requests.
///
/// # Header Format
///
/// ```text
/// Authorization: Basic base64(username:password)
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` with a `WWW-Authenticate: Basic` challenge if:
/// - The header is missing or malformed
/// - The credentials do not match
/// - No admin login is configured
///
/// # Example
///
/// ```rust,ignore
/// let admin = Router::new()
///     .route("/admin/", get(admin_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), admin_auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBasic((username, password)) = AuthBasic::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Authentication required",
                json!({ "reason": "Authorization header is missing or invalid" }),
            )
        })?;

    let credentials = st.admin.as_deref().ok_or_else(|| {
        AppError::unauthorized(
            "Authentication required",
            json!({ "reason": "admin login is not configured" }),
        )
    })?;

    if !credentials.verify(&username, password.as_deref().unwrap_or_default()) {
        tracing::warn!(%username, "Rejected admin login");
        return Err(AppError::unauthorized(
            "Authentication required",
            json!({ "reason": "invalid credentials", "username": username }),
        ));
    }

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}
