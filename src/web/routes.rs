//! Route configuration of the HTML surface.

use axum::{Router, middleware, routing::get};

use crate::state::AppState;
use crate::web::handlers::{
    admin_handler, delete_handler, health_handler, index_handler, info_handler, list_handler,
    redirect_handler, submit_handler,
};
use crate::web::middleware::admin_auth;

/// Public routes.
///
/// # Endpoints
///
/// - `GET /` - Form and top entries
/// - `POST /` - Shorten a URL
/// - `GET /list/` - Paginated listing
/// - `GET /info/{code}` - Entry details
/// - `GET /delete/{code}` - Delete an entry
/// - `GET /health` - Health check
/// - `GET /{code}/` - Redirect to the long URL
///
/// Static segments win over `/{code}/`, so a code spelled like one of them
/// is only reachable through its info page.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler).post(submit_handler))
        .route("/list/", get(list_handler))
        .route("/list", get(list_handler))
        .route("/info/{code}", get(info_handler))
        .route("/delete/{code}", get(delete_handler))
        .route("/health", get(health_handler))
        .route("/{code}/", get(redirect_handler))
        .route("/{code}", get(redirect_handler))
}

/// Admin routes, protected via [`admin_auth::layer`].
///
/// # Endpoints
///
/// - `GET /admin/` - Filtered listing
pub fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/", get(admin_handler))
        .route("/admin", get(admin_handler))
        .route_layer(middleware::from_fn_with_state(state, admin_auth::layer))
}
