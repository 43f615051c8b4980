//! Top-level router.
//!
//! # Route Structure
//!
//! - `GET  /`              - Form and top entries
//! - `POST /`              - Shorten a URL
//! - `GET  /list/`         - Paginated listing
//! - `GET  /info/{code}`   - Entry details
//! - `GET  /delete/{code}` - Delete an entry
//! - `GET  /health`        - Health check
//! - `GET  /admin/`        - Filtered listing (Basic auth, only when configured)
//! - `GET  /{code}/`       - Short link redirect
//!
//! Every route runs inside the request tracing layer.

use axum::Router;

use crate::state::AppState;
use crate::web;
use crate::web::middleware::tracing;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    let mut router = web::routes::public_routes();

    if state.admin.is_some() {
        router = router.merge(web::routes::admin_routes(state.clone()));
    }

    router.with_state(state).layer(tracing::layer())
}
