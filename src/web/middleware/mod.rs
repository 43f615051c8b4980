//! Middleware for the HTML surface.
//!
//! - [`tracing`] - Request/response spans
//! - [`admin_auth`] - HTTP Basic authentication for the admin view

pub mod admin_auth;
pub mod tracing;
