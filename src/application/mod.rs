//! Application layer services.
//!
//! Services coordinate repository calls and business rules and give the
//! HTTP handlers and the CLI a single API.
//!
//! - [`services::link_service::LinkService`] - Shortening, redirects, listings

pub mod services;
