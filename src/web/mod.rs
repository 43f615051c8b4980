//! Browser-facing layer: server-rendered pages over askama templates.
//!
//! # Modules
//!
//! - [`dto`] - Form, query and JSON payloads
//! - [`handlers`] - Request handlers
//! - [`middleware`] - Request tracing and admin authentication
//! - [`routes`] - Route configuration
//! - [`views`] - Display models for the templates

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod views;
