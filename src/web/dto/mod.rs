//! Request and response DTOs of the web layer.
//!
//! Forms and query strings are deserialized with Serde and checked with
//! `validator` or explicit conversion methods.

pub mod health;
pub mod pagination;
pub mod submit;
