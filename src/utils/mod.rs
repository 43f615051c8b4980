//! Pure helpers shared by the services and handlers.
//!
//! - [`short_code`] - Base-62 short code encoding and validation
//! - [`url_normalizer`] - Scheme normalization and submitted URL checks
//! - [`request_host`] - `Host` header parsing for self-reference checks

pub mod request_host;
pub mod short_code;
pub mod url_normalizer;
