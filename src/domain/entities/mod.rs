//! Core domain entities.
//!
//! - [`ShortUrl`] - A stored long URL with its short code and click counter
//! - [`Page`] - One page of an ordered listing
//! - [`AdminFilter`] - Criteria for the read-only admin listing

pub mod admin_filter;
pub mod page;
pub mod short_url;

pub use admin_filter::{AdminFilter, ClickedFilter};
pub use page::Page;
pub use short_url::ShortUrl;
