//! HTML and JSON request handlers.
//!
//! # Modules
//!
//! - [`submit`] - Index page and URL submission
//! - [`redirect`] - Short code redirects
//! - [`info`] - Entry details
//! - [`delete`] - Entry deletion
//! - [`list`] - Paginated listing
//! - [`admin`] - Filtered administrative listing
//! - [`health`] - Health check

pub mod admin;
pub mod delete;
pub mod health;
pub mod info;
pub mod list;
pub mod redirect;
pub mod submit;

pub use admin::admin_handler;
pub use delete::delete_handler;
pub use health::health_handler;
pub use info::info_handler;
pub use list::list_handler;
pub use redirect::redirect_handler;
pub use submit::{index_handler, submit_handler};
