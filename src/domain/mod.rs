//! Domain layer: entities and the storage contract.
//!
//! - [`entities`] - Plain data structures
//! - [`repositories`] - Storage trait implemented by `crate::infrastructure`
//!
//! The domain layer does not depend on the web or infrastructure layers.

pub mod entities;
pub mod repositories;
