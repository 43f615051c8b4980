//! Infrastructure layer for external integrations.
//!
//! Implements the storage interface defined by the domain layer.
//!
//! - [`persistence`] - PostgreSQL and in-memory repositories

pub mod persistence;
