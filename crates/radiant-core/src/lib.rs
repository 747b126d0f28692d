//! Radiant Core - Domain models, pagination, and configuration
//!
//! Platform record types and the paginated collector that drives every
//! listing endpoint. Datasource-specific metadata parsing lives in
//! [`metadata`].

pub mod config;
pub mod error;
pub mod metadata;
pub mod models;
pub mod pagination;

pub use error::{RadiantError, Result};
