//! Radiant Client - Blocking client for the Radiant Earth platform
//!
//! Wraps the platform's REST endpoints behind a [`Transport`] port, drives
//! every listing endpoint through the paginated collector and exposes a
//! [`Project`] handle for per-project operations.

pub mod client;
pub mod http;
pub mod ports;
pub mod project;
pub mod project_config;
pub mod shapes;

// Re-export main types
pub use client::Client;
pub use http::HttpTransport;
pub use ports::{ApiRequest, ApiResponse, Method, Transport};
pub use project::{ImageFormat, Project};
pub use project_config::ProjectConfigEntry;
pub use radiant_geo::Coverage;
pub use shapes::load_geojson;
