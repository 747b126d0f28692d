//! Error types for Radiant

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RadiantError {
    // Validation errors
    #[error("Scene {scene_id} has datasource '{found}', expected '{expected}'")]
    DatasourceMismatch {
        scene_id: String,
        found: String,
        expected: String,
    },

    #[error("Invalid geometry at {feature_id}: {reason}")]
    InvalidGeometry {
        feature_id: String,
        reason: String,
    },

    #[error("Export mask coordinates must be a MultiPolygon (nesting depth 4), found depth {depth}")]
    InvalidExportMask { depth: usize },

    #[error("Input geodata '{name}' is not a GeoJSON Feature: {reason}")]
    InvalidFeature { name: String, reason: String },

    #[error("Invalid scene query: {reason}")]
    InvalidSceneQuery { reason: String },

    #[error("Invalid date string '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error("Scene ids do not match project {project_id}: {reason}")]
    SceneOrderMismatch { project_id: String, reason: String },

    #[error("Missing field in platform response: {field}")]
    MissingField { field: String },

    // Credential errors
    #[error("Must provide either a refresh token or an API token")]
    MissingCredentials,

    #[error("Error using refresh token, please verify it is valid: {reason}")]
    RefreshToken { reason: String },

    // Transport errors
    #[error("{message}")]
    GatewayTimeout { message: String },

    #[error("HTTP {status} from {url}: {body}")]
    Http { status: u16, url: String, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RadiantError {
    /// True for failures caused by caller input rather than the platform.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RadiantError::DatasourceMismatch { .. }
                | RadiantError::InvalidGeometry { .. }
                | RadiantError::InvalidExportMask { .. }
                | RadiantError::InvalidFeature { .. }
                | RadiantError::InvalidSceneQuery { .. }
                | RadiantError::InvalidTimestamp { .. }
                | RadiantError::SceneOrderMismatch { .. }
        )
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RadiantError::Io { path: path.into(), source }
    }
}

impl From<serde_json::Error> for RadiantError {
    fn from(e: serde_json::Error) -> Self {
        RadiantError::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RadiantError>;
