//! Error Types
//!
//! This module defines the error types used throughout the viewer.
//!
//! # Overview
//!
//! The main error type [`ShowroomError`] only covers startup and loading
//! failures. Per-frame conditions (an unresolved blink target, a scene with no
//! camera clip, a degenerate frame window) are never errors: they are logged
//! and skipped where they happen.
//!
//! # Usage
//!
//! ```rust,ignore
//! use showroom::errors::{ShowroomError, Result};
//!
//! fn load_config() -> Result<ViewerConfig> {
//!     ViewerConfig::from_json_file("showroom.json")
//! }
//! ```

use thiserror::Error;

/// The main error type for the showroom viewer.
#[derive(Error, Debug)]
pub enum ShowroomError {
    // ========================================================================
    // Startup Errors
    // ========================================================================
    /// The host did not provide a display region to mount the viewer into.
    #[error("Mount point missing: the host provided no display region")]
    MountPointMissing,

    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// The requested asset was not found.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// The background loader went away without delivering a result.
    #[error("Asset loader disconnected before delivering a scene")]
    LoaderDisconnected,

    // ========================================================================
    // I/O & Parsing Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// glTF parsing or loading error.
    #[cfg(feature = "gltf")]
    #[error("glTF error: {0}")]
    GltfError(String),
}

#[cfg(feature = "gltf")]
impl From<gltf::Error> for ShowroomError {
    fn from(err: gltf::Error) -> Self {
        ShowroomError::GltfError(err.to_string())
    }
}

/// Alias for `Result<T, ShowroomError>`.
pub type Result<T> = std::result::Result<T, ShowroomError>;
