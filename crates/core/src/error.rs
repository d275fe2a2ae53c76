//! Error types for ondk-setup
//!
//! Centralized error handling using thiserror. Every variant is fatal for a
//! setup run; the CLI prints the `Display` form and exits non-zero.

use std::path::PathBuf;
use thiserror::Error;

/// Broad classes of failure, used for reporting and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing environment or unsupported host
    Configuration,
    /// Installed version differs from the requested one
    VersionConflict,
    /// HTTP status or connection failure
    Transport,
    /// Corrupt archive, unsafe entry, permission or rename failure
    Filesystem,
    /// Verification still fails after a fresh install
    Consistency,
}

/// Main error type for ondk-setup
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error(
        "{var} environment variable not set.\n\
         Please set it to your Android SDK location, e.g.:\n  \
         export {var}=$HOME/Library/Android/sdk"
    )]
    SdkRootNotSet { var: String },

    #[error(
        "ONDK version mismatch: expected {expected}, found {found}.\n\
         Please remove {} and run again.",
        .path.display()
    )]
    VersionMismatch {
        expected: String,
        found: String,
        path: PathBuf,
    },

    #[error("Failed to download ONDK: HTTP {status}\nURL: {url}")]
    Http { status: u16, url: String },

    #[error("Failed to download ONDK: {message}\nURL: {url}")]
    Network { message: String, url: String },

    #[error("Failed to download/extract ONDK: {message}\nURL: {url}")]
    Extraction { message: String, url: String },

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ONDK installation verification failed")]
    VerificationFailed,
}

/// Result type alias for ondk-setup operations
pub type Result<T> = std::result::Result<T, SetupError>;

impl SetupError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SetupError::Io {
            path: path.into(),
            source,
        }
    }

    /// Classify this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            SetupError::UnsupportedPlatform(_) | SetupError::SdkRootNotSet { .. } => {
                ErrorCategory::Configuration
            }
            SetupError::VersionMismatch { .. } => ErrorCategory::VersionConflict,
            SetupError::Http { .. } | SetupError::Network { .. } => ErrorCategory::Transport,
            SetupError::Extraction { .. } | SetupError::Io { .. } => ErrorCategory::Filesystem,
            SetupError::VerificationFailed => ErrorCategory::Consistency,
        }
    }
}
