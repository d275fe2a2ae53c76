//! ondk-setup Core - Configuration and shared types
//!
//! This crate holds what every stage of the setup pipeline agrees on:
//! the error taxonomy and the configuration (environment names, release
//! host, install layout).

pub mod config;
pub mod error;

pub use config::SetupConfig;
pub use error::{ErrorCategory, Result, SetupError};

/// ondk-setup version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
