//! SDK Location
//!
//! Finds the Android SDK root from the environment and derives the ONDK
//! install directory beneath it.

use std::ffi::OsString;
use std::path::PathBuf;
use tracing::debug;

use ondk_core::config::INSTALL_SUBDIR;
use ondk_core::{Result, SetupConfig, SetupError};

/// Resolved SDK root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkLocation {
    sdk_root: PathBuf,
}

impl SdkLocation {
    /// Resolve from the process environment
    pub fn from_env(config: &SetupConfig) -> Result<Self> {
        Self::resolve(config, |key| std::env::var_os(key))
    }

    /// Resolve using `lookup` for variable access.
    ///
    /// The primary variable wins unless it is unset or empty.
    pub fn resolve<F>(config: &SetupConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let root = [&config.sdk_root_var, &config.sdk_root_fallback_var]
            .into_iter()
            .find_map(|var| {
                lookup(var.as_str())
                    .filter(|value| !value.is_empty())
                    .map(|value| (var, value))
            });

        let Some((var, value)) = root else {
            return Err(SetupError::SdkRootNotSet {
                var: config.sdk_root_var.clone(),
            });
        };

        let path = PathBuf::from(value);
        let sdk_root = std::path::absolute(&path).map_err(|e| SetupError::io(&path, e))?;
        debug!("SDK root from {}: {:?}", var, sdk_root);

        Ok(Self { sdk_root })
    }

    /// Create from a known SDK root
    pub fn new(sdk_root: impl Into<PathBuf>) -> Self {
        Self {
            sdk_root: sdk_root.into(),
        }
    }

    /// SDK root directory
    pub fn sdk_root(&self) -> &PathBuf {
        &self.sdk_root
    }

    /// `<sdk_root>/ndk/ondk`
    pub fn install_dir(&self) -> PathBuf {
        INSTALL_SUBDIR
            .iter()
            .fold(self.sdk_root.clone(), |path, part| path.join(part))
    }
}
