//! Setup Configuration
//!
//! Where ONDK comes from and where it goes:
//! - SDK root environment variables
//! - Release host URL
//! - Install directory layout

use std::ffi::OsString;

/// Default release host for ONDK archives
pub const DEFAULT_RELEASE_URL: &str = "https://github.com/topjohnwu/ondk/releases/download";

/// Environment variable overriding the release host
pub const RELEASE_URL_ENV: &str = "ONDK_RELEASE_URL";

/// Primary SDK root variable
pub const SDK_ROOT_ENV: &str = "ANDROID_HOME";

/// Fallback SDK root variable
pub const SDK_ROOT_FALLBACK_ENV: &str = "ANDROID_SDK_ROOT";

/// Marker file holding the installed version
pub const VERSION_FILE: &str = "ONDK_VERSION";

/// Archive and extracted folder prefix
pub const ARCHIVE_PREFIX: &str = "ondk";

/// Install directory, relative to the SDK root
pub const INSTALL_SUBDIR: [&str; 2] = ["ndk", "ondk"];

/// Setup configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupConfig {
    /// Variable consulted first for the SDK root
    pub sdk_root_var: String,
    /// Variable consulted when the primary one is unset or empty
    pub sdk_root_fallback_var: String,
    /// Base URL; archives live at `<release_url>/<version>/<archive>`
    pub release_url: String,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            sdk_root_var: SDK_ROOT_ENV.to_string(),
            sdk_root_fallback_var: SDK_ROOT_FALLBACK_ENV.to_string(),
            release_url: DEFAULT_RELEASE_URL.to_string(),
        }
    }
}

impl SetupConfig {
    /// Build the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(RELEASE_URL_ENV) {
            let url = url.to_string_lossy().trim().to_string();
            if !url.is_empty() {
                config.release_url = url;
            }
        }

        config
    }

    /// Release base URL without a trailing slash
    pub fn release_base(&self) -> &str {
        self.release_url.trim_end_matches('/')
    }
}
