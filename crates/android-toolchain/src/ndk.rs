//! ONDK Install
//!
//! The install directory and its version marker. The marker's trimmed
//! contents are the only record of what is installed.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use ondk_core::config::VERSION_FILE;
use ondk_core::{Result, SetupError};

/// Outcome of a verification that did not fail outright
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallState {
    /// No marker file; an install is needed
    Missing,
    /// Marker matches the expected version
    Installed,
}

/// ONDK install directory
#[derive(Debug, Clone)]
pub struct OndkInstall {
    path: PathBuf,
}

impl OndkInstall {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Install directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the version marker
    pub fn version_file(&self) -> PathBuf {
        self.path.join(VERSION_FILE)
    }

    /// Read the installed version, `None` when there is no marker
    pub async fn installed_version(&self) -> Result<Option<String>> {
        let version_file = self.version_file();

        match tokio::fs::read_to_string(&version_file).await {
            Ok(content) => Ok(Some(content.trim().to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SetupError::io(version_file, e)),
        }
    }

    /// Compare the installed version with `expected`.
    ///
    /// A different version is an error; the directory is left alone so the
    /// user decides what to do with it.
    pub async fn verify(&self, expected: &str) -> Result<InstallState> {
        let Some(actual) = self.installed_version().await? else {
            debug!("No {} in {:?}", VERSION_FILE, self.path);
            return Ok(InstallState::Missing);
        };

        if actual != expected {
            return Err(SetupError::VersionMismatch {
                expected: expected.to_string(),
                found: actual,
                path: self.path.clone(),
            });
        }

        debug!("ONDK {} present at {:?}", actual, self.path);
        Ok(InstallState::Installed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ondk_core::ErrorCategory;

    #[tokio::test]
    async fn test_missing_install() {
        let temp = tempfile::tempdir().unwrap();
        let install = OndkInstall::new(temp.path().join("ndk").join("ondk"));

        assert_eq!(install.verify("r29.5").await.unwrap(), InstallState::Missing);
    }

    #[tokio::test]
    async fn test_directory_without_marker() {
        let temp = tempfile::tempdir().unwrap();
        let install = OndkInstall::new(temp.path());

        assert_eq!(install.installed_version().await.unwrap(), None);
        assert_eq!(install.verify("r29.5").await.unwrap(), InstallState::Missing);
    }

    #[tokio::test]
    async fn test_matching_marker_is_trimmed() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join(VERSION_FILE), "  r29.5\n").unwrap();
        let install = OndkInstall::new(temp.path());

        assert_eq!(
            install.installed_version().await.unwrap().as_deref(),
            Some("r29.5")
        );
        assert_eq!(install.verify("r29.5").await.unwrap(), InstallState::Installed);
    }

    #[tokio::test]
    async fn test_mismatch_leaves_directory() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join(VERSION_FILE), "r28.1\n").unwrap();
        let install = OndkInstall::new(temp.path());

        let err = install.verify("r29.5").await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::VersionConflict);
        assert!(err.to_string().contains("expected r29.5, found r28.1"));
        assert!(install.version_file().exists());
    }
}
