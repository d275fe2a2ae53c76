//! CLI commands for ondk-setup
//!
//! The setup run: locate, verify, install when missing, verify again.

use std::path::PathBuf;
use tracing::info;

use ondk_android_toolchain::{InstallState, OndkDownloader, OndkInstall, Platform, SdkLocation};
use ondk_core::{Result, SetupConfig, SetupError};

/// Setup command options
pub struct SetupCommand {
    /// Requested ONDK version, e.g. `r29.5`
    pub version: String,
}

impl SetupCommand {
    /// Execute against the process environment, returning the install path
    pub async fn execute(&self) -> Result<PathBuf> {
        let config = SetupConfig::from_env();
        let location = SdkLocation::from_env(&config)?;
        self.run(&config, &location).await
    }

    /// Execute with an explicit configuration and SDK location
    pub async fn run(&self, config: &SetupConfig, location: &SdkLocation) -> Result<PathBuf> {
        let install = OndkInstall::new(location.install_dir());

        if install.verify(&self.version).await? == InstallState::Installed {
            return Ok(install.path().to_path_buf());
        }

        info!("ONDK {} not found at {}", self.version, install.path().display());

        let platform = Platform::host()?;
        let downloader = OndkDownloader::new(config)?;
        downloader
            .install(&self.version, platform, install.path())
            .await?;

        match install.verify(&self.version).await? {
            InstallState::Installed => Ok(install.path().to_path_buf()),
            InstallState::Missing => Err(SetupError::VerificationFailed),
        }
    }
}
