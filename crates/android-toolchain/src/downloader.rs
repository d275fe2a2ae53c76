//! ONDK Downloader
//!
//! Downloads an ONDK release and streams it straight into the extractor,
//! then moves the extracted folder into the install location.

use std::io;
use std::path::{Path, PathBuf};

use futures::TryStreamExt;
use reqwest::Client;
use tokio_util::io::{StreamReader, SyncIoBridge};
use tracing::{debug, info, warn};

use ondk_core::config::ARCHIVE_PREFIX;
use ondk_core::{Result, SetupConfig, SetupError};

use crate::extract;
use crate::platform::Platform;

/// Sibling name an existing install is parked under while being replaced
const REPLACED_DIR: &str = ".ondk.replaced";

/// ONDK release downloader
pub struct OndkDownloader {
    client: Client,
    release_url: String,
}

impl OndkDownloader {
    /// Create a downloader for the configured release host
    pub fn new(config: &SetupConfig) -> Result<Self> {
        let release_url = config.release_base().to_string();
        let client = Client::builder()
            .user_agent(concat!("ondk-setup/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SetupError::Network {
                message: format!("failed to create HTTP client: {e}"),
                url: release_url.clone(),
            })?;

        Ok(Self {
            client,
            release_url,
        })
    }

    /// `ondk-<version>-<platform>.tar.xz`
    pub fn archive_name(version: &str, platform: Platform) -> String {
        format!("{ARCHIVE_PREFIX}-{version}-{platform}.tar.xz")
    }

    /// Folder the archive expands to
    pub fn extracted_dir_name(version: &str) -> String {
        format!("{ARCHIVE_PREFIX}-{version}")
    }

    /// Download URL for a version and platform
    pub fn download_url(&self, version: &str, platform: Platform) -> String {
        format!(
            "{}/{}/{}",
            self.release_url,
            version,
            Self::archive_name(version, platform)
        )
    }

    /// Download, extract and move ONDK `version` into `install_dir`
    pub async fn install(&self, version: &str, platform: Platform, install_dir: &Path) -> Result<()> {
        let url = self.download_url(version, platform);

        info!("Downloading {}...", Self::archive_name(version, platform));
        info!("URL: {}", url);

        let parent = install_dir.parent().ok_or_else(|| {
            SetupError::io(
                install_dir,
                io::Error::new(io::ErrorKind::InvalidInput, "install path has no parent"),
            )
        })?;
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| SetupError::io(parent, e))?;

        self.fetch_and_unpack(&url, parent).await?;

        let extracted = parent.join(Self::extracted_dir_name(version));
        if replace_dir(&extracted, install_dir).await? {
            info!("ONDK {} installed to {}", version, install_dir.display());
        }

        Ok(())
    }

    /// Stream `url` through the xz/tar extractor into `dest`
    async fn fetch_and_unpack(&self, url: &str, dest: &Path) -> Result<usize> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| network_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SetupError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        debug!("Response {} with {:?} bytes", status, response.content_length());

        let stream = response.bytes_stream().map_err(io::Error::other);
        let reader = SyncIoBridge::new(StreamReader::new(Box::pin(stream)));
        let dest = dest.to_path_buf();

        let unpacked = tokio::task::spawn_blocking(move || extract::unpack_tar_xz(reader, &dest))
            .await
            .map_err(|e| SetupError::Extraction {
                message: e.to_string(),
                url: url.to_string(),
            })?;

        unpacked.map_err(|e| SetupError::Extraction {
            message: e.to_string(),
            url: url.to_string(),
        })
    }
}

fn network_error(url: &str, error: &reqwest::Error) -> SetupError {
    let message = std::error::Error::source(error)
        .map(|source| source.to_string())
        .unwrap_or_else(|| error.to_string());

    SetupError::Network {
        message,
        url: url.to_string(),
    }
}

/// Move `extracted` to `target`, replacing whatever is there.
///
/// The old install is renamed aside first and only removed once the new one
/// is in place; if the final rename fails it is restored. Returns `false`
/// when `extracted` does not exist.
pub async fn replace_dir(extracted: &Path, target: &Path) -> Result<bool> {
    if !path_exists(extracted).await? {
        warn!("Archive did not contain {}", extracted.display());
        return Ok(false);
    }

    if !path_exists(target).await? {
        rename(extracted, target).await?;
        return Ok(true);
    }

    let parked = parked_path(target);
    if path_exists(&parked).await? {
        remove_dir(&parked).await?;
    }
    rename(target, &parked).await?;

    if let Err(e) = rename(extracted, target).await {
        if let Err(restore) = tokio::fs::rename(&parked, target).await {
            warn!("Could not restore {}: {}", target.display(), restore);
        }
        return Err(e);
    }

    remove_dir(&parked).await?;
    Ok(true)
}

fn parked_path(target: &Path) -> PathBuf {
    target.with_file_name(REPLACED_DIR)
}

async fn path_exists(path: &Path) -> Result<bool> {
    tokio::fs::try_exists(path)
        .await
        .map_err(|e| SetupError::io(path, e))
}

async fn rename(from: &Path, to: &Path) -> Result<()> {
    debug!("Renaming {:?} to {:?}", from, to);
    tokio::fs::rename(from, to)
        .await
        .map_err(|e| SetupError::io(from, e))
}

async fn remove_dir(path: &Path) -> Result<()> {
    tokio::fs::remove_dir_all(path)
        .await
        .map_err(|e| SetupError::io(path, e))
}
