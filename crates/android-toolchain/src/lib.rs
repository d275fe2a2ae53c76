//! Android Toolchain Management
//!
//! Handles the ONDK (a repackaged Android NDK) pieces of setup:
//! - Host platform resolution
//! - SDK root lookup
//! - Install verification
//! - Download and extraction

pub mod downloader;
pub mod env;
pub mod extract;
pub mod ndk;
pub mod platform;

pub use downloader::OndkDownloader;
pub use env::SdkLocation;
pub use extract::ExtractError;
pub use ndk::{InstallState, OndkInstall};
pub use platform::Platform;
