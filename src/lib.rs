//! ondk-setup
//!
//! Installs ONDK, a repackaged Android NDK, into `$ANDROID_HOME/ndk/ondk`
//! and prints the install path for build scripts to consume.
//!
//! ## Pipeline
//!
//! 1. Resolve the SDK root from `ANDROID_HOME` or `ANDROID_SDK_ROOT`
//! 2. Check the `ONDK_VERSION` marker of an existing install
//! 3. When missing, download `ondk-<version>-<platform>.tar.xz` and unpack it
//! 4. Check the marker again and report the path
//!
//! ## Crates
//!
//! - `ondk-core`: configuration and error types
//! - `ondk-android-toolchain`: platform, location, verification, download

#![warn(clippy::all)]

pub mod commands;

pub use ondk_android_toolchain as toolchain;
pub use ondk_core as shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::commands::SetupCommand;
    pub use ondk_android_toolchain::{InstallState, OndkDownloader, OndkInstall, Platform, SdkLocation};
    pub use ondk_core::{ErrorCategory, SetupConfig, SetupError};
}
