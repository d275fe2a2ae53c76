//! Host Platform
//!
//! Maps the host operating system onto the platform names used in ONDK
//! release archives.

use std::fmt;

use ondk_core::{Result, SetupError};

/// Platforms ONDK publishes archives for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Darwin,
    Linux,
    Windows,
}

impl Platform {
    /// Resolve an OS name as reported by the host.
    ///
    /// Matching is case-insensitive. MinGW and Cygwin report names such as
    /// `MINGW64_NT-10.0` and resolve to Windows. `macos` is what
    /// [`std::env::consts::OS`] reports for Apple hosts.
    pub fn from_os_name(name: &str) -> Result<Self> {
        let system = name.to_lowercase();
        match system.as_str() {
            "darwin" | "macos" => Ok(Platform::Darwin),
            "linux" => Ok(Platform::Linux),
            "windows" => Ok(Platform::Windows),
            s if s.contains("mingw") || s.contains("cygwin") => Ok(Platform::Windows),
            _ => Err(SetupError::UnsupportedPlatform(system)),
        }
    }

    /// Resolve the platform this binary is running on
    pub fn host() -> Result<Self> {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Name used in archive file names
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Darwin => "darwin",
            Platform::Linux => "linux",
            Platform::Windows => "windows",
        }
    }

    /// All supported platforms
    pub fn all() -> &'static [Platform] {
        &[Platform::Darwin, Platform::Linux, Platform::Windows]
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ondk_core::ErrorCategory;

    #[test]
    fn test_recognized_names() {
        assert_eq!(Platform::from_os_name("Darwin").unwrap(), Platform::Darwin);
        assert_eq!(Platform::from_os_name("macos").unwrap(), Platform::Darwin);
        assert_eq!(Platform::from_os_name("Linux").unwrap(), Platform::Linux);
        assert_eq!(Platform::from_os_name("Windows").unwrap(), Platform::Windows);
        assert_eq!(
            Platform::from_os_name("MINGW64_NT-10.0-19045").unwrap(),
            Platform::Windows
        );
        assert_eq!(
            Platform::from_os_name("CYGWIN_NT-10.0").unwrap(),
            Platform::Windows
        );
    }

    #[test]
    fn test_unrecognized_name() {
        let err = Platform::from_os_name("FreeBSD").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.to_string(), "Unsupported platform: freebsd");
    }

    #[test]
    fn test_archive_names() {
        let names: Vec<_> = Platform::all().iter().map(|p| p.to_string()).collect();
        assert_eq!(names, ["darwin", "linux", "windows"]);
    }

    #[cfg(any(target_os = "linux", target_os = "macos", windows))]
    #[test]
    fn test_host_resolves() {
        assert!(Platform::host().is_ok());
    }
}
