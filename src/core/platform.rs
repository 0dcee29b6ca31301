//! Host platform detection
//!
//! Only the Darwin and Linux families are supported build hosts. Platform
//! names follow the `darwin*` / `linux*` convention, so `darwin21` and
//! `linux2` both resolve.

use super::error::{BootstrapError, Result};
use std::fmt;

/// Supported build host families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Darwin,
    Linux,
}

impl Platform {
    /// Resolve a platform name by family prefix
    pub fn from_name(name: &str) -> Result<Self> {
        if name.starts_with("darwin") {
            Ok(Self::Darwin)
        } else if name.starts_with("linux") {
            Ok(Self::Linux)
        } else {
            Err(BootstrapError::UnsupportedPlatform(name.to_string()))
        }
    }

    /// Detect the platform this process runs on
    pub fn current() -> Result<Self> {
        Self::from_name(host_platform_name())
    }

    /// File extension of shared libraries on this platform
    pub fn shared_lib_suffix(&self) -> &'static str {
        match self {
            Self::Darwin => "dylib",
            Self::Linux => "so",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Darwin => "darwin",
            Self::Linux => "linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Name of the host platform, using `darwin` for macOS
pub fn host_platform_name() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        other => other,
    }
}
