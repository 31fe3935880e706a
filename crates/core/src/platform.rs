//! Host platform identification and normalization.
//!
//! Host OS/CPU state is captured once into a [`HostEnv`] and passed
//! explicitly; components never read ambient host state themselves. This
//! keeps resolution deterministic under test across simulated platforms.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Operating system token used in asset file names and download URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    /// Linux.
    Linux,
    /// Windows.
    Windows,
    /// macOS.
    Macos,
}

impl std::fmt::Display for Os {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::Windows => write!(f, "windows"),
            Self::Macos => write!(f, "macos"),
        }
    }
}

/// CPU architecture marker.
///
/// Only 64-bit builds are published; anything else fails resolution in
/// [`HostEnv::arch`] rather than falling back silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arch {
    /// 64-bit, rendered as the `64` suffix in target tokens.
    #[serde(rename = "64")]
    X64,
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X64 => write!(f, "64"),
        }
    }
}

/// Raw host OS/CPU identification.
///
/// Construct with [`HostEnv::current`] at the process boundary, or with
/// explicit values in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnv {
    os: String,
    arch: String,
}

impl HostEnv {
    /// Capture the current host.
    #[must_use]
    pub fn current() -> Self {
        Self::new(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Build from explicit OS/CPU identifiers (`std::env::consts` values).
    #[must_use]
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// Resolve the normalized platform token.
    pub fn os(&self) -> Result<Os> {
        match self.os.as_str() {
            "linux" => Ok(Os::Linux),
            "windows" => Ok(Os::Windows),
            "macos" => Ok(Os::Macos),
            other => Err(Error::unsupported_platform(other)),
        }
    }

    /// Resolve the 64-bit architecture marker.
    ///
    /// x86-64 resolves everywhere. arm64 resolves only on macOS, where the
    /// published binaries are universal; every other CPU fails fast.
    pub fn arch(&self) -> Result<Arch> {
        match self.arch.as_str() {
            "x86_64" => Ok(Arch::X64),
            "aarch64" if matches!(self.os(), Ok(Os::Macos)) => Ok(Arch::X64),
            other => Err(Error::unsupported_arch(&self.os, other)),
        }
    }
}

/// A fully resolved (OS, architecture) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platform {
    /// Operating system.
    pub os: Os,
    /// CPU architecture.
    pub arch: Arch,
}

impl Platform {
    /// Create a platform from already-resolved parts.
    #[must_use]
    pub fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// Resolve the platform for a host environment.
    pub fn from_env(env: &HostEnv) -> Result<Self> {
        Ok(Self {
            os: env.os()?,
            arch: env.arch()?,
        })
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.os, self.arch)
    }
}
