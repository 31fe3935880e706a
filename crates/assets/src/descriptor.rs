//! Per-asset naming and URL resolution.
//!
//! Every platform quirk for each asset family lives here, expressed as
//! explicit matches per variant so the branching stays auditable.

use serde::{Deserialize, Serialize};
use toolup_core::{Os, Platform};

/// Distribution endpoints for release and nightly builds.
///
/// Overridable for mirrors and for tests; the defaults point at the public
/// channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistHosts {
    /// Base URL of the release host.
    pub release: String,
    /// Base URL of the nightly build channel.
    pub nightly: String,
}

impl Default for DistHosts {
    fn default() -> Self {
        Self {
            release: "https://github.com/toolup-dist".to_string(),
            nightly: "https://build.toolup-dist.org/builds".to_string(),
        }
    }
}

/// Asset family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "lowercase")]
pub enum AssetKind {
    /// The compiler, from the release or nightly channel.
    Compiler {
        /// Whether this is a nightly build rather than a release.
        nightly: bool,
    },
    /// The runtime the compiler depends on.
    Runtime,
}

/// A requested tool: family, version, and the platform it must run on.
///
/// Immutable once constructed. Everything else — URL, file name, archive
/// extension, nesting — is derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    kind: AssetKind,
    version: String,
    platform: Platform,
}

impl AssetDescriptor {
    /// Describe a compiler build.
    #[must_use]
    pub fn compiler(version: impl Into<String>, nightly: bool, platform: Platform) -> Self {
        Self {
            kind: AssetKind::Compiler { nightly },
            version: version.into(),
            platform,
        }
    }

    /// Describe a runtime build.
    #[must_use]
    pub fn runtime(version: impl Into<String>, platform: Platform) -> Self {
        Self {
            kind: AssetKind::Runtime,
            version: version.into(),
            platform,
        }
    }

    /// Asset family name; the first half of the cache key.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self.kind {
            AssetKind::Compiler { .. } => "compiler",
            AssetKind::Runtime => "runtime",
        }
    }

    /// Requested version; the second half of the cache key.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The platform this asset was resolved for.
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Archive extension for the platform; independent of asset family.
    #[must_use]
    pub fn file_ext(&self) -> &'static str {
        match self.platform.os {
            Os::Windows => ".zip",
            Os::Linux | Os::Macos => ".tar.gz",
        }
    }

    /// Target token embedded in release file names.
    #[must_use]
    pub fn target(&self) -> String {
        let os = self.platform.os;
        match self.kind {
            AssetKind::Runtime => {
                // No 64-bit runtime 2.1 build was ever published for Windows.
                if os == Os::Windows && self.version.starts_with("2.1") {
                    os.to_string()
                } else if os == Os::Macos && self.version.starts_with("2.4") {
                    // 2.4 ships a single universal binary on macOS.
                    "macos-universal".to_string()
                } else {
                    self.platform.to_string()
                }
            }
            AssetKind::Compiler { .. } => {
                // One universal compiler build per release on macOS; 3.x
                // only ships 32-bit on Windows, matching its runtime.
                if os == Os::Macos || (os == Os::Windows && self.version.starts_with("3.")) {
                    os.to_string()
                } else {
                    self.platform.to_string()
                }
            }
        }
    }

    /// Platform key on the nightly build channel.
    ///
    /// The nightly channel predates the release naming scheme and keeps its
    /// own per-platform directory names.
    #[must_use]
    pub fn nightly_target(&self) -> &'static str {
        match self.platform.os {
            Os::Macos => "mac",
            Os::Linux => "linux64",
            Os::Windows => "windows64",
        }
    }

    /// Expected file and top-level directory name, without extension.
    #[must_use]
    pub fn file_name_without_ext(&self) -> String {
        match self.kind {
            // The nightly tag already encodes the platform.
            AssetKind::Compiler { nightly: true } => format!("compiler_{}", self.version),
            AssetKind::Compiler { nightly: false } | AssetKind::Runtime => {
                format!("{}-{}-{}", self.name(), self.version, self.target())
            }
        }
    }

    /// Resolve the download URL against the default distribution hosts.
    #[must_use]
    pub fn download_url(&self) -> String {
        self.download_url_with(&DistHosts::default())
    }

    /// Resolve the download URL against explicit distribution hosts.
    #[must_use]
    pub fn download_url_with(&self, hosts: &DistHosts) -> String {
        let file = self.file_name_without_ext();
        let ext = self.file_ext();
        match self.kind {
            AssetKind::Compiler { nightly: true } => {
                format!(
                    "{}/compiler/{}/{file}{ext}",
                    hosts.nightly,
                    self.nightly_target()
                )
            }
            AssetKind::Compiler { nightly: false } => {
                format!(
                    "{}/compiler/releases/download/{}/{file}{ext}",
                    hosts.release, self.version
                )
            }
            AssetKind::Runtime => {
                // Runtime release tags are dash-separated: 2.4.0 -> v2-4-0.
                let tag = format!("v{}", self.version.replace('.', "-"));
                format!(
                    "{}/runtime/releases/download/{tag}/{file}{ext}",
                    hosts.release
                )
            }
        }
    }

    /// Whether the archive wraps the tool root in one generated directory.
    ///
    /// Both families currently do; the extracted tree looks like
    /// `compiler-4.0.5-linux64/compiler_20191217082701_67feaceb/...`.
    #[must_use]
    pub fn is_directory_nested(&self) -> bool {
        match self.kind {
            AssetKind::Compiler { .. } | AssetKind::Runtime => true,
        }
    }
}

/// Runtime version required by a compiler version.
///
/// Compiler 3.x only works with runtime 2.1; every other version needs 2.4,
/// which is also the first runtime with a 64-bit Windows build. This is a
/// compatibility rule, not an implementation detail.
#[must_use]
pub fn runtime_version_for(compiler_version: &str) -> &'static str {
    if compiler_version.starts_with("3.") {
        "2.1.0"
    } else {
        "2.4.0"
    }
}
