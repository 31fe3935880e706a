//! Error types shared across the toolup crates.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for toolup operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while acquiring a tool.
///
/// Transient download failures are retried with backoff inside the
/// downloader and only surface here as [`Error::DownloadExhausted`]; every
/// other variant propagates immediately and aborts the acquisition.
#[derive(Error, Debug)]
pub enum Error {
    /// Host OS is outside the supported set.
    #[error("platform '{0}' not supported")]
    UnsupportedPlatform(String),

    /// Host CPU has no published build on this platform.
    #[error("architecture '{arch}' not supported on {os}")]
    UnsupportedArch {
        /// The host OS identifier.
        os: String,
        /// The host CPU identifier.
        arch: String,
    },

    /// A single download attempt failed (transport error or bad status).
    #[error("download failed: {0}")]
    Download(String),

    /// Every download attempt failed.
    #[error("failed to download {url} after {attempts} attempts: {last_error}")]
    DownloadExhausted {
        /// The URL that was being fetched.
        url: String,
        /// Total number of attempts made.
        attempts: u32,
        /// Message of the final underlying failure.
        last_error: String,
    },

    /// Archive extension outside the closed set produced by `file_ext`.
    #[error("unknown archive extension: {0}")]
    UnsupportedFormat(String),

    /// Archive unpacking failed.
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// Extraction finished but the expected tool root is missing.
    #[error("tool directory not found: {}", .0.display())]
    ToolRootNotFound(PathBuf),

    /// Version string is neither a semantic version nor a nightly tag.
    #[error("invalid version: '{0}'")]
    InvalidVersion(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an unsupported platform error.
    #[must_use]
    pub fn unsupported_platform(os: impl Into<String>) -> Self {
        Self::UnsupportedPlatform(os.into())
    }

    /// Create an unsupported architecture error.
    #[must_use]
    pub fn unsupported_arch(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self::UnsupportedArch {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// Create a single-attempt download error.
    #[must_use]
    pub fn download(message: impl Into<String>) -> Self {
        Self::Download(message.into())
    }

    /// Create an exhausted-retries error wrapping the last failure.
    #[must_use]
    pub fn download_exhausted(url: impl Into<String>, attempts: u32, last_error: &Error) -> Self {
        Self::DownloadExhausted {
            url: url.into(),
            attempts,
            last_error: last_error.to_string(),
        }
    }

    /// Create an unsupported archive format error.
    #[must_use]
    pub fn unsupported_format(ext: impl Into<String>) -> Self {
        Self::UnsupportedFormat(ext.into())
    }

    /// Create an extraction error.
    #[must_use]
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction(message.into())
    }

    /// Create a missing tool root error.
    #[must_use]
    pub fn tool_root_not_found(extract_path: &Path) -> Self {
        Self::ToolRootNotFound(extract_path.to_path_buf())
    }

    /// Create an invalid version error.
    #[must_use]
    pub fn invalid_version(version: impl Into<String>) -> Self {
        Self::InvalidVersion(version.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_exhausted_carries_last_cause_and_count() {
        let last = Error::download("connection reset");
        let err = Error::download_exhausted("https://example.org/a.tar.gz", 5, &last);
        let message = err.to_string();
        assert!(message.contains("after 5 attempts"));
        assert!(message.contains("connection reset"));
    }

    #[test]
    fn tool_root_not_found_names_the_extraction_path() {
        let err = Error::tool_root_not_found(Path::new("/tmp/extract/compiler-4.0.5-linux64"));
        assert!(err.to_string().contains("compiler-4.0.5-linux64"));
    }
}
