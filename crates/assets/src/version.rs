//! Requested-version validation and nightly-tag detection.

use std::sync::OnceLock;

use regex::Regex;
use semver::Version;
use toolup_core::{Error, Result};

/// A validated version request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedVersion {
    /// A released semantic version, normalized (no leading `v` or `=`).
    Release(String),
    /// A nightly tag: date_branch_hash, or the literal `latest`.
    Nightly(String),
}

impl ResolvedVersion {
    /// The version string to use in file names and cache keys.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Release(v) | Self::Nightly(v) => v,
        }
    }

    /// Whether this request targets the nightly channel.
    #[must_use]
    pub fn is_nightly(&self) -> bool {
        matches!(self, Self::Nightly(_))
    }
}

fn nightly_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Hard-coded pattern, compilation cannot fail.
    #[allow(clippy::expect_used)]
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{4}-\d{2}-\d{2}_[\w.-]+_\w+)|latest$").expect("nightly pattern compiles")
    })
}

/// Whether the requested version names a nightly build.
#[must_use]
pub fn is_nightly(version: &str) -> bool {
    nightly_pattern().is_match(version)
}

/// Validate a requested version string.
///
/// Nightly tags pass through untouched; anything else must clean up into a
/// valid semantic version or the request is rejected before any network
/// activity happens.
pub fn resolve(input: &str) -> Result<ResolvedVersion> {
    let trimmed = input.trim();
    if is_nightly(trimmed) {
        return Ok(ResolvedVersion::Nightly(trimmed.to_string()));
    }

    let cleaned = trimmed.trim_start_matches(['v', '=']).trim();
    Version::parse(cleaned)
        .map(|version| ResolvedVersion::Release(version.to_string()))
        .map_err(|_| Error::invalid_version(input))
}
