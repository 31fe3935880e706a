//! Local cache of installed tool roots, keyed by name and version.

use std::path::{Path, PathBuf};

use toolup_core::Result;
use tracing::debug;

/// Key-to-path store for acquired tools.
///
/// Default location: `~/.cache/toolup/tools`, laid out as
/// `<root>/<name>/<version>`. Entries are written once and never
/// invalidated or deleted: a published version string is immutable, and
/// nightly tags embed a timestamp and hash so the same assumption holds
/// for them.
#[derive(Debug, Clone)]
pub struct ToolCache {
    root: PathBuf,
}

impl Default for ToolCache {
    fn default() -> Self {
        let root = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from(".cache"))
            .join("toolup")
            .join("tools");
        Self::new(root)
    }
}

impl ToolCache {
    /// Create a cache rooted at the given directory.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The cache root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a (name, version) entry occupies when present.
    #[must_use]
    pub fn entry_path(&self, name: &str, version: &str) -> PathBuf {
        self.root.join(name).join(version)
    }

    /// Look up an existing entry. Pure filesystem check, no network.
    #[must_use]
    pub fn find(&self, name: &str, version: &str) -> Option<PathBuf> {
        let path = self.entry_path(name, version);
        if path.exists() {
            debug!(name, version, path = %path.display(), "cache hit");
            Some(path)
        } else {
            None
        }
    }

    /// Register a located tool root under (name, version).
    ///
    /// Copies the tree into the cache; the source stays untouched. Returns
    /// the canonical cached path.
    pub fn store(&self, name: &str, version: &str, source_root: &Path) -> Result<PathBuf> {
        let dest = self.entry_path(name, version);
        if source_root.is_dir() {
            copy_tree(source_root, &dest)?;
        } else {
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(source_root, &dest)?;
        }
        debug!(name, version, path = %dest.display(), "cached tool root");
        Ok(dest)
    }
}

fn copy_tree(src: &Path, dest: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dest)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn find_misses_before_store() {
        let tmp = TempDir::new().unwrap();
        let cache = ToolCache::new(tmp.path().join("cache"));
        assert!(cache.find("compiler", "4.0.5").is_none());
    }

    #[test]
    fn store_then_find_round_trips_a_directory_root() {
        let tmp = TempDir::new().unwrap();
        let cache = ToolCache::new(tmp.path().join("cache"));

        let source = tmp.path().join("tool-root");
        std::fs::create_dir_all(source.join("bin")).unwrap();
        std::fs::write(source.join("bin/run"), b"#!/bin/sh\n").unwrap();

        let stored = cache.store("compiler", "4.0.5", &source).unwrap();
        assert_eq!(stored, cache.entry_path("compiler", "4.0.5"));
        assert!(stored.join("bin/run").is_file());

        assert_eq!(cache.find("compiler", "4.0.5"), Some(stored));
        // The source is left in place for the caller to clean up.
        assert!(source.join("bin/run").is_file());
    }

    #[test]
    fn store_handles_a_single_file_root() {
        let tmp = TempDir::new().unwrap();
        let cache = ToolCache::new(tmp.path().join("cache"));

        let source = tmp.path().join("tool.bin");
        std::fs::write(&source, b"binary").unwrap();

        let stored = cache.store("runtime", "2.4.0", &source).unwrap();
        assert!(stored.is_file());
        assert!(cache.find("runtime", "2.4.0").is_some());
    }

    #[test]
    fn entries_are_keyed_by_name_and_version() {
        let tmp = TempDir::new().unwrap();
        let cache = ToolCache::new(tmp.path().to_path_buf());
        assert_eq!(
            cache.entry_path("runtime", "2.4.0"),
            tmp.path().join("runtime").join("2.4.0")
        );
    }
}
