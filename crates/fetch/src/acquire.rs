//! The acquisition pipeline: cache check, fetch, unpack, locate, store.

use std::path::PathBuf;

use toolup_assets::{AssetDescriptor, DistHosts};
use toolup_core::Result;
use tracing::{debug, info};

use crate::cache::ToolCache;
use crate::download::Downloader;
use crate::extract::unpack;
use crate::locate::find_tool_root;

/// Drives the acquisition pipeline for individual assets.
///
/// Each [`acquire`](Acquirer::acquire) call is one linear sequence of
/// suspending operations with no internal fan-out. Concurrent requests for
/// the same (name, version) are not deduplicated; callers introducing
/// concurrency own that coordination, including exclusive use of the
/// extraction destination.
pub struct Acquirer {
    cache: ToolCache,
    downloader: Downloader,
    hosts: DistHosts,
    work_dir: PathBuf,
}

impl Acquirer {
    /// Create an acquirer using `work_dir` for downloads and extraction.
    #[must_use]
    pub fn new(work_dir: PathBuf) -> Self {
        Self {
            cache: ToolCache::default(),
            downloader: Downloader::default(),
            hosts: DistHosts::default(),
            work_dir,
        }
    }

    /// Use a specific cache instead of the default location.
    #[must_use]
    pub fn with_cache(mut self, cache: ToolCache) -> Self {
        self.cache = cache;
        self
    }

    /// Use a specific downloader (retry policy, timeout).
    #[must_use]
    pub fn with_downloader(mut self, downloader: Downloader) -> Self {
        self.downloader = downloader;
        self
    }

    /// Use specific distribution hosts (mirrors, tests).
    #[must_use]
    pub fn with_hosts(mut self, hosts: DistHosts) -> Self {
        self.hosts = hosts;
        self
    }

    /// Return the cached root for the asset, fetching it on a cache miss.
    ///
    /// On a hit the cached path comes back with zero network activity. On a
    /// miss the pipeline runs to completion before the cache entry is
    /// written, so a failed install never shows up as a hit for a later
    /// caller.
    pub async fn acquire(&self, asset: &AssetDescriptor) -> Result<PathBuf> {
        let (name, version) = (asset.name(), asset.version());
        if let Some(cached) = self.cache.find(name, version) {
            info!(name, version, path = %cached.display(), "tool already cached");
            return Ok(cached);
        }

        info!(name, version, "acquiring tool");
        let url = asset.download_url_with(&self.hosts);
        let archive = self.downloader.fetch(&url, &self.work_dir).await?;

        let dest = self.work_dir.join(asset.file_name_without_ext());
        let extracted = unpack(&archive, &dest, asset.file_ext())?;
        let root = find_tool_root(&extracted, asset.is_directory_nested())?;
        debug!(root = %root.display(), "located tool root");

        self.cache.store(name, version, &root)
    }
}
