//! Retrying HTTP downloader.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use tokio::time::sleep;
use toolup_core::{Error, Result, RetryPolicy};
use tracing::{debug, info, warn};

/// Default per-attempt timeout for a download request.
pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_millis(60_000);

/// HTTP downloader with bounded retry and exponential backoff.
///
/// Each attempt re-fetches from scratch; there is no partial-download
/// resume. The per-attempt timeout bounds the whole request and is
/// independent of the backoff delay between attempts.
pub struct Downloader {
    client: Client,
    policy: RetryPolicy,
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new(RetryPolicy::default(), DEFAULT_DOWNLOAD_TIMEOUT)
    }
}

impl Downloader {
    /// Create a downloader with the given retry policy and per-attempt
    /// timeout.
    ///
    /// # Panics
    ///
    /// `reqwest::Client` construction only fails when the TLS backend
    /// cannot initialize, which indicates a broken environment rather than
    /// a recoverable condition.
    #[must_use]
    pub fn new(policy: RetryPolicy, timeout: Duration) -> Self {
        #[allow(clippy::expect_used)]
        let client = Client::builder()
            .user_agent("toolup")
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client - TLS backend initialization failed");
        Self { client, policy }
    }

    /// The retry policy this downloader runs under.
    #[must_use]
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetch `url` into `dest_dir`, retrying transient failures.
    ///
    /// Transport errors and non-2xx statuses are retried with exponential
    /// backoff until the policy's attempt budget is spent; the backoff
    /// delay is applied between attempts only, never after the last one.
    /// Returns the path of the downloaded file.
    pub async fn fetch(&self, url: &str, dest_dir: &Path) -> Result<PathBuf> {
        info!(%url, "downloading");

        let mut last_error = Error::download("no attempts made");
        for attempt in 1..=self.policy.max_attempts {
            debug!(%url, attempt, max_attempts = self.policy.max_attempts, "download attempt");
            match self.try_fetch(url, dest_dir).await {
                Ok(path) => {
                    info!(%url, attempt, path = %path.display(), "download succeeded");
                    return Ok(path);
                }
                Err(error) => {
                    warn!(%url, attempt, %error, "download attempt failed");
                    last_error = error;
                    if attempt < self.policy.max_attempts {
                        let delay = self.policy.delay_after(attempt);
                        debug!(?delay, "waiting before retrying");
                        sleep(delay).await;
                    }
                }
            }
        }

        Err(Error::download_exhausted(
            url,
            self.policy.max_attempts,
            &last_error,
        ))
    }

    /// One download attempt: GET the URL and write the body next to the
    /// other in-flight artifacts in `dest_dir`.
    async fn try_fetch(&self, url: &str, dest_dir: &Path) -> Result<PathBuf> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::download(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::download(format!(
                "unexpected status {} for {url}",
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::download(e.to_string()))?;

        tokio::fs::create_dir_all(dest_dir).await?;
        let file_name = url.rsplit('/').next().unwrap_or("download");
        let path = dest_dir.join(file_name);
        tokio::fs::write(&path, &body).await?;
        Ok(path)
    }
}
