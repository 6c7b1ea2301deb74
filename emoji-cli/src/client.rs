//! HTTP client that performs planned emoji downloads.
//!
//! One GET per download, against either the SVG asset itself or the
//! conversion endpoint. Failures are returned to the caller; there is no retry.

use std::path::{Path, PathBuf};

use emoji_core::DownloadPlan;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

/// Errors that can occur while downloading an emoji image.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The planned request URL is invalid.
    #[error("invalid download URL: {0}")]
    InvalidUrl(String),
    /// HTTP layer failed (connection, timeout, etc.).
    #[error("download request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("download of {url} failed with status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// Response status.
        status: StatusCode,
    },
    /// Writing the image to disk failed.
    #[error("failed to save image: {0}")]
    Io(#[from] std::io::Error),
}

/// Downloads images described by a [`DownloadPlan`].
#[derive(Debug, Clone)]
pub struct DownloadClient {
    http: Client,
}

impl DownloadClient {
    /// Create a new download client.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Http`] if the HTTP client fails to build.
    pub fn new() -> Result<Self, DownloadError> {
        let http = Client::builder()
            .user_agent(concat!("download-emoji/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }

    /// Fetch the image bytes for `plan`.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::InvalidUrl`] for a malformed request URL,
    /// [`DownloadError::Http`] for transport failures and
    /// [`DownloadError::Status`] for non-2xx responses.
    #[tracing::instrument(name = "fetch_emoji", skip(self, plan), fields(codepoint = %plan.codepoint, format = %plan.format))]
    pub async fn fetch(&self, plan: &DownloadPlan) -> Result<Vec<u8>, DownloadError> {
        let url = Url::parse(&plan.request_url)
            .map_err(|e| DownloadError::InvalidUrl(format!("{}: {e}", plan.request_url)))?;

        if plan.uses_conversion() {
            tracing::debug!("Requesting conversion of {}", plan.source_url);
        } else {
            tracing::debug!("Fetching source SVG directly");
        }

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                url: plan.request_url.clone(),
                status,
            });
        }

        let bytes = response.bytes().await?;
        tracing::debug!("Received {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }

    /// Write `bytes` to `<dir>/<file_name>`, creating `dir` if needed.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Io`] if the directory or file cannot be written.
    pub async fn save(
        &self,
        plan: &DownloadPlan,
        bytes: &[u8],
        dir: &Path,
    ) -> Result<PathBuf, DownloadError> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&plan.file_name);
        tokio::fs::write(&path, bytes).await?;
        tracing::info!("Saved {}", path.display());
        Ok(path)
    }

    /// Fetch and save in one step.
    ///
    /// # Errors
    ///
    /// See [`DownloadClient::fetch`] and [`DownloadClient::save`].
    pub async fn download(&self, plan: &DownloadPlan, dir: &Path) -> Result<PathBuf, DownloadError> {
        let bytes = self.fetch(plan).await?;
        self.save(plan, &bytes, dir).await
    }
}
