use crate::config::FolderLayout;
use crate::error::Result;
use reqwest::Url;
use std::path::PathBuf;

/// Outcome of a single handled URL.
#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    pub handler: &'static str,
    /// Directory the content was written under.
    pub destination: PathBuf,
    /// Number of files saved by this crate; `None` when an external tool
    /// manages its own output files.
    pub files_saved: Option<usize>,
}

/// Core trait every site-specific download handler must implement
#[async_trait::async_trait]
pub trait UrlHandler: Send + Sync {
    /// Unique identifier for this handler
    fn handler_name(&self) -> &'static str;

    /// Whether this handler claims the given URL
    fn matches(&self, url: &Url) -> bool;

    /// Fetch the content behind `url` into the layout's directories
    async fn download(&self, url: &Url, layout: &FolderLayout) -> Result<DownloadOutcome>;
}

/// Lower-cased host of a URL; empty string when the URL has no host.
pub fn host_of(url: &Url) -> String {
    url.host_str().unwrap_or("").to_ascii_lowercase()
}
