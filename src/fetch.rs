use crate::error::{DownloaderError, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// Thin wrapper around a shared `reqwest::Client` carrying the configured
/// user agent and timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent.to_string())
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self { client })
    }

    /// GET a page body as text. Non-2xx statuses are errors.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    /// GET and decode a JSON document, treating transport errors, non-2xx
    /// statuses and undecodable bodies all as "not here". Used by host
    /// probing, where any failure just means the next candidate is tried.
    pub async fn try_get_json<T: DeserializeOwned>(&self, url: &str) -> Option<T> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!("Probe request failed for {}: {}", url, e);
                return None;
            }
        };
        if !response.status().is_success() {
            debug!("Probe got status {} for {}", response.status().as_u16(), url);
            return None;
        }
        match response.json::<T>().await {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Probe body at {} was not decodable: {}", url, e);
                None
            }
        }
    }

    /// GET a file and write it to `dest`, returning the number of bytes saved.
    pub async fn download_to(&self, url: &str, dest: &Path) -> Result<u64> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(dest, &bytes)?;
        debug!("Saved {} bytes to {}", bytes.len(), dest.display());
        Ok(bytes.len() as u64)
    }
}

/// Derive a plain filename from a media URL: last path segment with any
/// query string or fragment stripped.
pub fn filename_from_url(url: &str) -> Result<String> {
    let without_fragment = url.split('#').next().unwrap_or(url);
    let without_query = without_fragment.split('?').next().unwrap_or(without_fragment);
    let after_scheme = without_query
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(without_query);
    let name = match after_scheme.split_once('/') {
        Some((_, path)) => path.rsplit('/').next().unwrap_or(""),
        None => "",
    };
    if name.is_empty() {
        return Err(DownloaderError::Scrape {
            message: format!("No usable filename in URL: {url}"),
        });
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_strips_query_string() {
        let name = filename_from_url("https://i.pinimg.com/736x/ab/cd/ef.jpg?w=200&h=100").unwrap();
        assert_eq!(name, "ef.jpg");
    }

    #[test]
    fn filename_strips_fragment() {
        let name = filename_from_url("https://example.com/pics/photo.png#top").unwrap();
        assert_eq!(name, "photo.png");
    }

    #[test]
    fn filename_plain_url() {
        let name = filename_from_url("https://example.com/a/b/image.webp").unwrap();
        assert_eq!(name, "image.webp");
    }

    #[test]
    fn filename_rejects_trailing_slash() {
        assert!(filename_from_url("https://example.com/pics/").is_err());
    }

    #[test]
    fn filename_rejects_bare_host() {
        assert!(filename_from_url("https://example.com").is_err());
    }
}
