use crate::config::{Config, FolderLayout};
use crate::constants::{YOUTUBE_PLAYLIST_HANDLER, YOUTUBE_VIDEO_HANDLER};
use crate::error::{DownloaderError, Result};
use crate::types::{host_of, DownloadOutcome, UrlHandler};
use reqwest::Url;
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use tokio::process::Command;
use tracing::{info, instrument};

/// Argument list for a yt-dlp invocation writing into `folder`.
fn ytdlp_args(folder: &Path, url: &str, playlist: bool) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-f".into(),
        "best".into(),
        "--no-warnings".into(),
        "--merge-output-format".into(),
        "mp4".into(),
    ];
    if playlist {
        args.push("--yes-playlist".into());
    }
    args.push("-o".into());
    args.push(folder.join("%(title)s.%(ext)s").into_os_string());
    args.push(url.into());
    args
}

async fn run_ytdlp(bin: &str, folder: &Path, url: &str, playlist: bool) -> Result<()> {
    fs::create_dir_all(folder)?;
    let status = Command::new(bin)
        .args(ytdlp_args(folder, url, playlist))
        .status()
        .await
        .map_err(|e| DownloaderError::Tool {
            message: format!("Failed to start {bin}: {e}"),
        })?;
    if !status.success() {
        return Err(DownloaderError::Tool {
            message: format!("{bin} exited with status {status} for {url}"),
        });
    }
    Ok(())
}

fn is_youtube_host(host: &str) -> bool {
    host.contains("youtube.com") || host.contains("youtu.be")
}

/// Single videos go through yt-dlp into the Videos folder.
pub struct YoutubeVideoHandler {
    bin: String,
}

impl YoutubeVideoHandler {
    pub fn new(config: &Config) -> Self {
        Self {
            bin: config.tools.yt_dlp.clone(),
        }
    }
}

#[async_trait::async_trait]
impl UrlHandler for YoutubeVideoHandler {
    fn handler_name(&self) -> &'static str {
        YOUTUBE_VIDEO_HANDLER
    }

    fn matches(&self, url: &Url) -> bool {
        is_youtube_host(&host_of(url))
    }

    #[instrument(skip(self, layout))]
    async fn download(&self, url: &Url, layout: &FolderLayout) -> Result<DownloadOutcome> {
        info!("Downloading YouTube video: {}", url);
        run_ytdlp(&self.bin, &layout.videos, url.as_str(), false).await?;
        Ok(DownloadOutcome {
            handler: self.handler_name(),
            destination: layout.videos.clone(),
            files_saved: None,
        })
    }
}

/// Playlist links carry `youtube.com/playlist` in the URL and fan out into
/// their own folder.
pub struct YoutubePlaylistHandler {
    bin: String,
}

impl YoutubePlaylistHandler {
    pub fn new(config: &Config) -> Self {
        Self {
            bin: config.tools.yt_dlp.clone(),
        }
    }
}

#[async_trait::async_trait]
impl UrlHandler for YoutubePlaylistHandler {
    fn handler_name(&self) -> &'static str {
        YOUTUBE_PLAYLIST_HANDLER
    }

    fn matches(&self, url: &Url) -> bool {
        url.as_str().contains("youtube.com/playlist")
    }

    #[instrument(skip(self, layout))]
    async fn download(&self, url: &Url, layout: &FolderLayout) -> Result<DownloadOutcome> {
        info!("Downloading YouTube playlist: {}", url);
        run_ytdlp(&self.bin, &layout.playlists, url.as_str(), true).await?;
        Ok(DownloadOutcome {
            handler: self.handler_name(),
            destination: layout.playlists.clone(),
            files_saved: None,
        })
    }
}
