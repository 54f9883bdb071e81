use crate::constants::{
    CONFIG_FILE, DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT, DEFAULT_WB_HOST_SCAN_LIMIT,
    DEFAULT_WB_PROBE_TIMEOUT_SECONDS, DEFAULT_YT_DLP_BIN, DOWNLOADS_DIR, DOWNLOAD_LIST_FILE,
    PICTURES_DIR, PLAYLIST_DIR, SYSTEM_DIR, VIDEOS_DIR, WILDBERRIES_DIR,
};
use crate::error::{DownloaderError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub http: HttpConfig,
    pub tools: ToolsConfig,
    pub wildberries: WildberriesConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root directory for the download tree; current dir when unset.
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub yt_dlp: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            yt_dlp: DEFAULT_YT_DLP_BIN.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WildberriesConfig {
    pub host_scan_limit: u32,
    pub probe_timeout_seconds: u64,
}

impl Default for WildberriesConfig {
    fn default() -> Self {
        Self {
            host_scan_limit: DEFAULT_WB_HOST_SCAN_LIMIT,
            probe_timeout_seconds: DEFAULT_WB_PROBE_TIMEOUT_SECONDS,
        }
    }
}

impl Config {
    /// Load `config.toml` from the current directory, falling back to
    /// defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let config_content = fs::read_to_string(path).map_err(|e| {
            DownloaderError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}

/// The directory tree every download pass works against.
#[derive(Debug, Clone)]
pub struct FolderLayout {
    pub root: PathBuf,
    pub system: PathBuf,
    pub downloads: PathBuf,
    pub videos: PathBuf,
    pub playlists: PathBuf,
    pub pictures: PathBuf,
    pub wildberries: PathBuf,
}

impl FolderLayout {
    pub fn new(root: PathBuf) -> Self {
        let system = root.join(SYSTEM_DIR);
        let downloads = root.join(DOWNLOADS_DIR);
        let videos = downloads.join(VIDEOS_DIR);
        let playlists = videos.join(PLAYLIST_DIR);
        let pictures = downloads.join(PICTURES_DIR);
        let wildberries = pictures.join(WILDBERRIES_DIR);
        Self {
            root,
            system,
            downloads,
            videos,
            playlists,
            pictures,
            wildberries,
        }
    }

    /// Resolve the layout root from config, falling back to the current dir.
    pub fn from_config(config: &Config) -> Result<Self> {
        let root = match &config.paths.root {
            Some(root) => root.clone(),
            None => std::env::current_dir()?,
        };
        Ok(Self::new(root))
    }

    /// Create the whole tree. Playlist and Wildberries dirs imply their parents.
    pub fn ensure(&self) -> Result<()> {
        fs::create_dir_all(&self.system)?;
        fs::create_dir_all(&self.playlists)?;
        fs::create_dir_all(&self.wildberries)?;
        Ok(())
    }

    pub fn download_list_path(&self) -> PathBuf {
        self.system.join(DOWNLOAD_LIST_FILE)
    }
}
