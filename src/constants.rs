/// Handler name constants to ensure consistency across the codebase

// Handler names (used in dispatch, logging and the `list` command)
pub const YOUTUBE_VIDEO_HANDLER: &str = "youtube_video";
pub const YOUTUBE_PLAYLIST_HANDLER: &str = "youtube_playlist";
pub const PINTEREST_IMAGE_HANDLER: &str = "pinterest_image";
pub const WILDBERRIES_PRODUCT_HANDLER: &str = "wildberries_product";

/// Get all supported handler names, in dispatch precedence order
pub fn supported_handlers() -> Vec<&'static str> {
    vec![
        YOUTUBE_PLAYLIST_HANDLER,
        YOUTUBE_VIDEO_HANDLER,
        PINTEREST_IMAGE_HANDLER,
        WILDBERRIES_PRODUCT_HANDLER,
    ]
}

// Directory layout under the root
pub const SYSTEM_DIR: &str = "system";
pub const DOWNLOADS_DIR: &str = "Downloads";
pub const VIDEOS_DIR: &str = "Videos";
pub const PLAYLIST_DIR: &str = "Playlist Videos";
pub const PICTURES_DIR: &str = "Pictures";
pub const WILDBERRIES_DIR: &str = "Wildberries";

pub const DOWNLOAD_LIST_FILE: &str = "download-list.txt";
pub const CONFIG_FILE: &str = "config.toml";

// HTTP defaults
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

// Wildberries CDN defaults
pub const DEFAULT_WB_HOST_SCAN_LIMIT: u32 = 100;
pub const DEFAULT_WB_PROBE_TIMEOUT_SECONDS: u64 = 5;
pub const DEFAULT_YT_DLP_BIN: &str = "yt-dlp";
