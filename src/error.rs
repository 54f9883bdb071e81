use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DownloaderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Not a valid URL: {0}")]
    InvalidUrl(String),

    #[error("Download list not found: {}", .0.display())]
    ListMissing(PathBuf),

    #[error("External tool error: {message}")]
    Tool { message: String },

    #[error("Scrape failed: {message}")]
    Scrape { message: String },
}

pub type Result<T> = std::result::Result<T, DownloaderError>;
