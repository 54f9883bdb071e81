use crate::error::{DownloaderError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

/// Pattern a line must match before it is accepted into the list.
static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^https?://\S+$").unwrap());

/// Outcome of an `add` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyListed,
}

/// Plain-text download queue, one URL per line.
pub struct DownloadList {
    path: PathBuf,
}

impl DownloadList {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Read all pending URLs. Blank lines are skipped; surrounding
    /// whitespace is trimmed.
    pub fn load(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Err(DownloaderError::ListMissing(self.path.clone()));
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Validate and append a URL, creating the file if needed. Duplicates
    /// are left alone and reported as such.
    pub fn add(&self, url: &str) -> Result<AddOutcome> {
        let url = url.trim();
        if !URL_RE.is_match(url) {
            return Err(DownloaderError::InvalidUrl(url.to_string()));
        }

        let existing = match self.load() {
            Ok(urls) => urls,
            Err(DownloaderError::ListMissing(_)) => Vec::new(),
            Err(e) => return Err(e),
        };
        if existing.iter().any(|line| line == url) {
            debug!("Duplicate link ignored: {}", url);
            return Ok(AddOutcome::AlreadyListed);
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{url}")?;
        info!("Link added to download list: {}", url);
        Ok(AddOutcome::Added)
    }

    /// Truncate the list. Run after a download pass completes.
    pub fn clear(&self) -> Result<()> {
        fs::write(&self.path, "")?;
        debug!("Download list cleared: {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn list_in_tempdir() -> (tempfile::TempDir, DownloadList) {
        let dir = tempdir().unwrap();
        let list = DownloadList::new(dir.path().join("system").join("download-list.txt"));
        (dir, list)
    }

    #[test]
    fn add_creates_file_and_appends() {
        let (_dir, list) = list_in_tempdir();
        let outcome = list.add("https://youtube.com/watch?v=abc").unwrap();
        assert_eq!(outcome, AddOutcome::Added);
        assert_eq!(list.load().unwrap(), vec!["https://youtube.com/watch?v=abc"]);
    }

    #[test]
    fn add_rejects_non_urls() {
        let (_dir, list) = list_in_tempdir();
        assert!(matches!(
            list.add("not a url"),
            Err(DownloaderError::InvalidUrl(_))
        ));
        assert!(matches!(
            list.add("https://has whitespace.com/x"),
            Err(DownloaderError::InvalidUrl(_))
        ));
    }

    #[test]
    fn add_detects_duplicates() {
        let (_dir, list) = list_in_tempdir();
        list.add("https://example.com/a").unwrap();
        let outcome = list.add("https://example.com/a").unwrap();
        assert_eq!(outcome, AddOutcome::AlreadyListed);
        assert_eq!(list.load().unwrap().len(), 1);
    }

    #[test]
    fn load_skips_blank_lines() {
        let (_dir, list) = list_in_tempdir();
        fs::create_dir_all(list.path().parent().unwrap()).unwrap();
        fs::write(list.path(), "https://a.com/1\n\n  \nhttps://b.com/2\n").unwrap();
        assert_eq!(list.load().unwrap(), vec!["https://a.com/1", "https://b.com/2"]);
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let (_dir, list) = list_in_tempdir();
        assert!(matches!(
            list.load(),
            Err(DownloaderError::ListMissing(_))
        ));
    }

    #[test]
    fn clear_empties_the_list() {
        let (_dir, list) = list_in_tempdir();
        list.add("https://example.com/a").unwrap();
        list.clear().unwrap();
        assert!(list.load().unwrap().is_empty());
    }
}
