use crate::config::{Config, FolderLayout};
use crate::dispatch::{build_handlers, route};
use crate::error::Result;
use crate::list::DownloadList;
use crate::types::{DownloadOutcome, UrlHandler};
use reqwest::Url;
use tracing::{error, info, instrument, warn};

/// Result of a complete download pass over the list
#[derive(Debug)]
pub struct RunSummary {
    pub total: usize,
    pub completed: usize,
    pub unsupported: usize,
    pub errors: Vec<String>,
    pub outcomes: Vec<DownloadOutcome>,
}

impl RunSummary {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.unsupported == 0
    }
}

pub struct Runner {
    handlers: Vec<Box<dyn UrlHandler>>,
    layout: FolderLayout,
    list: DownloadList,
}

impl Runner {
    pub fn new(config: &Config, layout: FolderLayout) -> Result<Self> {
        let list = DownloadList::new(layout.download_list_path());
        Ok(Self {
            handlers: build_handlers(config)?,
            layout,
            list,
        })
    }

    pub fn list(&self) -> &DownloadList {
        &self.list
    }

    /// Route a single URL string to its handler name, if any.
    pub fn handler_name_for(&self, url: &str) -> Option<&'static str> {
        let url = Url::parse(url).ok()?;
        route(&self.handlers, &url).map(|handler| handler.handler_name())
    }

    /// Process every URL in the list sequentially. Unsupported URLs and
    /// per-URL failures are recorded and never abort the pass. The list is
    /// cleared afterwards unless `keep_list` is set.
    #[instrument(skip(self))]
    pub async fn run(&self, keep_list: bool) -> Result<RunSummary> {
        let urls = self.list.load()?;
        let mut summary = RunSummary {
            total: urls.len(),
            completed: 0,
            unsupported: 0,
            errors: Vec::new(),
            outcomes: Vec::new(),
        };

        if urls.is_empty() {
            info!("Download list is empty, nothing to do");
            return Ok(summary);
        }

        info!("Starting download pass over {} URLs", urls.len());
        for (i, raw_url) in urls.iter().enumerate() {
            println!("[{}/{}] {}", i + 1, urls.len(), raw_url);

            let url = match Url::parse(raw_url) {
                Ok(url) => url,
                Err(e) => {
                    error!("Unparseable URL {}: {}", raw_url, e);
                    summary.errors.push(format!("{raw_url}: not a valid URL ({e})"));
                    continue;
                }
            };

            let Some(handler) = route(&self.handlers, &url) else {
                warn!("Unsupported URL: {}", raw_url);
                println!("   Site not supported, skipping");
                summary.unsupported += 1;
                continue;
            };

            info!(handler = handler.handler_name(), "Dispatching {}", raw_url);
            match handler.download(&url, &self.layout).await {
                Ok(outcome) => {
                    match outcome.files_saved {
                        Some(n) => println!(
                            "   ✅ {} file(s) saved under {}",
                            n,
                            outcome.destination.display()
                        ),
                        None => println!("   ✅ Saved under {}", outcome.destination.display()),
                    }
                    summary.completed += 1;
                    summary.outcomes.push(outcome);
                }
                Err(e) => {
                    error!(handler = handler.handler_name(), "Download failed: {}", e);
                    println!("   ❌ {e}");
                    summary.errors.push(format!("{raw_url}: {e}"));
                }
            }
        }

        if keep_list {
            info!("Keeping download list as requested");
        } else {
            self.list.clear()?;
        }

        info!(
            "Download pass finished: {} completed, {} unsupported, {} errors",
            summary.completed,
            summary.unsupported,
            summary.errors.len()
        );
        Ok(summary)
    }
}
