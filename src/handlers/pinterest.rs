use crate::config::{Config, FolderLayout};
use crate::constants::PINTEREST_IMAGE_HANDLER;
use crate::error::{DownloaderError, Result};
use crate::fetch::{filename_from_url, HttpFetcher};
use crate::types::{host_of, DownloadOutcome, UrlHandler};
use reqwest::Url;
use scraper::{Html, Selector};
use tracing::{info, instrument};

/// Pull the `src` of the first `<img>` tag on a page.
fn first_image_src(page: &str) -> Option<String> {
    let document = Html::parse_document(page);
    let img_selector = Selector::parse("img").unwrap();
    document
        .select(&img_selector)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(str::to_string)
}

/// Pin pages embed the pinned picture as the page's first image tag.
pub struct PinterestImageHandler {
    fetcher: HttpFetcher,
}

impl PinterestImageHandler {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            fetcher: HttpFetcher::new(&config.http.user_agent, config.http.timeout_seconds)?,
        })
    }
}

#[async_trait::async_trait]
impl UrlHandler for PinterestImageHandler {
    fn handler_name(&self) -> &'static str {
        PINTEREST_IMAGE_HANDLER
    }

    fn matches(&self, url: &Url) -> bool {
        host_of(url).contains("pinterest.com")
    }

    #[instrument(skip(self, layout))]
    async fn download(&self, url: &Url, layout: &FolderLayout) -> Result<DownloadOutcome> {
        let page = self.fetcher.get_text(url.as_str()).await?;
        let img_url = first_image_src(&page).ok_or_else(|| DownloaderError::Scrape {
            message: format!("No image found on page {url}"),
        })?;

        info!("Downloading image: {}", img_url);
        let filename = filename_from_url(&img_url)?;
        let dest = layout.pictures.join(&filename);
        self.fetcher.download_to(&img_url, &dest).await?;
        info!("Image saved as {}", dest.display());

        Ok(DownloadOutcome {
            handler: self.handler_name(),
            destination: layout.pictures.clone(),
            files_saved: Some(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_img_src() {
        let page = r#"
            <html><body>
              <div class="pin">
                <img src="https://i.pinimg.com/736x/aa/bb/cc.jpg?fit=max" alt="pin"/>
                <img src="https://i.pinimg.com/736x/dd/ee/ff.jpg" alt="other"/>
              </div>
            </body></html>
        "#;
        assert_eq!(
            first_image_src(page).unwrap(),
            "https://i.pinimg.com/736x/aa/bb/cc.jpg?fit=max"
        );
    }

    #[test]
    fn no_img_tag_yields_none() {
        assert!(first_image_src("<html><body><p>nothing here</p></body></html>").is_none());
    }

    #[test]
    fn img_without_src_yields_none() {
        assert!(first_image_src(r#"<html><body><img alt="broken"/></body></html>"#).is_none());
    }
}
