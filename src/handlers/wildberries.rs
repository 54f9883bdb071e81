use crate::config::{Config, FolderLayout};
use crate::constants::WILDBERRIES_PRODUCT_HANDLER;
use crate::error::{DownloaderError, Result};
use crate::fetch::HttpFetcher;
use crate::types::{host_of, DownloadOutcome, UrlHandler};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use serde::Deserialize;
use std::fs;
use tracing::{info, instrument, warn};

static CATALOG_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/catalog/(\d+)/").unwrap());

/// Characters Windows forbids in file names; stripped from product names.
const FORBIDDEN_NAME_CHARS: &str = "\\/:*?\"<>|";

/// Product card document served from the basket CDN.
#[derive(Debug, Deserialize)]
struct ProductCard {
    imt_name: Option<String>,
    #[serde(default)]
    media: MediaInfo,
}

#[derive(Debug, Default, Deserialize)]
struct MediaInfo {
    #[serde(default)]
    photo_count: u32,
}

/// CDN addressing for a product: the card and its images live under a
/// volume/part prefix derived from the numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ProductLocation {
    id: u64,
    vol: u64,
    part: u64,
}

impl ProductLocation {
    fn from_id(id: u64) -> Self {
        Self {
            id,
            vol: id / 100_000,
            part: id / 1_000,
        }
    }

    fn basket_host(host_index: u32) -> String {
        format!("https://basket-{host_index:02}.wbbasket.ru")
    }

    fn card_url(&self, host_index: u32) -> String {
        format!(
            "{}/vol{}/part{}/{}/info/ru/card.json",
            Self::basket_host(host_index),
            self.vol,
            self.part,
            self.id
        )
    }

    fn image_url(&self, host_index: u32, image_index: u32) -> String {
        format!(
            "{}/vol{}/part{}/{}/images/big/{}.webp",
            Self::basket_host(host_index),
            self.vol,
            self.part,
            self.id,
            image_index
        )
    }
}

fn parse_product_id(url: &str) -> Option<u64> {
    CATALOG_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Strip characters that cannot appear in a folder name; fall back to a
/// `wb_<id>` name when nothing printable remains.
fn sanitize_product_name(name: &str, id: u64) -> String {
    let safe: String = name
        .chars()
        .filter(|c| !FORBIDDEN_NAME_CHARS.contains(*c))
        .collect();
    let safe = safe.trim().to_string();
    if safe.is_empty() {
        format!("wb_{id}")
    } else {
        safe
    }
}

/// Fetches every catalog image of a product. The serving CDN host is not
/// derivable from the URL, so hosts `basket-00` upward are probed until one
/// returns the product card; that same host serves the image files.
pub struct WildberriesHandler {
    probe_fetcher: HttpFetcher,
    image_fetcher: HttpFetcher,
    host_scan_limit: u32,
}

impl WildberriesHandler {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            probe_fetcher: HttpFetcher::new(
                &config.http.user_agent,
                config.wildberries.probe_timeout_seconds,
            )?,
            image_fetcher: HttpFetcher::new(&config.http.user_agent, config.http.timeout_seconds)?,
            host_scan_limit: config.wildberries.host_scan_limit,
        })
    }

    async fn probe_card(&self, location: ProductLocation) -> Option<(u32, ProductCard)> {
        for host_index in 0..self.host_scan_limit {
            let card_url = location.card_url(host_index);
            if let Some(card) = self.probe_fetcher.try_get_json::<ProductCard>(&card_url).await {
                info!("Product card found on basket-{:02}", host_index);
                return Some((host_index, card));
            }
        }
        None
    }
}

#[async_trait::async_trait]
impl UrlHandler for WildberriesHandler {
    fn handler_name(&self) -> &'static str {
        WILDBERRIES_PRODUCT_HANDLER
    }

    fn matches(&self, url: &Url) -> bool {
        host_of(url).contains("wildberries.ru")
    }

    #[instrument(skip(self, layout))]
    async fn download(&self, url: &Url, layout: &FolderLayout) -> Result<DownloadOutcome> {
        let id = parse_product_id(url.as_str()).ok_or_else(|| {
            DownloaderError::MissingField(format!("product id in URL {url}"))
        })?;
        let location = ProductLocation::from_id(id);

        let (host_index, card) =
            self.probe_card(location)
                .await
                .ok_or_else(|| DownloaderError::Scrape {
                    message: format!(
                        "No basket host served the card for product {id} (scanned {})",
                        self.host_scan_limit
                    ),
                })?;

        let name = sanitize_product_name(card.imt_name.as_deref().unwrap_or(""), id);
        let product_folder = layout.wildberries.join(&name);
        fs::create_dir_all(&product_folder)?;

        let photo_count = card.media.photo_count;
        if photo_count == 0 {
            return Err(DownloaderError::Scrape {
                message: format!("Product {id} reports no images"),
            });
        }

        info!("Fetching {} images for \"{}\"", photo_count, name);
        let mut saved = 0;
        for image_index in 1..=photo_count {
            let img_url = location.image_url(host_index, image_index);
            let dest = product_folder.join(format!("{image_index}.webp"));
            match self.image_fetcher.download_to(&img_url, &dest).await {
                Ok(_) => {
                    saved += 1;
                    info!("Saved {}", dest.display());
                }
                Err(e) => {
                    // A missing frame is not worth losing the rest over
                    warn!("Failed to download {}: {}", img_url, e);
                }
            }
        }

        Ok(DownloadOutcome {
            handler: self.handler_name(),
            destination: product_folder,
            files_saved: Some(saved),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_product_id_from_catalog_url() {
        let id = parse_product_id("https://www.wildberries.ru/catalog/123456789/detail.aspx");
        assert_eq!(id, Some(123456789));
    }

    #[test]
    fn missing_catalog_segment_yields_none() {
        assert_eq!(parse_product_id("https://www.wildberries.ru/brands/nike"), None);
    }

    #[test]
    fn location_math_matches_cdn_scheme() {
        let location = ProductLocation::from_id(123456789);
        assert_eq!(location.vol, 1234);
        assert_eq!(location.part, 123456);
    }

    #[test]
    fn card_url_is_zero_padded_and_prefixed() {
        let location = ProductLocation::from_id(123456789);
        assert_eq!(
            location.card_url(7),
            "https://basket-07.wbbasket.ru/vol1234/part123456/123456789/info/ru/card.json"
        );
    }

    #[test]
    fn image_url_targets_big_webp() {
        let location = ProductLocation::from_id(200300);
        assert_eq!(
            location.image_url(12, 3),
            "https://basket-12.wbbasket.ru/vol2/part200/200300/images/big/3.webp"
        );
    }

    #[test]
    fn sanitize_strips_forbidden_characters() {
        assert_eq!(
            sanitize_product_name("Кроссовки \"Nike\" 42/43", 1),
            "Кроссовки Nike 4243"
        );
    }

    #[test]
    fn sanitize_falls_back_when_nothing_remains() {
        assert_eq!(sanitize_product_name("***???", 555), "wb_555");
        assert_eq!(sanitize_product_name("", 555), "wb_555");
    }

    #[test]
    fn card_decodes_with_missing_fields() {
        let card: ProductCard = serde_json::from_value(json!({})).unwrap();
        assert!(card.imt_name.is_none());
        assert_eq!(card.media.photo_count, 0);

        let card: ProductCard = serde_json::from_value(json!({
            "imt_name": "Чайник",
            "media": { "photo_count": 4 }
        }))
        .unwrap();
        assert_eq!(card.imt_name.as_deref(), Some("Чайник"));
        assert_eq!(card.media.photo_count, 4);
    }
}
