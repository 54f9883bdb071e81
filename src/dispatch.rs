use crate::config::Config;
use crate::error::Result;
use crate::handlers::pinterest::PinterestImageHandler;
use crate::handlers::wildberries::WildberriesHandler;
use crate::handlers::youtube::{YoutubePlaylistHandler, YoutubeVideoHandler};
use crate::types::UrlHandler;
use reqwest::Url;

/// Build the handler registry in dispatch precedence order. The playlist
/// rule must come before the plain video rule: a playlist URL also matches
/// the YouTube host check.
pub fn build_handlers(config: &Config) -> Result<Vec<Box<dyn UrlHandler>>> {
    Ok(vec![
        Box::new(YoutubePlaylistHandler::new(config)),
        Box::new(YoutubeVideoHandler::new(config)),
        Box::new(PinterestImageHandler::new(config)?),
        Box::new(WildberriesHandler::new(config)?),
    ])
}

/// First handler claiming the URL, or `None` for unsupported sites.
pub fn route<'a>(handlers: &'a [Box<dyn UrlHandler>], url: &Url) -> Option<&'a dyn UrlHandler> {
    handlers
        .iter()
        .find(|handler| handler.matches(url))
        .map(|handler| handler.as_ref())
}
