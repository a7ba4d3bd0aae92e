use async_trait::async_trait;
use reqwest::header::{HeaderMap, LINK};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::AppResult;

/// One decoded page of a list endpoint and the URL of the page after it.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub items: Vec<Value>,
    pub next: Option<String>,
}

#[async_trait]
pub trait PageSource: Send + Sync {
    /// Returns `Ok(None)` when the server answered with an unsuccessful status.
    async fn fetch_page(&self, url: &str) -> AppResult<Option<Page>>;
}

/// What a walk does with the pages it already holds when a later page fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    KeepCollected,
    DiscardAll,
}

/// Follows `next` links from `start_url`, concatenating every page in order.
/// The first unsuccessful page ends the walk; `on_failure` decides whether the
/// pages gathered before it survive.
pub async fn collect_pages<T, S>(
    source: &S,
    start_url: &str,
    on_failure: OnFailure,
) -> AppResult<Vec<T>>
where
    T: DeserializeOwned + Send,
    S: PageSource + ?Sized,
{
    let mut items = Vec::new();
    let mut next = Some(start_url.to_string());

    while let Some(url) = next.take() {
        let Some(page) = source.fetch_page(&url).await? else {
            debug!(
                %url,
                collected = items.len(),
                ?on_failure,
                "stopping pagination on unsuccessful response"
            );
            if on_failure == OnFailure::DiscardAll {
                items.clear();
            }
            break;
        };
        for item in page.items {
            items.push(serde_json::from_value(item)?);
        }
        next = page.next;
    }

    Ok(items)
}

pub fn next_link(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(LINK)?.to_str().ok()?;
    parse_next_link(link)
}

/// Extracts the `rel="next"` target from a `Link` header value.
pub fn parse_next_link(link: &str) -> Option<String> {
    link.split(',')
        .map(str::trim)
        .find(|part| part.contains("rel=\"next\""))
        .and_then(|part| {
            let target = part.split(';').next()?.trim();
            let target = target.trim_start_matches('<').trim_end_matches('>');
            (!target.is_empty()).then(|| target.to_string())
        })
}
