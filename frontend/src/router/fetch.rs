//! Fetch routing strategy.
//!
//! Sections are standalone HTML documents under [`PAGES_BASE`]. A page is
//! fetched once, its `<title>` and content region are extracted, and the
//! result is cached by URL for the rest of the session. Failed fetches are
//! not cached, so the next visit retries.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::config::{DEFAULT_PAGE, PAGES_BASE, PAGE_QUERY_PARAM, SITE_NAME};
use crate::types::{AppResult, Page, Route};

use super::{link_path, AfterSwap, ContentSource, HistoryEvent};

/// A fetched and parsed page document.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchedPage {
    pub title: String,
    /// Inner markup of the content region.
    pub content: String,
    /// The whole document as received.
    pub raw: String,
}

/// Loads a page document and extracts its content region.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> AppResult<FetchedPage>;
}

/// Session cache of fetched pages, keyed by URL.
#[derive(Debug, Default)]
pub struct PageCache {
    entries: RefCell<HashMap<String, Rc<FetchedPage>>>,
}

impl PageCache {
    pub fn get(&self, url: &str) -> Option<Rc<FetchedPage>> {
        self.entries.borrow().get(url).cloned()
    }

    pub fn insert(&self, url: String, page: Rc<FetchedPage>) {
        self.entries.borrow_mut().insert(url, page);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

/// Routes between page documents fetched over HTTP.
pub struct FetchSource<F> {
    fetcher: F,
    cache: PageCache,
    origin: String,
}

impl<F: PageFetcher> FetchSource<F> {
    /// `origin` is the site's own origin; links elsewhere are not routed.
    pub fn new(fetcher: F, origin: impl Into<String>) -> Self {
        Self {
            fetcher,
            cache: PageCache::default(),
            origin: origin.into(),
        }
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    pub fn page_url(&self, key: &str) -> String {
        format!("{}{}", PAGES_BASE, key)
    }
}

impl<F: PageFetcher> ContentSource for FetchSource<F> {
    const AFTER_SWAP: AfterSwap = AfterSwap::ScrollTop;
    const HISTORY_EVENT: HistoryEvent = HistoryEvent::PopState;

    fn key_from_location(&self, _hash: &str, search: &str) -> String {
        page_key_from_query(search).unwrap_or_else(|| DEFAULT_PAGE.to_string())
    }

    fn key_for_href(&self, href: &str) -> Option<String> {
        page_key_for_href(href, &self.origin)
    }

    fn href_for(&self, route: Route) -> String {
        format!("{}.html", route.slug())
    }

    fn history_url(&self, key: &str) -> String {
        format!("?{}={}", PAGE_QUERY_PARAM, key)
    }

    async fn load(&self, key: &str) -> AppResult<Page> {
        let url = self.page_url(key);
        let fetched = match self.cache.get(&url) {
            Some(hit) => {
                log::debug!("Page cache hit: {}", url);
                hit
            }
            None => {
                log::info!("Fetching {}", url);
                let page = Rc::new(self.fetcher.fetch(&url).await?);
                self.cache.insert(url, Rc::clone(&page));
                page
            }
        };

        let title = if fetched.title.trim().is_empty() {
            SITE_NAME.to_string()
        } else {
            fetched.title.clone()
        };

        Ok(Page {
            key: key.to_string(),
            title,
            content: fetched.content.clone(),
            route: Route::from_slug(key.trim_end_matches(".html")),
        })
    }
}

/// Page key for a link, if it points at a same-origin `.html` document.
///
/// Only the file name is kept; every page lives under [`PAGES_BASE`].
/// `index.html` maps to [`DEFAULT_PAGE`].
pub fn page_key_for_href(href: &str, origin: &str) -> Option<String> {
    let mut path = link_path(href);
    if !origin.is_empty() {
        if let Some(rest) = path.strip_prefix(origin) {
            if !rest.is_empty() && !rest.starts_with('/') {
                return None;
            }
            path = rest;
        }
    }
    if path.starts_with("//") || path.contains(':') {
        return None;
    }

    let name = path.rsplit('/').next()?;
    if !is_page_name(name) {
        return None;
    }
    if name == "index.html" {
        return Some(DEFAULT_PAGE.to_string());
    }
    Some(name.to_string())
}

/// Page key carried in the query string, e.g. `?page=projetos.html`.
pub fn page_key_from_query(search: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == PAGE_QUERY_PARAM)
        .map(|(_, value)| value)
        .filter(|value| is_page_name(value))
        .map(str::to_string)
}

fn is_page_name(name: &str) -> bool {
    name.len() > ".html".len()
        && name.ends_with(".html")
        && !name.contains(['/', '\\'])
        && !name.starts_with('.')
}
