//! Content routing.
//!
//! A [`ContentSource`] turns a navigation key into a [`Page`]. The
//! [`Navigator`] numbers every request so that only the most recent one is
//! applied when several are in flight.
//!
//! # Strategies
//!
//! - [`TemplateSource`] - hash keys, markup generated in memory (default)
//! - [`FetchSource`] - page files fetched from [`PAGES_BASE`] and cached for
//!   the session (`fetch-pages` feature)
//!
//! [`PAGES_BASE`]: crate::config::PAGES_BASE

pub mod fetch;
pub mod templates;

pub use fetch::*;
pub use templates::*;

use std::cell::Cell;

use crate::types::{AppError, AppResult, HistoryState, Page, Route};

/// What to do with the content region once new markup is in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AfterSwap {
    /// Move keyboard focus into the region.
    FocusRegion,
    /// Scroll the window back to the top.
    ScrollTop,
}

/// Window event that signals history traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryEvent {
    HashChange,
    PopState,
}

/// How an applied navigation touches browser history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavMode {
    /// New entry (link click).
    Push,
    /// Overwrite the current entry (initial load).
    Replace,
    /// Leave history alone (back/forward, typed hash).
    Traverse,
}

/// Resolves navigation keys to page content.
#[allow(async_fn_in_trait)]
pub trait ContentSource {
    const AFTER_SWAP: AfterSwap;
    const HISTORY_EVENT: HistoryEvent;

    /// Key for the address currently in the location bar.
    fn key_from_location(&self, hash: &str, search: &str) -> String;

    /// Key for an intercepted link, or `None` to let the browser handle it.
    fn key_for_href(&self, href: &str) -> Option<String>;

    /// Link target used by the navigation bar.
    fn href_for(&self, route: Route) -> String;

    /// URL written to the address bar for `key`.
    fn history_url(&self, key: &str) -> String;

    async fn load(&self, key: &str) -> AppResult<Page>;
}

/// Identifies one navigation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavTicket(u64);

/// Result of resolving a navigation request.
#[derive(Debug)]
pub enum NavOutcome {
    Ready(Page),
    /// A newer navigation started while this one was loading.
    Stale,
    Failed(AppError),
}

/// Sequences navigations over a [`ContentSource`].
pub struct Navigator<S> {
    source: S,
    latest: Cell<u64>,
}

impl<S: ContentSource> Navigator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            latest: Cell::new(0),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Start a navigation. Any earlier ticket becomes stale.
    pub fn begin(&self) -> NavTicket {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        NavTicket(next)
    }

    pub fn is_current(&self, ticket: NavTicket) -> bool {
        ticket.0 == self.latest.get()
    }

    /// Load `key` for `ticket`.
    ///
    /// Errors of superseded requests are reported as [`NavOutcome::Stale`]
    /// too; nobody is waiting for them any more.
    pub async fn resolve(&self, ticket: NavTicket, key: &str) -> NavOutcome {
        let result = self.source.load(key).await;
        if !self.is_current(ticket) {
            log::debug!("Discarding stale navigation to {}", key);
            return NavOutcome::Stale;
        }
        match result {
            Ok(page) => NavOutcome::Ready(page),
            Err(e) => NavOutcome::Failed(e),
        }
    }
}

/// Key to show after history traversal.
///
/// The key recorded with the history entry wins; entries without one
/// (typed URLs, the first page of the session) fall back to the address.
pub fn traversal_key<S: ContentSource>(
    source: &S,
    state: Option<HistoryState>,
    hash: &str,
    search: &str,
) -> String {
    state
        .map(|state| state.key)
        .filter(|key| !key.is_empty())
        .unwrap_or_else(|| source.key_from_location(hash, search))
}

/// Whether a link click should be routed in-app: the anchor carries the
/// `data-route` marker or points at an `.html` document.
pub fn should_intercept(has_route_marker: bool, href: &str) -> bool {
    has_route_marker || link_path(href).ends_with(".html")
}

/// `href` without its query string and fragment.
pub fn link_path(href: &str) -> &str {
    let end = href.find(['?', '#']).unwrap_or(href.len());
    &href[..end]
}

#[cfg(not(feature = "fetch-pages"))]
pub type ActiveSource = TemplateSource;

#[cfg(feature = "fetch-pages")]
pub type ActiveSource = FetchSource<crate::services::HttpPageFetcher>;

/// The strategy selected at build time.
#[cfg(not(feature = "fetch-pages"))]
pub fn active_source() -> ActiveSource {
    TemplateSource
}

/// The strategy selected at build time.
#[cfg(feature = "fetch-pages")]
pub fn active_source() -> ActiveSource {
    let origin = gloo_utils::window().location().origin().unwrap_or_default();
    FetchSource::new(crate::services::HttpPageFetcher::new(crate::config::CONTENT_REGION_ID), origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    /// Serves `#home` and fails every other key.
    struct OfflineSource;

    impl ContentSource for OfflineSource {
        const AFTER_SWAP: AfterSwap = AfterSwap::ScrollTop;
        const HISTORY_EVENT: HistoryEvent = HistoryEvent::PopState;

        fn key_from_location(&self, hash: &str, _search: &str) -> String {
            hash.to_string()
        }

        fn key_for_href(&self, href: &str) -> Option<String> {
            Some(href.to_string())
        }

        fn href_for(&self, route: Route) -> String {
            format!("#{}", route.slug())
        }

        fn history_url(&self, key: &str) -> String {
            key.to_string()
        }

        async fn load(&self, key: &str) -> AppResult<Page> {
            if key != "#home" {
                return Err(AppError::Network(format!("{} unreachable", key)));
            }
            Ok(Page {
                key: key.to_string(),
                title: "Início".to_string(),
                content: "<h1>Início</h1>".to_string(),
                route: Some(Route::Home),
            })
        }
    }

    #[test]
    fn test_latest_navigation_wins() {
        let nav = Navigator::new(TemplateSource);
        let first = nav.begin();
        let second = nav.begin();

        assert!(matches!(block_on(nav.resolve(first, "#projetos")), NavOutcome::Stale));
        match block_on(nav.resolve(second, "#cadastro")) {
            NavOutcome::Ready(page) => assert_eq!(page.route, Some(Route::Cadastro)),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_ticket_stays_current_until_next_begin() {
        let nav = Navigator::new(TemplateSource);
        let ticket = nav.begin();
        assert!(nav.is_current(ticket));
        nav.begin();
        assert!(!nav.is_current(ticket));
    }

    #[test]
    fn test_current_failure_is_reported() {
        let nav = Navigator::new(OfflineSource);
        let ticket = nav.begin();
        match block_on(nav.resolve(ticket, "#projetos")) {
            NavOutcome::Failed(AppError::Network(msg)) => assert!(msg.contains("#projetos")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_superseded_failure_is_stale() {
        let nav = Navigator::new(OfflineSource);
        let failing = nav.begin();
        let home = nav.begin();

        assert!(matches!(block_on(nav.resolve(failing, "#projetos")), NavOutcome::Stale));
        assert!(matches!(block_on(nav.resolve(home, "#home")), NavOutcome::Ready(_)));
    }

    #[test]
    fn test_superseded_success_is_stale() {
        let nav = Navigator::new(OfflineSource);
        let home = nav.begin();
        let failing = nav.begin();

        assert!(matches!(block_on(nav.resolve(home, "#home")), NavOutcome::Stale));
        assert!(matches!(block_on(nav.resolve(failing, "#cadastro")), NavOutcome::Failed(_)));
    }

    #[test]
    fn test_traversal_prefers_recorded_key() {
        let recorded = HistoryState { key: "#cadastro".to_string() };
        assert_eq!(traversal_key(&TemplateSource, Some(recorded), "#home", ""), "#cadastro");
        assert_eq!(traversal_key(&TemplateSource, None, "#projetos", ""), "#projetos");
        assert_eq!(traversal_key(&TemplateSource, None, "", ""), "#home");

        let blank = HistoryState { key: String::new() };
        assert_eq!(traversal_key(&TemplateSource, Some(blank), "#projetos", ""), "#projetos");
    }

    #[test]
    fn test_should_intercept() {
        assert!(should_intercept(true, "#cadastro"));
        assert!(should_intercept(false, "projetos.html"));
        assert!(should_intercept(false, "/pages/projetos.html?x=1#top"));
        assert!(!should_intercept(false, "#cadastro"));
        assert!(!should_intercept(false, "mailto:SCI@gmail.com"));
        assert!(!should_intercept(false, "https://example.org/"));
    }

    #[test]
    fn test_link_path() {
        assert_eq!(link_path("a.html?b=c#d"), "a.html");
        assert_eq!(link_path("#home"), "");
        assert_eq!(link_path("plain"), "plain");
    }
}
