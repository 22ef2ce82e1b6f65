//! Page bootstrapper.
//!
//! Builds the [`AppContext`] once, installs the window-level listeners and
//! runs the post-render pass after each content swap.
//!
//! # Listeners
//!
//! - `click` - in-app link interception, closes the mobile menu
//! - `hashchange` / `popstate` - history traversal, depending on the source
//! - `resize` - closes the mobile menu on wide viewports
//! - `keydown` - Escape closes the modal

use std::rc::Rc;

use gloo_utils::{document, window};
use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent, MouseEvent, PopStateEvent};

use crate::config::{CONTENT_REGION_ID, MOBILE_BREAKPOINT_PX};
use crate::notify::{ModalController, Toaster};
use crate::router::{
    active_source, should_intercept, traversal_key, ActiveSource, AfterSwap, ContentSource,
    HistoryEvent, NavMode, NavOutcome, Navigator,
};
use crate::services::BrowserStorage;
use crate::store::SubmissionStore;
use crate::types::{HistoryState, Page};

pub const MSG_LOAD_FAILED: &str = "Não foi possível carregar a página.";

/// Everything the event handlers share. Built once per page load.
#[derive(Clone)]
pub struct AppContext {
    pub navigator: Rc<Navigator<ActiveSource>>,
    /// Page currently shown in the content region.
    pub page: RwSignal<Option<Page>>,
    pub toaster: Toaster,
    pub modal: ModalController,
    /// Whether the mobile navigation menu is open.
    pub menu_open: RwSignal<bool>,
    pub store: Rc<SubmissionStore<BrowserStorage>>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            navigator: Rc::new(Navigator::new(active_source())),
            page: create_rw_signal(None),
            toaster: Toaster::new(),
            modal: ModalController::new(),
            menu_open: create_rw_signal(false),
            store: Rc::new(SubmissionStore::new(BrowserStorage::detect())),
        }
    }

    pub fn source(&self) -> &ActiveSource {
        self.navigator.source()
    }

    /// Load `key` and show it, unless a newer navigation overtakes it.
    ///
    /// On failure the current content stays and a toast is shown.
    pub fn navigate(&self, key: String, mode: NavMode) {
        let ticket = self.navigator.begin();
        let ctx = self.clone();
        spawn_local(async move {
            match ctx.navigator.resolve(ticket, &key).await {
                NavOutcome::Ready(page) => ctx.apply(page, mode),
                NavOutcome::Stale => {}
                NavOutcome::Failed(e) => {
                    log::error!("Failed to load {}: {}", key, e);
                    ctx.toaster.show(MSG_LOAD_FAILED);
                }
            }
        });
    }

    fn apply(&self, page: Page, mode: NavMode) {
        log::debug!("Showing {} ({:?})", page.key, mode);
        record_history(self.source(), &page.key, mode);
        self.page.set(Some(page));
    }

    /// Navigate to the key recorded in `state`, or else to whatever the
    /// address bar currently names.
    fn navigate_to_location(&self, state: Option<HistoryState>, mode: NavMode) {
        let location = window().location();
        let hash = location.hash().unwrap_or_default();
        let search = location.search().unwrap_or_default();
        let key = traversal_key(self.source(), state, &hash, &search);
        self.navigate(key, mode);
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

fn record_history(source: &ActiveSource, key: &str, mode: NavMode) {
    let method = match mode {
        NavMode::Traverse => return,
        NavMode::Push => "pushState",
        NavMode::Replace => "replaceState",
    };
    let state = match serde_wasm_bindgen::to_value(&HistoryState { key: key.to_string() }) {
        Ok(state) => state,
        Err(e) => {
            log::warn!("Could not serialize history state: {}", e);
            return;
        }
    };
    let Ok(history) = window().history() else {
        return;
    };

    let url = source.history_url(key);
    let result = match mode {
        NavMode::Push => history.push_state_with_url(&state, "", Some(url.as_str())),
        _ => history.replace_state_with_url(&state, "", Some(url.as_str())),
    };
    if let Err(e) = result {
        log::warn!("{} failed for {}: {:?}", method, url, e);
    }
}

/// Install window listeners and show the initial page.
pub fn start(ctx: &AppContext) {
    let click_ctx = ctx.clone();
    window_event_listener(ev::click, move |ev| on_click(&click_ctx, &ev));

    let history_ctx = ctx.clone();
    match <ActiveSource as ContentSource>::HISTORY_EVENT {
        HistoryEvent::HashChange => {
            window_event_listener(ev::hashchange, move |_| {
                history_ctx.navigate_to_location(None, NavMode::Traverse)
            });
        }
        HistoryEvent::PopState => {
            window_event_listener(ev::popstate, move |ev: PopStateEvent| {
                let state = serde_wasm_bindgen::from_value::<HistoryState>(ev.state()).ok();
                history_ctx.navigate_to_location(state, NavMode::Traverse)
            });
        }
    }

    let menu_open = ctx.menu_open;
    window_event_listener(ev::resize, move |_| {
        let wide = window()
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .is_some_and(|w| w > MOBILE_BREAKPOINT_PX);
        if wide && menu_open.get_untracked() {
            menu_open.set(false);
        }
    });

    let modal = ctx.modal;
    window_event_listener(ev::keydown, move |ev: KeyboardEvent| {
        if ev.key() == "Escape" && modal.is_open() {
            modal.close();
        }
    });

    ctx.navigate_to_location(None, NavMode::Replace);
}

/// Route plain clicks on marked or `.html` links through the navigator.
fn on_click(ctx: &AppContext, ev: &MouseEvent) {
    if ev.default_prevented()
        || ev.button() != 0
        || ev.ctrl_key()
        || ev.meta_key()
        || ev.shift_key()
        || ev.alt_key()
    {
        return;
    }

    let Some(anchor) = ev
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest("a[href]").ok().flatten())
    else {
        return;
    };
    if anchor.has_attribute("target") || anchor.has_attribute("download") {
        return;
    }

    let href = anchor.get_attribute("href").unwrap_or_default();
    if !should_intercept(anchor.has_attribute("data-route"), &href) {
        return;
    }
    let Some(key) = ctx.source().key_for_href(&href) else {
        return;
    };

    ev.prevent_default();
    ctx.menu_open.set(false);
    ctx.navigate(key, NavMode::Push);
}

/// Run after new markup landed in the content region.
pub fn post_render() {
    disable_image_drag();

    match <ActiveSource as ContentSource>::AFTER_SWAP {
        AfterSwap::FocusRegion => {
            if let Some(region) = document()
                .get_element_by_id(CONTENT_REGION_ID)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                _ = region.focus();
            }
        }
        AfterSwap::ScrollTop => window().scroll_to_with_x_and_y(0.0, 0.0),
    }
}

fn disable_image_drag() {
    let Ok(images) = document().query_selector_all("img") else {
        return;
    };
    for i in 0..images.length() {
        if let Some(img) = images.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            _ = img.set_attribute("draggable", "false");
        }
    }
}
