//! Salve Corações Inundados - Frontend Rust/Leptos Application
//!
//! A WebAssembly site for a flood relief initiative: informational
//! sections plus a donation / volunteer signup form that is validated in
//! the browser and stored in `localStorage`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (logo, menu toggle, nav links)                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ContentRegion  <- Navigator <- ContentSource                │
//! │  (home / projetos / cadastro / not found)                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Modal, Toast                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (Route, Page, AppError)
//! - [`router`] - Content sources and navigation sequencing
//! - [`validation`] - Field rules and error messages
//! - [`store`] - Bounded submission list
//! - [`notify`] - Toast and modal state
//! - [`bootstrap`] - Application context and window listeners
//! - [`forms`] - Donation form DOM glue
//! - [`components`] - UI components
//! - [`services`] - Browser services (page fetch, localStorage)

use leptos::*;
use leptos_meta::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod bootstrap;
pub mod components;
pub mod config;
pub mod forms;
pub mod notify;
pub mod router;
pub mod services;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{AppError, AppResult, HistoryState, Page, Route};

// Components
pub use components::*;

use bootstrap::AppContext;

// =============================================================================
// Application Entry Point
// =============================================================================

/// Set up logging and mount the application. Called by the binary.
pub fn start() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 {} - Starting Leptos App", SITE_NAME);

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let ctx = AppContext::new();
    provide_context(ctx.clone());
    bootstrap::start(&ctx);

    let page = ctx.page;
    let title = move || {
        page.with(|p| p.as_ref().map(|p| p.title.clone()))
            .unwrap_or_else(|| SITE_NAME.to_string())
    };

    view! {
        <Title text=title/>
        <Header/>
        <ContentRegion/>
        <Footer/>
        <Modal/>
        <Toast/>
    }
}
