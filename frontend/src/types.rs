//! Common types used across the site.
//!
//! # Categories
//!
//! - **Routing Types** - sections and resolved pages
//! - **History Types** - state stored with browser history entries
//! - **Error Types** - frontend error handling

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SITE_NAME;

// =============================================================================
// Routing Types
// =============================================================================

/// A section of the site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// Landing page: mission and contact.
    Home,
    /// Ongoing relief projects.
    Projetos,
    /// Donation / volunteer signup form.
    Cadastro,
    /// Anything that does not name a known section.
    NotFound,
}

impl Route {
    /// Sections listed in the navigation bar, in display order.
    pub const NAV: [Route; 3] = [Route::Home, Route::Projetos, Route::Cadastro];

    /// Short identifier used in hashes and page file names.
    pub fn slug(self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Projetos => "projetos",
            Route::Cadastro => "cadastro",
            Route::NotFound => "nao-encontrado",
        }
    }

    /// Navigation label.
    pub fn label(self) -> &'static str {
        match self {
            Route::Home => "Início",
            Route::Projetos => "Projetos",
            Route::Cadastro => "Doar / Ajudar",
            Route::NotFound => "Não encontrado",
        }
    }

    /// Document title for the section.
    pub fn title(self) -> String {
        match self {
            Route::Home => SITE_NAME.to_string(),
            other => format!("{} | {}", other.label(), SITE_NAME),
        }
    }

    /// Look up a navigable section by slug.
    pub fn from_slug(slug: &str) -> Option<Route> {
        Route::NAV.into_iter().find(|route| route.slug() == slug)
    }
}

/// Content resolved for a navigation key.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    /// Key the page was requested with (hash or page file name).
    pub key: String,
    /// Document title.
    pub title: String,
    /// Markup injected into the content region.
    pub content: String,
    /// Matching navigation section, if any.
    pub route: Option<Route>,
}

// =============================================================================
// History Types
// =============================================================================

/// State pushed with each history entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryState {
    /// Navigation key to restore on traversal.
    pub key: String,
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
#[derive(Clone, Debug, Error)]
pub enum AppError {
    /// Request could not be sent or its body not read.
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status.
    #[error("HTTP {status} while loading {url}")]
    Http { status: u16, url: String },

    /// Fetched document lacks the content region.
    #[error("Page {url} has no #{region} element")]
    MissingRegion { url: String, region: String },

    /// Browser storage refused a read or write.
    #[error("Storage error: {0}")]
    Storage(String),

    /// DOM API call failed.
    #[error("DOM error: {0}")]
    Dom(String),
}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;
