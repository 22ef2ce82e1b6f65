//! Application configuration.
//!
//! Compile-time settings for the site. The routing strategy itself is picked
//! with the `fetch-pages` cargo feature, see [`crate::router`].

/// Name shown in the header and used as the title suffix.
pub const SITE_NAME: &str = "Salve Corações Inundados";

/// Element id of the region swapped on every navigation.
pub const CONTENT_REGION_ID: &str = "main-content";

/// Element id of the donation / volunteer form.
pub const DONATION_FORM_ID: &str = "form-doacao";

/// `localStorage` key holding the submission list.
pub const SUBMISSIONS_KEY: &str = "sci_submissions";

/// Maximum submissions kept in storage. Oldest entries are dropped first.
pub const MAX_SUBMISSIONS: usize = 50;

/// How long a toast stays visible (in milliseconds).
pub const TOAST_DURATION_MS: u32 = 2500;

/// Path the fetch strategy loads page documents from.
pub const PAGES_BASE: &str = "/pages/";

/// Page loaded by the fetch strategy when the address names none.
pub const DEFAULT_PAGE: &str = "home.html";

/// Query parameter carrying the current page in fetch mode.
pub const PAGE_QUERY_PARAM: &str = "page";

/// Viewport width above which the mobile menu is closed.
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;
