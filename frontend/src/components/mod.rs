//! UI components for the site.
//!
//! # Layout Components
//! - [`Header`] - Logo, mobile menu toggle and navigation links
//! - [`ContentRegion`] - The region swapped on every navigation
//! - [`Footer`] - Page footer
//!
//! # Feedback Components
//! - [`Modal`] - Shared dialog (signup confirmation, project details)
//! - [`Toast`] - Transient notification

mod content;
mod footer;
mod header;
mod modal;
mod toast;

pub use content::*;
pub use footer::*;
pub use header::*;
pub use modal::*;
pub use toast::*;
