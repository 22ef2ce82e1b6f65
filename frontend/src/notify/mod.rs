//! Transient feedback: the toast notifier and the modal dialog.
//!
//! Both hold their state in a Leptos signal behind a `Copy` handle so any
//! event handler can drive them. The views live in [`crate::components`].

pub mod modal;
pub mod toast;

pub use modal::*;
pub use toast::*;
