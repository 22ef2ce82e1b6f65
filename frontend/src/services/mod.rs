//! Browser services.
//!
//! # Services
//!
//! - [`pages`] - HTTP page fetcher for the fetch routing strategy
//! - [`storage`] - `localStorage` access for the submission store

pub mod pages;
pub mod storage;

pub use pages::*;
pub use storage::*;
