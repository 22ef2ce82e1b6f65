//! `localStorage` access.

use web_sys::Storage;

use crate::store::{KeyValueStorage, MemoryStorage};
use crate::types::{AppError, AppResult};

/// Storage backing the submission store in the browser.
pub enum BrowserStorage {
    Local(Storage),
    /// `localStorage` is disabled (private mode, sandboxed iframe, ...).
    Memory(MemoryStorage),
}

impl BrowserStorage {
    /// Use `window.localStorage`, or memory if the browser refuses it.
    pub fn detect() -> Self {
        match web_sys::window().map(|w| w.local_storage()) {
            Some(Ok(Some(storage))) => BrowserStorage::Local(storage),
            _ => {
                log::warn!("localStorage unavailable, submissions will not survive a reload");
                BrowserStorage::Memory(MemoryStorage::default())
            }
        }
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        match self {
            BrowserStorage::Local(storage) => storage
                .get_item(key)
                .map_err(|e| AppError::Storage(format!("{:?}", e))),
            BrowserStorage::Memory(memory) => memory.get_item(key),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        match self {
            BrowserStorage::Local(storage) => storage
                .set_item(key, value)
                .map_err(|e| AppError::Storage(format!("{:?}", e))),
            BrowserStorage::Memory(memory) => memory.set_item(key, value),
        }
    }
}
