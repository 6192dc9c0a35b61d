//! Key-value storage behind a trait so persistence can run against browser
//! `localStorage` in the page and an in-memory map in tests.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;

use crate::error::StoreError;

/// Synchronous string key-value store.
pub trait KeyValueStore {
    /// Read `key`. `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `Err` on quota or backend failure.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store with an optional byte quota over all values.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that refuses writes once values would exceed `bytes` in total.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self { items: HashMap::new(), quota: Some(bytes) }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn used_excluding(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(quota) = self.quota {
            let available = quota.saturating_sub(self.used_excluding(key));
            if value.len() > available {
                return Err(StoreError::QuotaExceeded { key: key.to_owned(), needed: value.len(), available });
            }
        }
        self.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.items.remove(key);
        Ok(())
    }
}

/// Memory store whose reads or removals can be made to fail.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FaultyStore {
    pub inner: MemoryStore,
    pub fail_get: bool,
    pub fail_remove: bool,
}

#[cfg(test)]
impl KeyValueStore for FaultyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_get {
            return Err(StoreError::Backend("read refused".into()));
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.fail_remove {
            return Err(StoreError::Backend("remove refused".into()));
        }
        self.inner.remove(key)
    }
}

/// Browser `window.localStorage`.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Open the window's local storage.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` outside a browser or when storage is disabled.
    pub fn open() -> Result<Self, StoreError> {
        let window = web_sys::window().ok_or(StoreError::Unavailable)?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) | Err(_) => Err(StoreError::Unavailable),
        }
    }
}

fn js_error(err: &wasm_bindgen::JsValue) -> StoreError {
    StoreError::Backend(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage.get_item(key).map_err(|e| js_error(&e))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).map_err(|e| js_error(&e))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage.remove_item(key).map_err(|e| js_error(&e))
    }
}
