//! In-process backend, modelled on browser local storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use super::backend::{Backend, BackendError};

/// In-memory [`Backend`].
///
/// Usage is accounted as the sum of key and value lengths in bytes. With a
/// quota set, a write that would push usage past it fails with
/// [`BackendError::QuotaExceeded`] and leaves the previous value in place.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
    read_only: AtomicBool,
}

impl MemoryBackend {
    /// Create an empty backend without a quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty backend limited to `limit` bytes.
    #[must_use]
    pub fn with_quota(limit: usize) -> Self {
        Self {
            quota: Some(limit),
            ..Self::default()
        }
    }

    /// Make every subsequent write fail with [`BackendError::Unavailable`].
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::Relaxed);
    }

    /// Store a value directly, bypassing quota and read-only checks.
    ///
    /// Used to seed pre-existing (possibly malformed) content.
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.write().insert(key.into(), value.into());
    }

    /// Read a value directly.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    /// Bytes currently held.
    #[must_use]
    pub fn usage(&self) -> usize {
        self.entries
            .read()
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        if key.is_empty() {
            return Err(BackendError::InvalidKey(key.to_owned()));
        }
        if self.read_only.load(Ordering::Relaxed) {
            return Err(BackendError::Unavailable("backend is read-only".to_owned()));
        }

        let mut entries = self.entries.write();
        if let Some(limit) = self.quota {
            let current: usize = entries.iter().map(|(k, v)| k.len() + v.len()).sum();
            let replaced = entries.get(key).map_or(0, |old| key.len() + old.len());
            let needed = current - replaced + key.len() + value.len();
            if needed > limit {
                return Err(BackendError::QuotaExceeded { limit, needed });
            }
        }
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
