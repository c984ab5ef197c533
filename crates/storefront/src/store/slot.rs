//! Persistent state slots.
//!
//! A [`Slot`] binds one piece of typed application state to one key of a
//! [`Backend`]. Reads happen once, at initialization; every mutation updates
//! the in-memory value and then writes the JSON encoding through to the
//! backend.
//!
//! Storage failures never block a mutation. Initialization falls back to the
//! supplied value when the entry is missing or unreadable, and a failed write
//! keeps the in-memory value as updated. In both cases the failure is logged
//! and handed back as a [`StoreError`] so callers (and tests) can see it;
//! callers that follow the best-effort policy simply discard it.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::backend::{Backend, BackendError};

/// Which side of the slot a failure happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Loading the durable entry (read or decode); the fallback was used.
    Read,
    /// Persisting a new value (encode or write); memory is ahead of storage.
    Write,
}

/// A slot read or write failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be read.
    #[error("failed to read slot `{key}`: {source}")]
    Read {
        key: String,
        #[source]
        source: BackendError,
    },

    /// The stored content does not decode into the slot's type.
    #[error("slot `{key}` holds undecodable content: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The new value could not be encoded.
    #[error("failed to encode slot `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The backend rejected the write.
    #[error("failed to write slot `{key}`: {source}")]
    Write {
        key: String,
        #[source]
        source: BackendError,
    },
}

impl StoreError {
    /// Classify the failure.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Read { .. } | Self::Decode { .. } => FailureKind::Read,
            Self::Encode { .. } | Self::Write { .. } => FailureKind::Write,
        }
    }

    /// Key of the slot that failed.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Read { key, .. }
            | Self::Decode { key, .. }
            | Self::Encode { key, .. }
            | Self::Write { key, .. } => key,
        }
    }
}

/// One named unit of persisted application state.
pub struct Slot<T> {
    key: String,
    value: T,
    backend: Arc<dyn Backend>,
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl<T> Slot<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Load the slot stored under `key`.
    ///
    /// The slot starts from `fallback` when the entry is absent (reported as
    /// `Ok`), unreadable, or not decodable (reported as `Err`). The backend is
    /// not written until the first update.
    pub fn initialize(
        backend: Arc<dyn Backend>,
        key: impl Into<String>,
        fallback: T,
    ) -> (Self, Result<(), StoreError>) {
        let key = key.into();

        let loaded = match backend.get(&key) {
            Ok(None) => Ok(None),
            Ok(Some(raw)) => serde_json::from_str::<T>(&raw)
                .map(Some)
                .map_err(|source| StoreError::Decode {
                    key: key.clone(),
                    source,
                }),
            Err(source) => Err(StoreError::Read {
                key: key.clone(),
                source,
            }),
        };

        let (value, status) = match loaded {
            Ok(Some(value)) => {
                tracing::debug!(slot = %key, "Loaded slot from storage");
                (value, Ok(()))
            }
            Ok(None) => {
                tracing::debug!(slot = %key, "No stored value, using fallback");
                (fallback, Ok(()))
            }
            Err(err) => {
                tracing::warn!(slot = %key, error = %err, "Falling back after load failure");
                (fallback, Err(err))
            }
        };

        (
            Self {
                key,
                value,
                backend,
            },
            status,
        )
    }

    /// The current in-memory value.
    #[must_use]
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// The backend key this slot is bound to.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the value and write it through.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Encode` or `StoreError::Write` if persisting fails.
    /// The in-memory value is replaced regardless.
    pub fn replace_with(&mut self, value: T) -> Result<(), StoreError> {
        self.value = value;
        self.persist()
    }

    /// Compute the next value from the current one and write it through.
    ///
    /// `transform` should be a pure function of the previous value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Encode` or `StoreError::Write` if persisting fails.
    /// The in-memory value is updated regardless.
    pub fn update_with<F>(&mut self, transform: F) -> Result<(), StoreError>
    where
        F: FnOnce(&T) -> T,
    {
        let next = transform(&self.value);
        self.replace_with(next)
    }

    fn persist(&self) -> Result<(), StoreError> {
        let result = serde_json::to_string(&self.value)
            .map_err(|source| StoreError::Encode {
                key: self.key.clone(),
                source,
            })
            .and_then(|encoded| {
                self.backend
                    .set(&self.key, &encoded)
                    .map_err(|source| StoreError::Write {
                        key: self.key.clone(),
                        source,
                    })
            });

        match &result {
            Ok(()) => tracing::debug!(slot = %self.key, "Slot written"),
            Err(err) => tracing::error!(
                slot = %self.key,
                error = %err,
                "Slot write failed; in-memory value kept"
            ),
        }

        result
    }
}
