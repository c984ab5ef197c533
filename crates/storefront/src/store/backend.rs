//! The durable key-value backend contract.

use thiserror::Error;

/// Errors a backend can report.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The key cannot be stored by this backend.
    #[error("invalid key `{0}`")]
    InvalidKey(String),

    /// The write would exceed the backend's storage quota.
    #[error("quota of {limit} bytes exceeded (write needs {needed})")]
    QuotaExceeded {
        /// Configured quota in bytes.
        limit: usize,
        /// Bytes the store would hold after the write.
        needed: usize,
    },

    /// The backend refuses writes (storage disabled or read-only).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Underlying I/O failed.
    #[error("I/O error on `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// A string-keyed store of opaque string values.
///
/// Only two operations exist: there is no delete and no enumeration. Calls
/// complete or fail immediately; there are no timeouts or retries.
pub trait Backend: Send + Sync {
    /// Read the value stored under `key`; `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, BackendError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), BackendError>;
}
