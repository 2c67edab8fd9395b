//! Key store trait.

use derive_more::{Display, Error};

use crate::http::security::evaluator;
use crate::http::security::key::{ApiKey, ApiKeyUpdate};

/// Result of looking a credential up in a [`KeyStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The key exists and is enabled.
    Found(ApiKey),
    /// No key matches the credential.
    NotFound,
    /// The key exists but is disabled.
    Disabled,
}

/// Errors reported by a [`KeyStore`].
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The key to update does not exist.
    #[display("API key not found")]
    NotFound,

    /// The key to insert already exists.
    #[display("API key already exists")]
    AlreadyExists,

    /// The backend failed (connection lost, timeout, ...).
    #[display("key store failure: {message}")]
    Backend { message: String },
}

impl StoreError {
    /// Creates a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend {
            message: message.into(),
        }
    }
}

/// Trait for storing and resolving API keys.
///
/// Implement this trait to provide custom storage backends for API keys
/// (e.g., database, Redis, external service). Lookups must be safe to run
/// concurrently with writes, and a write must replace a whole record so that
/// readers never observe a partially updated key.
///
/// # Example
///
/// ```ignore
/// use actix_keygate_core::http::security::{ApiKey, ApiKeyUpdate, KeyStore, Lookup, StoreError};
///
/// struct DatabaseKeyStore {
///     pool: DbPool,
/// }
///
/// impl KeyStore for DatabaseKeyStore {
///     fn lookup(&self, key: &str) -> Result<Lookup, StoreError> {
///         let row = self.pool
///             .query_opt("SELECT * FROM api_keys WHERE key = ?", &[key])
///             .map_err(|e| StoreError::backend(e.to_string()))?;
///         Ok(match row {
///             Some(row) if row.enabled => Lookup::Found(row.into_api_key()),
///             Some(_) => Lookup::Disabled,
///             None => Lookup::NotFound,
///         })
///     }
///     // insert, update, delete ...
/// }
/// ```
pub trait KeyStore: Send + Sync {
    /// Resolves a credential.
    ///
    /// Backend failures are reported as `Err`, never as `Lookup::NotFound`.
    fn lookup(&self, key: &str) -> Result<Lookup, StoreError>;

    /// Decides whether `key` may perform `action` on `resource`.
    ///
    /// Defaults to exact resource matching; stores with richer matching may
    /// override it as long as disabled keys are always denied.
    fn evaluate(&self, key: &ApiKey, resource: &str, action: &str) -> bool {
        evaluator::evaluate(key, resource, action)
    }

    /// Stores a new key.
    fn insert(&self, key: ApiKey) -> Result<(), StoreError>;

    /// Merges `update` into an existing key.
    ///
    /// Fails with `StoreError::NotFound` when the key does not exist.
    fn update(&self, key: &str, update: ApiKeyUpdate) -> Result<(), StoreError>;

    /// Removes a key. Removing an absent key succeeds.
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Enables a key.
    fn enable(&self, key: &str) -> Result<(), StoreError> {
        self.update(key, ApiKeyUpdate::new().enabled(true))
    }

    /// Disables a key.
    fn disable(&self, key: &str) -> Result<(), StoreError> {
        self.update(key, ApiKeyUpdate::new().enabled(false))
    }
}
