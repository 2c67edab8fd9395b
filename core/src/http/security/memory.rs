//! In-memory key stores.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::http::security::key::{ApiKey, ApiKeyUpdate};
use crate::http::security::store::{KeyStore, Lookup, StoreError};

/// Table name used by [`InMemoryKeyStore::new`].
pub const DEFAULT_TABLE: &str = "api_keys";

/// In-memory implementation of `KeyStore`.
///
/// Keys live in a sharded concurrent map keyed by the credential. Updates
/// run under the shard lock of their entry, so a concurrent lookup sees
/// either the old or the new record, never a mix of both.
///
/// Inserting an existing key overwrites it unless the store was built with
/// [`reject_duplicates`](Self::reject_duplicates).
///
/// # Example
///
/// ```ignore
/// use actix_keygate_core::http::security::{ApiKey, InMemoryKeyStore, Permission};
///
/// let store = InMemoryKeyStore::named("partners")
///     .with_key(ApiKey::new("sk_live_abc123")
///         .permission(Permission::new("Products", ["read"])))
///     .with_key(ApiKey::new("sk_test_xyz789")
///         .permission(Permission::new("Products", ["read", "write"])));
/// ```
#[derive(Debug)]
pub struct InMemoryKeyStore {
    name: String,
    keys: DashMap<String, ApiKey>,
    reject_duplicates: bool,
}

impl Default for InMemoryKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryKeyStore {
    /// Creates an empty store using the default table name.
    pub fn new() -> Self {
        Self::named(DEFAULT_TABLE)
    }

    /// Creates an empty store with the given table name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keys: DashMap::new(),
            reject_duplicates: false,
        }
    }

    /// Makes `insert` fail with `StoreError::AlreadyExists` instead of overwriting.
    pub fn reject_duplicates(mut self) -> Self {
        self.reject_duplicates = true;
        self
    }

    /// Adds an API key to the store, replacing any key with the same value.
    pub fn with_key(self, key: ApiKey) -> Self {
        self.keys.insert(key.get_key().to_string(), key);
        self
    }

    /// Returns the table name.
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Returns the number of keys in the store.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Clears all keys from the store.
    pub fn clear(&self) {
        self.keys.clear();
    }

    /// Returns a snapshot of all keys in the store.
    pub fn keys(&self) -> Vec<ApiKey> {
        self.keys.iter().map(|entry| entry.value().clone()).collect()
    }
}

impl KeyStore for InMemoryKeyStore {
    fn lookup(&self, key: &str) -> Result<Lookup, StoreError> {
        Ok(match self.keys.get(key) {
            Some(entry) if entry.is_enabled() => Lookup::Found(entry.value().clone()),
            Some(_) => Lookup::Disabled,
            None => Lookup::NotFound,
        })
    }

    fn insert(&self, key: ApiKey) -> Result<(), StoreError> {
        if self.reject_duplicates {
            match self.keys.entry(key.get_key().to_string()) {
                Entry::Occupied(_) => return Err(StoreError::AlreadyExists),
                Entry::Vacant(slot) => {
                    slot.insert(key);
                }
            }
        } else {
            self.keys.insert(key.get_key().to_string(), key);
        }
        log::debug!("Inserted API key into table `{}`", self.name);
        Ok(())
    }

    fn update(&self, key: &str, update: ApiKeyUpdate) -> Result<(), StoreError> {
        match self.keys.get_mut(key) {
            Some(mut entry) => {
                entry.merge(update);
                log::debug!("Updated API key in table `{}`", self.name);
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        if self.keys.remove(key).is_some() {
            log::debug!("Deleted API key from table `{}`", self.name);
        }
        Ok(())
    }
}

/// Registry of independently named in-memory stores.
///
/// Lets one process keep separate pools of keys, e.g. one per pipeline.
///
/// # Example
///
/// ```ignore
/// let registry = KeyStoreRegistry::new();
/// let partners = registry.table("partners");
/// let internal = registry.table("internal");
/// ```
#[derive(Debug, Default)]
pub struct KeyStoreRegistry {
    tables: DashMap<String, Arc<InMemoryKeyStore>>,
}

impl KeyStoreRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the store named `name`, creating it if needed.
    pub fn table(&self, name: &str) -> Arc<InMemoryKeyStore> {
        self.tables
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(InMemoryKeyStore::named(name)))
            .value()
            .clone()
    }

    /// Returns the store named `name` if it exists.
    pub fn get(&self, name: &str) -> Option<Arc<InMemoryKeyStore>> {
        self.tables.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Removes the store named `name`. Returns true if it existed.
    pub fn drop_table(&self, name: &str) -> bool {
        self.tables.remove(name).is_some()
    }

    /// Returns the names of all stores, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }
}
