//! API Key model.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::http::security::evaluator;

/// A `(resource, scopes)` pair granted to an API key.
///
/// # Example
///
/// ```ignore
/// use actix_keygate_core::http::security::Permission;
///
/// let permission = Permission::new("Products", ["read", "write"]);
/// assert!(permission.allows("Products", "read"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    resource: String,
    #[serde(default)]
    scopes: BTreeSet<String>,
}

impl Permission {
    /// Creates a permission on `resource` for the given actions.
    pub fn new<I, A>(resource: impl Into<String>, scopes: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            resource: resource.into(),
            scopes: scopes.into_iter().map(Into::into).collect(),
        }
    }

    /// Adds an action to the scopes.
    pub fn scope(mut self, action: impl Into<String>) -> Self {
        self.scopes.insert(action.into());
        self
    }

    /// Returns the resource name.
    pub fn get_resource(&self) -> &str {
        &self.resource
    }

    /// Returns the granted actions.
    pub fn get_scopes(&self) -> &BTreeSet<String> {
        &self.scopes
    }

    /// Exact resource match with the action among the scopes.
    pub fn allows(&self, resource: &str, action: &str) -> bool {
        self.resource == resource && self.scopes.contains(action)
    }
}

fn default_enabled() -> bool {
    true
}

/// Represents an API key and the permissions granted to it.
///
/// The external representation is
/// `{"key": "...", "enabled": true, "permissions": [{"resource": "...", "scopes": [...]}]}`;
/// `enabled` defaults to `true` when absent.
///
/// # Example
///
/// ```ignore
/// use actix_keygate_core::http::security::{ApiKey, Permission};
///
/// let key = ApiKey::new("sk_live_abc123")
///     .permission(Permission::new("Products", ["read", "write"]))
///     .permission(Permission::new("Orders", ["read"]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    /// The credential value, unique within a store
    key: String,
    /// Whether the key is enabled
    #[serde(default = "default_enabled")]
    enabled: bool,
    /// Permissions granted to this key
    #[serde(default)]
    permissions: Vec<Permission>,
}

impl ApiKey {
    /// Creates a new enabled API key with no permissions.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            enabled: true,
            permissions: Vec::new(),
        }
    }

    /// Sets whether the key is enabled.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the permissions for this key.
    pub fn permissions(mut self, permissions: Vec<Permission>) -> Self {
        self.permissions = permissions;
        self
    }

    /// Adds a permission.
    pub fn permission(mut self, permission: Permission) -> Self {
        self.permissions.push(permission);
        self
    }

    /// Returns the credential value.
    pub fn get_key(&self) -> &str {
        &self.key
    }

    /// Returns whether the key is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the permissions.
    pub fn get_permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Checks whether this key may perform `action` on `resource`.
    pub fn can(&self, resource: &str, action: &str) -> bool {
        evaluator::evaluate(self, resource, action)
    }

    /// Merges the provided fields into this key. The credential is never changed.
    pub fn merge(&mut self, update: ApiKeyUpdate) {
        if let Some(enabled) = update.enabled {
            self.enabled = enabled;
        }
        if let Some(permissions) = update.permissions {
            self.permissions = permissions;
        }
    }
}

/// Partial set of fields applied by [`KeyStore::update`](super::KeyStore::update).
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    permissions: Option<Vec<Permission>>,
}

impl ApiKeyUpdate {
    /// Creates an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the enabled flag.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Replaces the permission list.
    pub fn permissions(mut self, permissions: Vec<Permission>) -> Self {
        self.permissions = Some(permissions);
        self
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.enabled.is_none() && self.permissions.is_none()
    }
}
