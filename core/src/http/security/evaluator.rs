//! Permission evaluation.
//!
//! A key may perform action `A` on resource `R` iff it is enabled and one of
//! its permissions names exactly `R` with `A` among its scopes. Resource names
//! are compared for equality only; there is no prefix or wildcard matching.

use crate::http::security::key::ApiKey;

/// Decides whether `key` may perform `action` on `resource`.
///
/// A disabled key is denied before its permissions are consulted.
pub fn evaluate(key: &ApiKey, resource: &str, action: &str) -> bool {
    if !key.is_enabled() {
        return false;
    }

    key.get_permissions()
        .iter()
        .any(|permission| permission.allows(resource, action))
}
