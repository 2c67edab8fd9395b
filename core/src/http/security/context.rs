//! Request context the resolved key is attached to.
//!
//! The authenticator stores the resolved [`ApiKey`] in the request
//! extensions twice: as a typed extension holding the latest key, read by
//! [`AuthenticatedKey`](super::AuthenticatedKey), and inside [`Assigns`] under
//! the configured slot name so that several pipelines can attach keys side by
//! side. Permission gates read their key from a slot.

use std::collections::HashMap;

use actix_web::HttpMessage;

use crate::http::security::key::ApiKey;

/// Keys attached to a request, by slot name.
#[derive(Debug, Clone, Default)]
pub struct Assigns {
    slots: HashMap<String, ApiKey>,
}

impl Assigns {
    /// Returns the key assigned to `slot`.
    pub fn get(&self, slot: &str) -> Option<&ApiKey> {
        self.slots.get(slot)
    }

    /// Returns true if a key is assigned to `slot`.
    pub fn contains(&self, slot: &str) -> bool {
        self.slots.contains_key(slot)
    }

    /// Returns the number of assigned slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if nothing is assigned.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Attaches `key` to the request under `slot`.
pub fn assign<M: HttpMessage>(msg: &M, slot: &str, key: ApiKey) {
    let mut extensions = msg.extensions_mut();
    if let Some(assigns) = extensions.get_mut::<Assigns>() {
        assigns.slots.insert(slot.to_string(), key.clone());
    } else {
        let mut assigns = Assigns::default();
        assigns.slots.insert(slot.to_string(), key.clone());
        extensions.insert(assigns);
    }
    extensions.insert(key);
}
