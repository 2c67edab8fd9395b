//! Permission gate: per-handler resource/action requirements.
//!
//! A [`PermissionGate`] is bound to a base resource name (one gate per group
//! of handlers, e.g. a products controller) and holds a registration table
//! from handler id to [`Requirement`]. At request time the requirement of the
//! handler is resolved to a resource name and checked against the attached
//! key.
//!
//! # Example
//! ```ignore
//! use actix_keygate_core::http::security::{PermissionGate, Requirement};
//!
//! let gate = PermissionGate::new(store.clone(), "Products")
//!     .permit("index", Requirement::action("read"))
//!     .permit("meta", Requirement::action("read").append("Meta"))
//!     .permit("audit", Requirement::action("read").override_resource("AuditLog"));
//!
//! web::resource("/products")
//!     .route(web::get().to(index))
//!     .wrap(gate.handler("index"));
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::http::error::AuthFailure;
use crate::http::security::config::DEFAULT_ASSIGN_TO;
use crate::http::security::key::ApiKey;
use crate::http::security::middleware::Authorize;
use crate::http::security::responder::{FailureResponder, JsonFailureResponder};
use crate::http::security::store::KeyStore;

/// How a requirement derives its resource name from the gate's base name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResourceModifier {
    /// Use the base name as-is.
    #[default]
    None,
    /// Concatenate the base name with a suffix.
    Append(String),
    /// Replace the base name with a literal.
    Override(String),
}

impl ResourceModifier {
    /// Resolves the resource name checked for `base`.
    pub fn resolve(&self, base: &str) -> String {
        match self {
            ResourceModifier::None => base.to_string(),
            ResourceModifier::Append(suffix) => format!("{}{}", base, suffix),
            ResourceModifier::Override(resource) => resource.clone(),
        }
    }
}

/// Action a handler requires, with an optional resource modifier.
///
/// Supplying both [`append`](Self::append) and
/// [`override_resource`](Self::override_resource) is accepted; the override
/// wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    action: String,
    append: Option<String>,
    override_resource: Option<String>,
}

impl Requirement {
    /// Requires `action` on the gate's resource.
    pub fn action(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            append: None,
            override_resource: None,
        }
    }

    /// Checks the base resource name followed by `suffix`.
    pub fn append(mut self, suffix: impl Into<String>) -> Self {
        self.append = Some(suffix.into());
        self
    }

    /// Checks `resource` instead of the base resource name.
    pub fn override_resource(mut self, resource: impl Into<String>) -> Self {
        self.override_resource = Some(resource.into());
        self
    }

    /// Returns the required action.
    pub fn get_action(&self) -> &str {
        &self.action
    }

    /// Returns the effective modifier.
    pub fn modifier(&self) -> ResourceModifier {
        match (&self.override_resource, &self.append) {
            (Some(resource), _) => ResourceModifier::Override(resource.clone()),
            (None, Some(suffix)) => ResourceModifier::Append(suffix.clone()),
            (None, None) => ResourceModifier::None,
        }
    }

    /// Resolves the resource name checked for `base`.
    pub fn resolve(&self, base: &str) -> String {
        self.modifier().resolve(base)
    }
}

/// Checks `requirement` for `key` against the resource derived from `base`.
///
/// An absent key is denied. Whether the key lacks the resource entirely or
/// only the action, the failure is `UnauthorizedAction`.
pub fn authorize<S>(
    store: &S,
    key: Option<&ApiKey>,
    base: &str,
    requirement: &Requirement,
) -> Result<(), AuthFailure>
where
    S: KeyStore + ?Sized,
{
    let key = key.ok_or(AuthFailure::UnauthorizedAction)?;
    let resource = requirement.resolve(base);

    if store.evaluate(key, &resource, requirement.get_action()) {
        Ok(())
    } else {
        log::debug!(
            "API key denied `{}` on `{}`",
            requirement.get_action(),
            resource
        );
        Err(AuthFailure::UnauthorizedAction)
    }
}

/// Registration table of handler requirements for one base resource.
///
/// Handlers without a registration pass through unchecked. The key checked
/// is the one attached under the gate's slot, `"api_key"` unless set with
/// [`slot`](Self::slot).
#[derive(Clone)]
pub struct PermissionGate {
    store: Arc<dyn KeyStore>,
    resource: String,
    slot: String,
    requirements: BTreeMap<String, Requirement>,
    responder: Arc<dyn FailureResponder>,
}

impl PermissionGate {
    /// Creates a gate for `resource` evaluating permissions with `store`.
    pub fn new(store: Arc<dyn KeyStore>, resource: impl Into<String>) -> Self {
        Self {
            store,
            resource: resource.into(),
            slot: DEFAULT_ASSIGN_TO.to_string(),
            requirements: BTreeMap::new(),
            responder: Arc::new(JsonFailureResponder),
        }
    }

    /// Registers the requirement of `handler`, replacing any previous one.
    ///
    /// # Panics
    /// Panics if the requirement's action is empty.
    pub fn permit(mut self, handler: impl Into<String>, requirement: Requirement) -> Self {
        let handler = handler.into();
        assert!(
            !requirement.get_action().is_empty(),
            "permission requirement for handler `{}` has an empty action",
            handler
        );
        if requirement.append.is_some() && requirement.override_resource.is_some() {
            log::warn!(
                "Handler `{}` declares both append and override; using override",
                handler
            );
        }
        self.requirements.insert(handler, requirement);
        self
    }

    /// Sets the responder used by the [`Authorize`] middleware.
    pub fn responder<R>(mut self, responder: R) -> Self
    where
        R: FailureResponder + 'static,
    {
        self.responder = Arc::new(responder);
        self
    }

    /// Reads the key attached under `slot` instead of the default slot.
    pub fn slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = slot.into();
        self
    }

    /// Returns the slot the checked key is read from.
    pub fn get_slot(&self) -> &str {
        &self.slot
    }

    /// Returns the base resource name.
    pub fn get_resource(&self) -> &str {
        &self.resource
    }

    /// Returns the requirement registered for `handler`.
    pub fn requirement(&self, handler: &str) -> Option<&Requirement> {
        self.requirements.get(handler)
    }

    /// Returns the registered handler ids, in order.
    pub fn handlers(&self) -> impl Iterator<Item = &str> {
        self.requirements.keys().map(String::as_str)
    }

    /// Checks the requirement of `handler` for `key`.
    pub fn check(&self, handler: &str, key: Option<&ApiKey>) -> Result<(), AuthFailure> {
        match self.requirements.get(handler) {
            Some(requirement) => authorize(self.store.as_ref(), key, &self.resource, requirement),
            None => Ok(()),
        }
    }

    /// Builds the response for a failed check.
    pub fn respond(&self, failure: &AuthFailure) -> actix_web::HttpResponse {
        self.responder.respond(failure)
    }

    /// Middleware enforcing the requirement of `handler`.
    pub fn handler(&self, handler: impl Into<String>) -> Authorize {
        Authorize::new(Arc::new(self.clone()), handler)
    }
}
