//! Extractors for accessing the resolved API key in handlers.

use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::http::error::AuthFailure;
use crate::http::security::context::Assigns;
use crate::http::security::key::ApiKey;

/// Extractor for the authenticated API key.
///
/// # Usage
/// ```ignore
/// use actix_keygate_core::http::security::AuthenticatedKey;
///
/// async fn handler(key: AuthenticatedKey) -> impl Responder {
///     format!("Hello, {}!", key.get_key())
/// }
/// ```
///
/// With several authentication pipelines this is the key attached last; use
/// [`ApiKeyExt::assigned_key`] to read a specific slot.
///
/// # Errors
/// Returns `401 Unauthorized` (`missing_key`) if no key was attached.
#[derive(Debug, Clone)]
pub struct AuthenticatedKey(ApiKey);

impl AuthenticatedKey {
    /// Creates a new AuthenticatedKey wrapper.
    pub fn new(key: ApiKey) -> Self {
        AuthenticatedKey(key)
    }

    /// Returns the inner ApiKey.
    pub fn into_inner(self) -> ApiKey {
        self.0
    }
}

impl Deref for AuthenticatedKey {
    type Target = ApiKey;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthenticatedKey {
    type Error = AuthFailure;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<ApiKey>().cloned() {
            Some(key) => ready(Ok(AuthenticatedKey(key))),
            None => ready(Err(AuthFailure::MissingKey)),
        }
    }
}

/// Extension trait for HttpRequest to inspect the attached key.
pub trait ApiKeyExt {
    /// Returns a clone of the attached key if present.
    fn api_key(&self) -> Option<ApiKey>;

    /// Returns a clone of the key assigned to `slot`.
    fn assigned_key(&self, slot: &str) -> Option<ApiKey>;

    /// Checks whether the attached key may perform `action` on `resource`.
    fn key_can(&self, resource: &str, action: &str) -> bool;
}

impl ApiKeyExt for HttpRequest {
    fn api_key(&self) -> Option<ApiKey> {
        self.extensions().get::<ApiKey>().cloned()
    }

    fn assigned_key(&self, slot: &str) -> Option<ApiKey> {
        self.extensions()
            .get::<Assigns>()
            .and_then(|assigns| assigns.get(slot).cloned())
    }

    fn key_can(&self, resource: &str, action: &str) -> bool {
        self.extensions()
            .get::<ApiKey>()
            .is_some_and(|key| key.can(resource, action))
    }
}
