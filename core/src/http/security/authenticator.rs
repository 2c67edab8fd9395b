//! API Key authenticator implementation.

use std::sync::Arc;

use actix_web::dev::ServiceRequest;
use actix_web::http::header::HeaderMap;

use crate::http::error::AuthFailure;
use crate::http::security::config::ApiKeyConfig;
use crate::http::security::context;
use crate::http::security::key::ApiKey;
use crate::http::security::store::{KeyStore, Lookup};

/// Authenticator that resolves bearer credentials against a key store.
///
/// Each request goes through a single transition: no credential fails with
/// `missing_key` without touching the store, otherwise the store lookup
/// decides between success, `not_found`, `disabled` and `store_error`.
/// The authenticator never builds a response itself.
///
/// # Example
///
/// ```ignore
/// use actix_keygate_core::http::security::{
///     ApiKeyAuthenticator, ApiKeyConfig, ApiKey, InMemoryKeyStore, Permission,
/// };
///
/// let store = InMemoryKeyStore::new()
///     .with_key(ApiKey::new("sk_live_abc123")
///         .permission(Permission::new("Products", ["read"])));
///
/// let authenticator = ApiKeyAuthenticator::new(store)
///     .config(ApiKeyConfig::new().assign_to("partner_key"));
/// ```
pub struct ApiKeyAuthenticator<S: KeyStore> {
    store: Arc<S>,
    config: ApiKeyConfig,
}

impl<S: KeyStore> ApiKeyAuthenticator<S> {
    /// Creates a new authenticator with the given store.
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
            config: ApiKeyConfig::default(),
        }
    }

    /// Creates a new authenticator with a shared store.
    pub fn with_shared_store(store: Arc<S>) -> Self {
        Self {
            store,
            config: ApiKeyConfig::default(),
        }
    }

    /// Sets the configuration for this authenticator.
    pub fn config(mut self, config: ApiKeyConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the configuration.
    pub fn get_config(&self) -> &ApiKeyConfig {
        &self.config
    }

    /// Returns the store.
    pub fn get_store(&self) -> &Arc<S> {
        &self.store
    }

    /// Extracts the credential from `<header>: <scheme> <key>`.
    ///
    /// A missing header, a non UTF-8 value, another scheme or a blank key
    /// all yield `None`. Surrounding whitespace is not part of the key.
    pub fn extract_credential(&self, headers: &HeaderMap) -> Option<String> {
        let value = headers.get(self.config.get_header())?.to_str().ok()?;
        let token = value
            .strip_prefix(self.config.get_scheme())?
            .strip_prefix(' ')?
            .trim();

        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    /// Resolves an extracted credential.
    pub fn authenticate(&self, credential: Option<&str>) -> Result<ApiKey, AuthFailure> {
        let credential = credential.ok_or(AuthFailure::MissingKey)?;

        match self.store.lookup(credential) {
            Ok(Lookup::Found(key)) => Ok(key),
            Ok(Lookup::NotFound) => Err(AuthFailure::NotFound),
            Ok(Lookup::Disabled) => Err(AuthFailure::Disabled),
            Err(err) => {
                log::error!("API key lookup failed: {}", err);
                Err(AuthFailure::StoreError)
            }
        }
    }

    /// Authenticates the request and attaches the key on success.
    pub fn authenticate_request(&self, req: &ServiceRequest) -> Result<ApiKey, AuthFailure> {
        let credential = self.extract_credential(req.headers());

        match self.authenticate(credential.as_deref()) {
            Ok(key) => {
                context::assign(req, self.config.get_assign_to(), key.clone());
                Ok(key)
            }
            Err(failure) => {
                log::debug!(
                    "API key authentication failed for {} {}: {}",
                    req.method(),
                    req.path(),
                    failure.as_str()
                );
                Err(failure)
            }
        }
    }
}

impl<S: KeyStore> Clone for ApiKeyAuthenticator<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}
