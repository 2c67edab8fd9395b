//! # Actix Keygate Core
//!
//! API key authentication and resource/action authorization for Actix Web.
//!
//! The [`http::security`] module holds the key model, the permission
//! evaluator, the key stores and the middleware that ties them into an
//! Actix Web application. Failure reasons live in [`http::error`].

pub mod http;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::http::error::AuthFailure;
    pub use crate::http::security::{
        ApiKey, ApiKeyAuthentication, ApiKeyAuthenticator, ApiKeyConfig, ApiKeyExt, ApiKeyUpdate,
        AuthenticatedKey, FailureResponder, InMemoryKeyStore, KeyStore, Lookup, Permission,
        PermissionGate, Requirement,
    };
}
