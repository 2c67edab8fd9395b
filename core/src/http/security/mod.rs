//! API key authentication and permission authorization.
//!
//! # Overview
//!
//! Clients present a pre-shared key as `Authorization: Bearer <key>`. The key
//! is resolved against a [`KeyStore`], attached to the request, and checked
//! against the resource/action requirement declared for the handler.
//!
//! # Module Structure
//!
//! - `key` - API key model (`ApiKey`, `Permission`, `ApiKeyUpdate`)
//! - `evaluator` - Permission evaluation (exact resource match, disabled keys denied)
//! - `store` - `KeyStore` trait, lookup results and store errors
//! - `memory` - In-memory concurrent store and a registry of named stores
//! - `caching` - Caching layer for slower stores
//! - `config` - Credential extraction and assign-slot configuration
//! - `authenticator` - Credential extraction and resolution
//! - `gate` - Per-handler requirements (`PermissionGate`, `Requirement`)
//! - `responder` - Mapping of failures to HTTP responses
//! - `context` - Request slots the resolved key is attached to
//! - `extractor` - Actix Web extractors (`AuthenticatedKey`, `ApiKeyExt`)
//! - `middleware` - Actix Web middleware (`ApiKeyAuthentication`, `Authorize`)
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use actix_keygate_core::http::security::{
//!     ApiKey, ApiKeyAuthentication, ApiKeyAuthenticator, InMemoryKeyStore, Permission,
//!     PermissionGate, Requirement,
//! };
//!
//! let store = Arc::new(InMemoryKeyStore::new().with_key(
//!     ApiKey::new("sk_live_abc123").permission(Permission::new("Products", ["read", "write"])),
//! ));
//!
//! let gate = PermissionGate::new(store.clone(), "Products")
//!     .permit("index", Requirement::action("read"))
//!     .permit("create", Requirement::action("write"));
//!
//! App::new()
//!     .wrap(ApiKeyAuthentication::new(ApiKeyAuthenticator::with_shared_store(store)))
//!     .service(web::resource("/products").route(web::get().to(index)).wrap(gate.handler("index")))
//! ```
//!
//! # Security Considerations
//!
//! 1. **Use HTTPS** - API keys are transmitted in plaintext
//! 2. **Keys are stored as-is** - hash or encrypt them in your own store if needed

pub use authenticator::ApiKeyAuthenticator;
pub use caching::CachingKeyStore;
pub use config::ApiKeyConfig;
pub use context::Assigns;
pub use evaluator::evaluate;
pub use extractor::{ApiKeyExt, AuthenticatedKey};
pub use gate::{authorize, PermissionGate, Requirement, ResourceModifier};
pub use key::{ApiKey, ApiKeyUpdate, Permission};
pub use memory::{InMemoryKeyStore, KeyStoreRegistry};
pub use middleware::{ApiKeyAuthentication, Authorize};
pub use responder::{FailureResponder, JsonFailureResponder};
pub use store::{KeyStore, Lookup, StoreError};

mod extractor;

pub mod authenticator;
pub mod caching;
pub mod config;
pub mod context;
pub mod evaluator;
pub mod gate;
pub mod key;
pub mod memory;
pub mod middleware;
pub mod responder;
pub mod store;
