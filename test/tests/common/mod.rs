//! Common test utilities.
//!
//! - Test app builder over a caller-supplied store
//! - Bearer header helper
//! - Status assertions

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::{test, App};

use actix_keygate_core::http::security::InMemoryKeyStore;
use actix_keygate_test::{configure, demo_store};

/// Creates the demo store behind an `Arc`, so tests can mutate it while the app runs.
pub fn test_store() -> Arc<InMemoryKeyStore> {
    Arc::new(demo_store())
}

/// Creates the demo app over `store`.
pub async fn create_test_app(
    store: Arc<InMemoryKeyStore>,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(App::new().configure(configure(store))).await
}

/// Builds an `Authorization: Bearer <key>` header.
pub fn bearer(key: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", key))
}

pub fn assert_status<B: MessageBody>(response: &ServiceResponse<B>, status: StatusCode) {
    assert_eq!(
        response.status(),
        status,
        "expected {} for {}",
        status,
        response.request().path()
    );
}

pub fn assert_ok<B: MessageBody>(response: &ServiceResponse<B>) {
    assert_status(response, StatusCode::OK);
}

pub fn assert_unauthorized<B: MessageBody>(response: &ServiceResponse<B>) {
    assert_status(response, StatusCode::UNAUTHORIZED);
}

pub fn assert_forbidden<B: MessageBody>(response: &ServiceResponse<B>) {
    assert_status(response, StatusCode::FORBIDDEN);
}
