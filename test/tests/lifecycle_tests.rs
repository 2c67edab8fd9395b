//! Key lifecycle tests.
//!
//! Store mutations made while the app is serving take effect on the next
//! request.

mod common;

use actix_web::test;

use actix_keygate_core::http::security::{ApiKey, ApiKeyUpdate, KeyStore, Permission};
use common::{assert_forbidden, assert_ok, assert_unauthorized, bearer, create_test_app, test_store};

#[actix_web::test]
async fn test_full_key_scenario() {
    let store = test_store();
    let app = create_test_app(store.clone()).await;

    store
        .insert(ApiKey::new("abc").permission(Permission::new("Products", ["read", "write"])))
        .unwrap();

    // authenticate + read on Products
    let req = test::TestRequest::get()
        .uri("/api/products")
        .insert_header(bearer("abc"))
        .to_request();
    assert_ok(&test::call_service(&app, req).await);

    // delete on Products is not granted
    let req = test::TestRequest::post()
        .uri("/api/products/1/delete")
        .insert_header(bearer("abc"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_forbidden(&resp);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "unauthorized_action");

    store.disable("abc").unwrap();

    let req = test::TestRequest::get()
        .uri("/api/products")
        .insert_header(bearer("abc"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_unauthorized(&resp);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "disabled");
}

#[actix_web::test]
async fn test_enable_restores_access() {
    let store = test_store();
    let app = create_test_app(store.clone()).await;

    store.enable("sk_live_revoked").unwrap();

    let req = test::TestRequest::get()
        .uri("/api/products")
        .insert_header(bearer("sk_live_revoked"))
        .to_request();
    assert_ok(&test::call_service(&app, req).await);
}

#[actix_web::test]
async fn test_update_permissions_takes_effect() {
    let store = test_store();
    let app = create_test_app(store.clone()).await;

    store
        .update(
            "sk_live_reader",
            ApiKeyUpdate::new().permissions(vec![Permission::new("Products", ["read", "delete"])]),
        )
        .unwrap();

    let req = test::TestRequest::post()
        .uri("/api/products/2/delete")
        .insert_header(bearer("sk_live_reader"))
        .to_request();
    assert_ok(&test::call_service(&app, req).await);
}

#[actix_web::test]
async fn test_deleted_key_is_not_found() {
    let store = test_store();
    let app = create_test_app(store.clone()).await;

    store.delete("sk_live_editor").unwrap();
    store.delete("sk_live_editor").unwrap();

    let req = test::TestRequest::get()
        .uri("/api/products")
        .insert_header(bearer("sk_live_editor"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_unauthorized(&resp);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "not_found");
}

#[actix_web::test]
async fn test_separate_stores_are_isolated() {
    let first = test_store();
    let second = test_store();
    let app = create_test_app(second.clone()).await;

    first
        .insert(ApiKey::new("only_in_first").permission(Permission::new("Products", ["read"])))
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/api/products")
        .insert_header(bearer("only_in_first"))
        .to_request();
    assert_unauthorized(&test::call_service(&app, req).await);
}
