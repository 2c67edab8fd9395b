//! Permission gate tests.
//!
//! Per-handler requirements on the `Products` resource, including the
//! append (`ProductsMeta`) and override (`Reports`) modifiers.

mod common;

use actix_web::http::StatusCode;
use actix_web::test;

use common::{assert_forbidden, assert_ok, assert_status, bearer, create_test_app, test_store};

// =============================================================================
// Base Resource
// =============================================================================

#[actix_web::test]
async fn test_reader_can_list_products() {
    let app = create_test_app(test_store()).await;

    let req = test::TestRequest::get()
        .uri("/api/products")
        .insert_header(bearer("sk_live_reader"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_ok(&resp);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn test_reader_can_show_product() {
    let app = create_test_app(test_store()).await;

    let req = test::TestRequest::get()
        .uri("/api/products/1")
        .insert_header(bearer("sk_live_reader"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_ok(&resp);
}

#[actix_web::test]
async fn test_reader_cannot_create() {
    let app = create_test_app(test_store()).await;

    let req = test::TestRequest::post()
        .uri("/api/products/new")
        .insert_header(bearer("sk_live_reader"))
        .set_json(serde_json::json!({ "id": 3, "name": "Mouse" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_forbidden(&resp);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "unauthorized_action");
}

#[actix_web::test]
async fn test_editor_can_create() {
    let app = create_test_app(test_store()).await;

    let req = test::TestRequest::post()
        .uri("/api/products/new")
        .insert_header(bearer("sk_live_editor"))
        .set_json(serde_json::json!({ "id": 3, "name": "Mouse" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_status(&resp, StatusCode::CREATED);
}

#[actix_web::test]
async fn test_delete_requires_delete_scope() {
    let app = create_test_app(test_store()).await;

    let req = test::TestRequest::post()
        .uri("/api/products/1/delete")
        .insert_header(bearer("sk_live_reader"))
        .to_request();
    assert_forbidden(&test::call_service(&app, req).await);

    let req = test::TestRequest::post()
        .uri("/api/products/1/delete")
        .insert_header(bearer("sk_live_editor"))
        .to_request();
    assert_ok(&test::call_service(&app, req).await);
}

// =============================================================================
// Resource Modifiers
// =============================================================================

#[actix_web::test]
async fn test_append_modifier_checks_suffixed_resource() {
    let app = create_test_app(test_store()).await;

    // read on Products is not enough for ProductsMeta
    let req = test::TestRequest::get()
        .uri("/api/products/1/meta")
        .insert_header(bearer("sk_live_reader"))
        .to_request();
    assert_forbidden(&test::call_service(&app, req).await);

    let req = test::TestRequest::get()
        .uri("/api/products/1/meta")
        .insert_header(bearer("sk_live_editor"))
        .to_request();
    assert_ok(&test::call_service(&app, req).await);
}

#[actix_web::test]
async fn test_override_modifier_checks_literal_resource() {
    let app = create_test_app(test_store()).await;

    let req = test::TestRequest::get()
        .uri("/api/products/stats")
        .insert_header(bearer("sk_live_reader"))
        .to_request();
    assert_forbidden(&test::call_service(&app, req).await);

    let req = test::TestRequest::get()
        .uri("/api/products/stats")
        .insert_header(bearer("sk_live_editor"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_ok(&resp);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["count"], 2);
}

// =============================================================================
// Undeclared Handlers
// =============================================================================

#[actix_web::test]
async fn test_handler_without_requirement_passes_through() {
    let app = create_test_app(test_store()).await;

    // sk_live_reader has no permission named after /whoami
    let req = test::TestRequest::get()
        .uri("/api/whoami")
        .insert_header(bearer("sk_live_reader"))
        .to_request();
    assert_ok(&test::call_service(&app, req).await);
}
