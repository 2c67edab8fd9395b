//! Actix Keygate demo application.
//!
//! A products API protected by API keys. Shared by the demo binary and the
//! integration tests.

pub mod handlers;

use std::sync::Arc;

use actix_web::web;

use actix_keygate_core::http::security::{
    ApiKey, ApiKeyAuthentication, ApiKeyAuthenticator, InMemoryKeyStore, KeyStore, Permission,
    PermissionGate, Requirement,
};

/// Creates the store with the demo keys.
///
/// Keys:
/// - `sk_live_reader`: Products [read]
/// - `sk_live_editor`: Products [read, write, delete], ProductsMeta [read], Reports [read]
/// - `sk_live_revoked`: Products [read], disabled
pub fn demo_store() -> InMemoryKeyStore {
    InMemoryKeyStore::named("demo")
        .with_key(ApiKey::new("sk_live_reader").permission(Permission::new("Products", ["read"])))
        .with_key(
            ApiKey::new("sk_live_editor")
                .permission(Permission::new("Products", ["read", "write", "delete"]))
                .permission(Permission::new("ProductsMeta", ["read"]))
                .permission(Permission::new("Reports", ["read"])),
        )
        .with_key(
            ApiKey::new("sk_live_revoked")
                .enabled(false)
                .permission(Permission::new("Products", ["read"])),
        )
}

/// Declares the requirements of the products handlers.
pub fn products_gate(store: Arc<dyn KeyStore>) -> PermissionGate {
    PermissionGate::new(store, "Products")
        .permit("index", Requirement::action("read"))
        .permit("show", Requirement::action("read"))
        .permit("create", Requirement::action("write"))
        .permit("delete", Requirement::action("delete"))
        .permit("meta", Requirement::action("read").append("Meta"))
        .permit("stats", Requirement::action("read").override_resource("Reports"))
}

/// Registers the public and API routes.
pub fn configure(store: Arc<InMemoryKeyStore>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        use handlers::{products, public};

        let gate = products_gate(store.clone());

        cfg.service(web::resource("/health").route(web::get().to(public::health)))
            .service(
                web::scope("/api")
                    .wrap(ApiKeyAuthentication::new(
                        ApiKeyAuthenticator::with_shared_store(store),
                    ))
                    .service(web::resource("/whoami").route(web::get().to(products::whoami)))
                    .service(
                        web::resource("/products")
                            .route(web::get().to(products::index))
                            .wrap(gate.handler("index")),
                    )
                    .service(
                        web::resource("/products/new")
                            .route(web::post().to(products::create))
                            .wrap(gate.handler("create")),
                    )
                    .service(
                        web::resource("/products/stats")
                            .route(web::get().to(products::stats))
                            .wrap(gate.handler("stats")),
                    )
                    .service(
                        web::resource("/products/{id}")
                            .route(web::get().to(products::show))
                            .wrap(gate.handler("show")),
                    )
                    .service(
                        web::resource("/products/{id}/meta")
                            .route(web::get().to(products::meta))
                            .wrap(gate.handler("meta")),
                    )
                    .service(
                        web::resource("/products/{id}/delete")
                            .route(web::post().to(products::delete))
                            .wrap(gate.handler("delete")),
                    ),
            );
    }
}
