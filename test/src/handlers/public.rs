//! Public routes (no API key required).

use actix_web::{HttpResponse, Responder};

/// Liveness probe.
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
