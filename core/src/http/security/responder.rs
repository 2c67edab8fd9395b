//! Failure responders.
//!
//! The authenticator and the authorization gate only classify failures.
//! Turning an [`AuthFailure`] into an HTTP response is left to a
//! [`FailureResponder`], configured per middleware instance.

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

use crate::http::error::AuthFailure;

/// Maps a failure reason to the response sent to the client.
///
/// Closures of type `Fn(&AuthFailure) -> HttpResponse` are responders too.
///
/// # Example
/// ```ignore
/// let authentication = ApiKeyAuthentication::new(authenticator)
///     .responder(|failure: &AuthFailure| {
///         HttpResponse::Unauthorized().body(failure.as_str())
///     });
/// ```
pub trait FailureResponder: Send + Sync {
    /// Builds the response for `failure`.
    fn respond(&self, failure: &AuthFailure) -> HttpResponse;
}

impl<F> FailureResponder for F
where
    F: Fn(&AuthFailure) -> HttpResponse + Send + Sync,
{
    fn respond(&self, failure: &AuthFailure) -> HttpResponse {
        self(failure)
    }
}

/// Default responder.
///
/// `401` for authentication failures, `403` for authorization failures and
/// `500` for store errors, with a body of
/// `{"error": "<reason>", "message": "<description>"}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFailureResponder;

impl FailureResponder for JsonFailureResponder {
    fn respond(&self, failure: &AuthFailure) -> HttpResponse {
        HttpResponse::build(failure.status_code()).json(json!({
            "error": failure.as_str(),
            "message": failure.to_string(),
        }))
    }
}
