use actix_web::{error, http::StatusCode, HttpResponse};
use derive_more::{Display, Error};

use crate::http::security::responder::{FailureResponder, JsonFailureResponder};

/// Reason a request was rejected by the authentication or authorization layer.
///
/// Exactly one reason is produced per failure. Only `MissingKey`, `NotFound`,
/// `Disabled`, `UnauthorizedAction` and `StoreError` are produced by the
/// built-in authenticator and gate; the other variants are reserved for
/// custom stores and evaluators.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthFailure {
    /// No credential was presented.
    #[display("Unauthorized: API key not provided")]
    MissingKey,

    /// The credential is malformed.
    #[display("Unauthorized: invalid API key format")]
    InvalidFormat,

    /// No key matches the presented credential.
    #[display("Unauthorized: invalid API key")]
    NotFound,

    /// The key exists but is disabled.
    #[display("Unauthorized: API key is disabled")]
    Disabled,

    /// The key has expired.
    #[display("Unauthorized: API key has expired")]
    Expired,

    /// The key holds no permission for the resource.
    #[display("Forbidden: API key may not access this resource")]
    UnauthorizedResource,

    /// The key may not perform the action on the resource.
    #[display("Forbidden: API key may not perform this action")]
    UnauthorizedAction,

    /// The key store failed internally.
    #[display("Internal Server Error: key store failure")]
    StoreError,
}

impl AuthFailure {
    /// Returns the wire name of the reason (e.g. `missing_key`).
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthFailure::MissingKey => "missing_key",
            AuthFailure::InvalidFormat => "invalid_format",
            AuthFailure::NotFound => "not_found",
            AuthFailure::Disabled => "disabled",
            AuthFailure::Expired => "expired",
            AuthFailure::UnauthorizedResource => "unauthorized_resource",
            AuthFailure::UnauthorizedAction => "unauthorized_action",
            AuthFailure::StoreError => "store_error",
        }
    }
}

impl error::ResponseError for AuthFailure {
    fn status_code(&self) -> StatusCode {
        match *self {
            AuthFailure::MissingKey
            | AuthFailure::InvalidFormat
            | AuthFailure::NotFound
            | AuthFailure::Disabled
            | AuthFailure::Expired => StatusCode::UNAUTHORIZED,
            AuthFailure::UnauthorizedResource | AuthFailure::UnauthorizedAction => {
                StatusCode::FORBIDDEN
            }
            AuthFailure::StoreError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        JsonFailureResponder.respond(self)
    }
}
