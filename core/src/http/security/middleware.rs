//! Security middleware for Actix Web.
//!
//! - [`ApiKeyAuthentication`] resolves the credential of every request and
//!   attaches the key, or halts with the responder's response.
//! - [`Authorize`] enforces the requirement registered for one handler in a
//!   [`PermissionGate`].
//!
//! Authentication must wrap authorization: register `ApiKeyAuthentication`
//! on the app or scope and `Authorize` on the resources inside it.

use std::sync::Arc;

use actix_service::{Service, Transform};
use actix_web::body::EitherBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage};
use futures_util::future::{ok, LocalBoxFuture, Ready};

use crate::http::security::authenticator::ApiKeyAuthenticator;
use crate::http::security::context::Assigns;
use crate::http::security::gate::PermissionGate;
use crate::http::security::responder::{FailureResponder, JsonFailureResponder};
use crate::http::security::store::KeyStore;

/// API key authentication middleware factory.
///
/// # Example
/// ```ignore
/// let store = Arc::new(InMemoryKeyStore::new());
///
/// App::new().service(
///     web::scope("/api")
///         .wrap(ApiKeyAuthentication::new(
///             ApiKeyAuthenticator::with_shared_store(store.clone()),
///         ))
///         .service(products),
/// )
/// ```
pub struct ApiKeyAuthentication<K: KeyStore> {
    authenticator: ApiKeyAuthenticator<K>,
    responder: Arc<dyn FailureResponder>,
}

impl<K: KeyStore> ApiKeyAuthentication<K> {
    /// Creates the middleware with the default JSON responder.
    pub fn new(authenticator: ApiKeyAuthenticator<K>) -> Self {
        Self {
            authenticator,
            responder: Arc::new(JsonFailureResponder),
        }
    }

    /// Sets the responder invoked on authentication failures.
    pub fn responder<R>(mut self, responder: R) -> Self
    where
        R: FailureResponder + 'static,
    {
        self.responder = Arc::new(responder);
        self
    }
}

impl<K: KeyStore> Clone for ApiKeyAuthentication<K> {
    fn clone(&self) -> Self {
        Self {
            authenticator: self.authenticator.clone(),
            responder: Arc::clone(&self.responder),
        }
    }
}

impl<S, B, K> Transform<S, ServiceRequest> for ApiKeyAuthentication<K>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    K: KeyStore + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = ApiKeyAuthenticationService<K, S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(ApiKeyAuthenticationService {
            authenticator: self.authenticator.clone(),
            responder: Arc::clone(&self.responder),
            service,
        })
    }
}

/// API key authentication middleware service.
pub struct ApiKeyAuthenticationService<K: KeyStore, S> {
    authenticator: ApiKeyAuthenticator<K>,
    responder: Arc<dyn FailureResponder>,
    service: S,
}

impl<K, S, B> Service<ServiceRequest> for ApiKeyAuthenticationService<K, S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    K: KeyStore,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match self.authenticator.authenticate_request(&req) {
            Ok(_) => {
                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
            Err(failure) => {
                // The inner service is never called once authentication fails.
                let response = self.responder.respond(&failure);
                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
        }
    }
}

/// Authorization middleware factory for one handler of a [`PermissionGate`].
///
/// Created with [`PermissionGate::handler`].
#[derive(Clone)]
pub struct Authorize {
    gate: Arc<PermissionGate>,
    handler: String,
}

impl Authorize {
    /// Creates the middleware for `handler`.
    pub fn new(gate: Arc<PermissionGate>, handler: impl Into<String>) -> Self {
        Self {
            gate,
            handler: handler.into(),
        }
    }

    /// Returns the handler id.
    pub fn get_handler(&self) -> &str {
        &self.handler
    }
}

impl<S, B> Transform<S, ServiceRequest> for Authorize
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthorizeService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthorizeService {
            gate: Arc::clone(&self.gate),
            handler: self.handler.clone(),
            service,
        })
    }
}

/// Authorization middleware service.
pub struct AuthorizeService<S> {
    gate: Arc<PermissionGate>,
    handler: String,
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthorizeService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let decision = {
            let extensions = req.extensions();
            let key = extensions
                .get::<Assigns>()
                .and_then(|assigns| assigns.get(self.gate.get_slot()));
            self.gate.check(&self.handler, key)
        };

        match decision {
            Ok(()) => {
                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
            Err(failure) => {
                log::debug!(
                    "Handler `{}` of `{}` rejected request: {}",
                    self.handler,
                    self.gate.get_resource(),
                    failure.as_str()
                );
                let response = self.gate.respond(&failure);
                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
        }
    }
}
