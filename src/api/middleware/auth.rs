//! Bearer-token authentication middleware
//!
//! Routes wrap an `AuthGate` in one of two modes. `Required` rejects
//! requests without a valid session token; `Optional` attaches the session
//! claims when a valid token is present and lets anonymous requests pass.
//! Handlers read the claims back out of the request extensions.

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, error, trace};

use crate::api::types::ErrorResponse;
use crate::services::AuthService;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    Required,
    Optional,
}

#[derive(Clone, Copy)]
pub struct AuthGate {
    mode: AuthMode,
}

impl AuthGate {
    pub fn required() -> Self {
        Self {
            mode: AuthMode::Required,
        }
    }

    pub fn optional() -> Self {
        Self {
            mode: AuthMode::Optional,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware {
            service: Rc::new(service),
            mode: self.mode,
        }))
    }
}

pub struct AuthGateMiddleware<S> {
    service: Rc<S>,
    mode: AuthMode,
}

impl<S, B> AuthGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
        req.headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.to_string())
    }

    fn missing_token(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        debug!("rejected request without access token");
        req.into_response(
            HttpResponse::Unauthorized()
                .json(ErrorResponse {
                    message: "Access token required".to_string(),
                    error: "UNAUTHORIZED".to_string(),
                })
                .map_into_right_body(),
        )
    }

    fn invalid_token(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        debug!("rejected request with invalid or revoked token");
        req.into_response(
            HttpResponse::Forbidden()
                .json(ErrorResponse {
                    message: "Invalid or expired token".to_string(),
                    error: "FORBIDDEN".to_string(),
                })
                .map_into_right_body(),
        )
    }

    fn misconfigured(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        error!("AuthService not registered in app data");
        req.into_response(
            HttpResponse::InternalServerError()
                .json(ErrorResponse {
                    message: "Internal server error".to_string(),
                    error: "SERVER_ERROR".to_string(),
                })
                .map_into_right_body(),
        )
    }
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let mode = self.mode;

        Box::pin(async move {
            let auth = req
                .app_data::<web::Data<Arc<AuthService>>>()
                .map(|data| data.get_ref().clone());
            let Some(auth) = auth else {
                return Ok(Self::misconfigured(req));
            };

            let token = Self::extract_bearer_token(&req);

            match (mode, token) {
                (AuthMode::Required, None) => Ok(Self::missing_token(req)),
                (AuthMode::Required, Some(token)) => match auth.authenticate(&token) {
                    Ok(claims) => {
                        trace!("authenticated session '{}'", claims.jti);
                        req.extensions_mut().insert(claims);
                        let response = srv.call(req).await?.map_into_left_body();
                        Ok(response)
                    }
                    Err(_) => Ok(Self::invalid_token(req)),
                },
                (AuthMode::Optional, Some(token)) => {
                    // Anonymous fallback: a bad token on an optional route is
                    // treated like no token at all.
                    if let Ok(claims) = auth.authenticate(&token) {
                        trace!("attached optional session '{}'", claims.jti);
                        req.extensions_mut().insert(claims);
                    }
                    let response = srv.call(req).await?.map_into_left_body();
                    Ok(response)
                }
                (AuthMode::Optional, None) => {
                    let response = srv.call(req).await?.map_into_left_body();
                    Ok(response)
                }
            }
        })
    }
}
