//! Bearer token authentication for protected routes.
//!
//! The middleware reads the `Authorization: Bearer <token>` header, checks
//! the token against the session token service held in [`AppState`], and
//! stores an [`AuthContext`] in the request extensions for handlers.
//! Rejected requests get the JSON error body directly.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};
use uuid::Uuid;

use ph_core::domain::entities::Claims;
use ph_core::errors::{DomainError, TokenError};

use crate::app::AppState;
use crate::handlers::ApiError;

/// Identity of the caller of a protected route
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub account_id: Uuid,
    pub nickname: String,
    /// Verified claims, needed to revoke the token on logout
    pub claims: Claims,
}

impl AuthContext {
    pub fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let account_id = claims
            .account_id()
            .ok_or(DomainError::Token(TokenError::InvalidTokenFormat))?;
        Ok(Self {
            account_id,
            nickname: claims.name.clone(),
            claims,
        })
    }
}

/// Middleware factory requiring a valid session token
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl JwtAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            match authenticate(&req) {
                Ok(context) => {
                    log::debug!("Authenticated request from account {}", context.account_id);
                    req.extensions_mut().insert(context);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(error) => {
                    log::debug!("Rejected request to {}: {}", req.path(), error);
                    Ok(req.error_response(error).map_into_right_body())
                }
            }
        })
    }
}

fn authenticate(req: &ServiceRequest) -> Result<AuthContext, ApiError> {
    let token = extract_bearer_token(req).ok_or_else(|| {
        ApiError::Unauthorized("Missing or invalid Authorization header".to_string())
    })?;

    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| ApiError::Domain(DomainError::internal("application state missing")))?;

    let claims = state.token_service.verify(&token)?;
    Ok(AuthContext::from_claims(claims)?)
}

fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()).into());

        ready(result)
    }
}
