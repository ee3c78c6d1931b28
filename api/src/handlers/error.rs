//! Conversion of domain errors into HTTP responses

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::collections::HashMap;

use ph_core::errors::{AuthError, DomainError, TokenError};
use ph_shared::{error_codes, ErrorResponse};

/// Error returned by route handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Request body failed declarative validation
    #[error("Invalid request data")]
    InvalidRequest(#[from] validator::ValidationErrors),

    /// Missing or malformed credentials, detected before the service layer
    #[error("{0}")]
    Unauthorized(String),
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest(_) => error_codes::VALIDATION_ERROR,
            ApiError::Unauthorized(_) => error_codes::UNAUTHORIZED,
            ApiError::Domain(error) => match error {
                DomainError::Auth(auth) => match auth {
                    AuthError::RateLimited { .. } => error_codes::RATE_LIMIT_EXCEEDED,
                    AuthError::CodeNotFound => error_codes::CODE_NOT_FOUND,
                    AuthError::CodeExpired => error_codes::CODE_EXPIRED,
                    AuthError::InvalidCode => error_codes::CODE_INVALID,
                    AuthError::DeliveryFailed => error_codes::DELIVERY_FAILED,
                    AuthError::UpstreamFailure { .. } => error_codes::UPSTREAM_FAILURE,
                    AuthError::IdentifierTaken | AuthError::NicknameTaken => error_codes::CONFLICT,
                    AuthError::InvalidCredentials => error_codes::UNAUTHORIZED,
                    AuthError::AccountNotFound => error_codes::BAD_REQUEST,
                    AuthError::InvalidIdentifier
                    | AuthError::InvalidNickname
                    | AuthError::WeakPassword
                    | AuthError::NoContactMethod => error_codes::VALIDATION_ERROR,
                },
                DomainError::Token(TokenError::TokenExpired) => error_codes::TOKEN_EXPIRED,
                DomainError::Token(TokenError::TokenGenerationFailed) => error_codes::INTERNAL_ERROR,
                DomainError::Token(_) => error_codes::TOKEN_INVALID,
                DomainError::Validation { .. } | DomainError::ValidationErr(_) => {
                    error_codes::VALIDATION_ERROR
                }
                DomainError::NotFound { .. } => error_codes::NOT_FOUND,
                DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            },
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Domain(error) => error.client_message(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        let ApiError::Domain(error) = self else {
            return match self {
                ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                _ => StatusCode::BAD_REQUEST,
            };
        };

        match error {
            DomainError::Auth(auth) => match auth {
                AuthError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::IdentifierTaken | AuthError::NicknameTaken => StatusCode::CONFLICT,
                AuthError::DeliveryFailed => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::BAD_REQUEST,
            },
            DomainError::Token(TokenError::TokenGenerationFailed) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            DomainError::Token(_) => StatusCode::UNAUTHORIZED,
            DomainError::Validation { .. } | DomainError::ValidationErr(_) => StatusCode::BAD_REQUEST,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        } else {
            log::debug!("Request rejected: {}", self);
        }

        let mut body = ErrorResponse::new(self.code(), self.message());
        match self {
            ApiError::Domain(DomainError::Auth(AuthError::RateLimited { minutes })) => {
                body = body.add_detail("retry_after_minutes", minutes);
            }
            ApiError::InvalidRequest(errors) => {
                let fields: HashMap<String, Vec<String>> = errors
                    .field_errors()
                    .into_iter()
                    .map(|(field, errs)| {
                        let messages = errs
                            .iter()
                            .map(|e| {
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            })
                            .collect();
                        (field.to_string(), messages)
                    })
                    .collect();
                body = body.add_detail("fields", fields);
            }
            _ => {}
        }

        HttpResponse::build(status).json(body)
    }
}
