//! Error types for authentication, confirmation codes, session tokens
//! and input validation.

use thiserror::Error;

/// Authentication and confirmation-code errors
///
/// The display strings are the reasons shown to API clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid phone number or email format.")]
    InvalidIdentifier,

    #[error("Nickname must be 3-15 characters long and can only contain letters, numbers, underscores, and hyphens.")]
    InvalidNickname,

    #[error("Password must be at least 8 characters long, contain uppercase and lowercase letters, numbers, and special characters.")]
    WeakPassword,

    #[error("Email or phone number is already taken.")]
    IdentifierTaken,

    #[error("Nickname is already taken.")]
    NicknameTaken,

    #[error("Exceeded the number of code sending attempts. Try again later.")]
    RateLimited { minutes: i64 },

    #[error("Registration not found or expired.")]
    CodeNotFound,

    #[error("The confirmation code has expired.")]
    CodeExpired,

    #[error("Invalid confirmation code.")]
    InvalidCode,

    #[error("Failed to deliver the confirmation code. Try again later.")]
    DeliveryFailed,

    #[error("{message}")]
    UpstreamFailure { message: String },

    #[error("User not found.")]
    AccountNotFound,

    #[error("User has no email or phone number to send a code to.")]
    NoContactMethod,

    #[error("Invalid credentials.")]
    InvalidCredentials,
}

/// Session token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required.")]
    RequiredField { field: String },

    #[error("{field} must be between {min} and {max}.")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    #[error("{field} must be at most {max} characters.")]
    TooLong { field: String, max: usize },
}
