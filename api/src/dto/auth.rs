//! Authentication request bodies

use serde::{Deserialize, Serialize};
use validator::Validate;

use ph_core::domain::value_objects::AccountSummary;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Identifier is required"))]
    pub identifier: String,

    #[validate(length(min = 1, message = "Nickname is required"))]
    pub nickname: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConfirmRegistrationRequest {
    #[validate(length(min = 1, message = "Identifier is required"))]
    pub identifier: String,

    #[validate(length(min = 1, message = "Nickname is required"))]
    pub nickname: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[serde(alias = "code")]
    #[validate(length(min = 1, message = "Confirmation code is required"))]
    pub confirmation_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(length(min = 1, message = "Identifier is required"))]
    pub identifier: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Identifier is required"))]
    pub identifier: String,

    #[validate(length(min = 1, message = "Code is required"))]
    pub code: String,

    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// Emptiness is checked by the login flow itself so the message matches
/// other credential failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub password: String,
}

/// Body of a successful registration confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationConfirmed {
    pub message: String,
    pub account: AccountSummary,
}
