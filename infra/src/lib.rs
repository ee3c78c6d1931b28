//! # Infrastructure Layer
//!
//! Concrete implementations of the storage and delivery traits defined in
//! `ph_core`.
//!
//! ## Architecture
//!
//! - **Identity**: in-memory account store with bcrypt password hashes
//! - **Hotel**: in-memory hotel listing storage
//! - **Notification**: SMTP email, Twilio SMS and mock senders

use ph_core::errors::DomainError;

/// Identity store - accounts, passwords and reset tokens
pub mod identity;

/// Hotel listing storage
pub mod hotel;

/// Email and SMS delivery
pub mod notification;

pub use hotel::InMemoryHotelRepository;
pub use identity::InMemoryAccountRepository;
pub use notification::{create_senders, Senders};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Password hashing error
    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Email delivery error
    #[error("Email service error: {0}")]
    Email(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::internal(err.to_string())
    }
}
