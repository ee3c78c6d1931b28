//! Traits for email and SMS delivery

use async_trait::async_trait;

use crate::domain::entities::CodeKind;
use crate::errors::DomainError;

/// Sends confirmation codes by email
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Deliver `code` for the `kind` flow to `address`. One attempt from the
    /// caller's point of view; implementations may retry internally.
    async fn send_code(&self, address: &str, kind: CodeKind, code: &str) -> Result<(), DomainError>;
}

/// Sends confirmation codes by SMS
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Deliver `code` for the `kind` flow to the phone number `phone`
    async fn send_code(&self, phone: &str, kind: CodeKind, code: &str) -> Result<(), DomainError>;
}
