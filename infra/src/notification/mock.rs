//! Senders that log instead of delivering
//!
//! Used by default in development and in tests. Every message is kept in
//! memory so callers can read the code that would have been sent.

use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};
use tracing::info;

use ph_core::domain::entities::CodeKind;
use ph_core::errors::DomainError;
use ph_core::services::notification::{EmailSender, SmsSender};
use ph_shared::identifier::mask_identifier;

use super::templates::{email_subject, render_sms};

/// A message a mock sender accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub to: String,
    pub kind: CodeKind,
    pub code: String,
    /// Email subject or SMS text
    pub summary: String,
}

#[derive(Debug, Default)]
struct Outbox {
    messages: Mutex<Vec<SentMessage>>,
}

impl Outbox {
    fn push(&self, message: SentMessage) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message);
    }

    fn all(&self) -> Vec<SentMessage> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn last_code_for(&self, to: &str) -> Option<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .find(|m| m.to == to)
            .map(|m| m.code.clone())
    }
}

#[derive(Debug, Default)]
pub struct MockEmailSender {
    outbox: Outbox,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.outbox.all()
    }

    pub fn last_code_for(&self, address: &str) -> Option<String> {
        self.outbox.last_code_for(address)
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send_code(&self, address: &str, kind: CodeKind, code: &str) -> Result<(), DomainError> {
        let subject = email_subject(kind);
        info!(to = %mask_identifier(address), subject, "Mock email sent");
        self.outbox.push(SentMessage {
            to: address.to_string(),
            kind,
            code: code.to_string(),
            summary: subject.to_string(),
        });
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MockSmsSender {
    outbox: Outbox,
}

impl MockSmsSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.outbox.all()
    }

    pub fn last_code_for(&self, phone: &str) -> Option<String> {
        self.outbox.last_code_for(phone)
    }
}

#[async_trait]
impl SmsSender for MockSmsSender {
    async fn send_code(&self, phone: &str, kind: CodeKind, code: &str) -> Result<(), DomainError> {
        info!(to = %mask_identifier(phone), kind = %kind, "Mock SMS sent");
        self.outbox.push(SentMessage {
            to: phone.to_string(),
            kind,
            code: code.to_string(),
            summary: render_sms(kind, code),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_senders_record_messages() {
        let email = MockEmailSender::new();
        let sms = MockSmsSender::new();

        email
            .send_code("user@test.com", CodeKind::Registration, "111111")
            .await
            .unwrap();
        email
            .send_code("user@test.com", CodeKind::PasswordReset, "222222")
            .await
            .unwrap();
        sms.send_code("+1234567890", CodeKind::Registration, "333333")
            .await
            .unwrap();

        assert_eq!(email.sent().len(), 2);
        assert_eq!(email.last_code_for("user@test.com").as_deref(), Some("222222"));
        assert_eq!(email.sent()[1].summary, "Resetting your password in PetHome");
        assert_eq!(
            sms.sent()[0].summary,
            "Your confirmation code from PetHome: 333333"
        );
        assert!(sms.last_code_for("+0000000000").is_none());
    }
}
