//! Email delivery over SMTP

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{error, info};

use ph_core::domain::entities::CodeKind;
use ph_core::errors::DomainError;
use ph_core::services::notification::EmailSender;
use ph_shared::config::SmtpConfig;
use ph_shared::identifier::mask_identifier;

use super::templates::render_email;
use crate::InfrastructureError;

/// Sends HTML emails through an authenticated STARTTLS relay
pub struct SmtpEmailSender {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailSender {
    pub fn new(config: &SmtpConfig) -> Result<Self, InfrastructureError> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| InfrastructureError::Email(format!("Invalid SMTP relay: {}", e)))?
            .port(config.port)
            .credentials(credentials)
            .build();

        let from = format!("{} <{}>", config.from_name, config.from_address)
            .parse::<Mailbox>()
            .map_err(|e| InfrastructureError::Config(format!("Invalid sender address: {}", e)))?;

        info!(host = %config.host, port = config.port, "SMTP email sender initialized");
        Ok(Self { mailer, from })
    }

    fn build_message(&self, to: &str, kind: CodeKind, code: &str) -> Result<Message, InfrastructureError> {
        let recipient = to
            .parse::<Mailbox>()
            .map_err(|e| InfrastructureError::Email(format!("Invalid recipient: {}", e)))?;
        let content = render_email(kind, code);

        Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(content.subject)
            .header(ContentType::TEXT_HTML)
            .body(content.html)
            .map_err(|e| InfrastructureError::Email(e.to_string()))
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send_code(&self, address: &str, kind: CodeKind, code: &str) -> Result<(), DomainError> {
        let message = self.build_message(address, kind, code)?;

        self.mailer.send(message).await.map_err(|e| {
            error!(to = %mask_identifier(address), error = %e, "SMTP delivery failed");
            InfrastructureError::Email(e.to_string())
        })?;

        info!(to = %mask_identifier(address), kind = %kind, "Email sent");
        Ok(())
    }
}
