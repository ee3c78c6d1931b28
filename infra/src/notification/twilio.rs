//! Twilio SMS Service Implementation
//!
//! Sends SMS through the Twilio Messages REST API with bounded retries and
//! exponential backoff on rate limiting (429), server errors (5xx) and
//! transport failures. Other client errors fail immediately.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use ph_core::domain::entities::CodeKind;
use ph_core::errors::DomainError;
use ph_core::services::notification::SmsSender;
use ph_shared::config::TwilioConfig;
use ph_shared::identifier::mask_identifier;

use super::templates::render_sms;
use crate::InfrastructureError;

/// Twilio limit for a single message body
const MAX_BODY_LEN: usize = 1600;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Deserialize)]
struct MessageResponse {
    sid: String,
}

/// Twilio SMS sender
pub struct TwilioSmsSender {
    client: Client,
    config: TwilioConfig,
    retry_delay: Duration,
}

impl TwilioSmsSender {
    pub fn new(config: TwilioConfig) -> Result<Self, InfrastructureError> {
        if !config.is_configured() {
            return Err(InfrastructureError::Config(
                "Twilio account SID, auth token and sender number are required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        info!(
            from = %mask_identifier(&config.from_number),
            "Twilio SMS sender initialized"
        );

        Ok(Self {
            client,
            config,
            retry_delay: DEFAULT_RETRY_DELAY,
        })
    }

    /// Initial delay between attempts; doubles after each retry
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/Accounts/{}/Messages.json",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.account_sid
        )
    }

    /// Send an SMS with retry logic, returning the message SID
    pub async fn send_sms(&self, to: &str, body: &str) -> Result<String, InfrastructureError> {
        if body.len() > MAX_BODY_LEN {
            return Err(InfrastructureError::Sms(format!(
                "Message exceeds maximum length of {} characters",
                MAX_BODY_LEN
            )));
        }

        let max_attempts = self.config.max_retries.max(1);
        let mut delay = self.retry_delay;
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!(attempt, max_attempts, to = %mask_identifier(to), "Sending SMS");

            let result = self
                .client
                .post(self.messages_url())
                .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
                .form(&[("To", to), ("From", self.config.from_number.as_str()), ("Body", body)])
                .send()
                .await;

            let failure = match result {
                Ok(response) if response.status().is_success() => {
                    let message: MessageResponse = response.json().await?;
                    info!(to = %mask_identifier(to), sid = %message.sid, "SMS sent");
                    return Ok(message.sid);
                }
                Ok(response) => {
                    let status = response.status();
                    let detail = response.text().await.unwrap_or_default();
                    if !is_retryable(status) {
                        error!(%status, to = %mask_identifier(to), "Twilio rejected SMS");
                        return Err(InfrastructureError::Sms(format!(
                            "Twilio returned {}: {}",
                            status, detail
                        )));
                    }
                    format!("Twilio returned {}", status)
                }
                Err(e) => e.to_string(),
            };

            if attempt >= max_attempts {
                error!(attempt, error = %failure, "Giving up on SMS delivery");
                return Err(InfrastructureError::Sms(format!(
                    "Failed to send SMS after {} attempts: {}",
                    attempt, failure
                )));
            }

            warn!(attempt, error = %failure, retry_in = ?delay, "SMS attempt failed, retrying");
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

#[async_trait]
impl SmsSender for TwilioSmsSender {
    async fn send_code(&self, phone: &str, kind: CodeKind, code: &str) -> Result<(), DomainError> {
        self.send_sms(phone, &render_sms(kind, code)).await?;
        Ok(())
    }
}
