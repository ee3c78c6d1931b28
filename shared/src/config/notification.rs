//! Email and SMS delivery configuration

use serde::{Deserialize, Serialize};

/// Which delivery backend to wire at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationProvider {
    /// Log and record messages in memory
    #[default]
    Mock,
    /// SMTP for email, Twilio for SMS
    Live,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
    pub from_name: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::from("smtp.gmail.com"),
            port: 587,
            username: String::new(),
            password: String::new(),
            from_address: String::from("no-reply@pethome.app"),
            from_name: String::from("PetHome"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
    /// Overridable for tests against a local stub
    pub api_base_url: String,
    pub max_retries: u32,
    pub timeout_seconds: u64,
}

impl Default for TwilioConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            api_base_url: String::from("https://api.twilio.com/2010-04-01"),
            max_retries: 3,
            timeout_seconds: 10,
        }
    }
}

impl TwilioConfig {
    pub fn is_configured(&self) -> bool {
        !self.account_sid.is_empty() && !self.auth_token.is_empty() && !self.from_number.is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub provider: NotificationProvider,
    pub smtp: SmtpConfig,
    pub twilio: TwilioConfig,
}
