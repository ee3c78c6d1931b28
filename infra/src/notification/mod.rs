//! Notification Module
//!
//! Delivery of confirmation codes by email and SMS.
//!
//! - **SMTP**: HTML email through `lettre`
//! - **Twilio**: SMS through the Twilio REST API
//! - **Mock**: log-only senders for development and tests
//! - **Templates**: subjects and bodies for each kind of code

pub mod mock;
pub mod smtp;
pub mod templates;
pub mod twilio;

use std::sync::Arc;
use tracing::{info, warn};

use ph_core::services::notification::{EmailSender, SmsSender};
use ph_shared::config::{NotificationConfig, NotificationProvider};

pub use mock::{MockEmailSender, MockSmsSender, SentMessage};
pub use smtp::SmtpEmailSender;
pub use twilio::TwilioSmsSender;

use crate::InfrastructureError;

/// Email and SMS senders chosen by configuration
pub struct Senders {
    pub email: Arc<dyn EmailSender>,
    pub sms: Arc<dyn SmsSender>,
}

/// Create the senders for the configured provider
///
/// `Live` requires working SMTP settings. SMS falls back to the mock
/// sender when Twilio credentials are missing, so email-only deployments
/// still start.
pub fn create_senders(config: &NotificationConfig) -> Result<Senders, InfrastructureError> {
    match config.provider {
        NotificationProvider::Mock => {
            info!("Using mock email and SMS senders");
            Ok(Senders {
                email: Arc::new(MockEmailSender::new()),
                sms: Arc::new(MockSmsSender::new()),
            })
        }
        NotificationProvider::Live => {
            let email: Arc<dyn EmailSender> = Arc::new(SmtpEmailSender::new(&config.smtp)?);
            let sms: Arc<dyn SmsSender> = if config.twilio.is_configured() {
                Arc::new(TwilioSmsSender::new(config.twilio.clone())?)
            } else {
                warn!("Twilio credentials missing, SMS codes will only be logged");
                Arc::new(MockSmsSender::new())
            };
            Ok(Senders { email, sms })
        }
    }
}
