//! Response value objects returned by the authentication flows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Account, Contact, SessionToken};

/// Outcome of a code request: where the code went and a message for the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeDispatch {
    pub message: String,
    /// Address the code was sent to. Password reset confirmations are keyed
    /// by this value.
    pub identifier: String,
    pub channel: String,
}

impl CodeDispatch {
    pub fn new(message: impl Into<String>, contact: &Contact) -> Self {
        Self {
            message: message.into(),
            identifier: contact.address().to_string(),
            channel: contact.channel_name().to_string(),
        }
    }
}

/// Successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    pub account: AccountSummary,
}

impl AuthResponse {
    pub fn new(session: SessionToken, account: &Account) -> Self {
        Self {
            token: session.token,
            token_type: session.token_type,
            expires_at: session.expires_at,
            account: AccountSummary::from(account),
        }
    }
}

/// Public view of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: String,
    pub nickname: String,
    pub avatar_url: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            nickname: account.nickname.clone(),
            avatar_url: account.avatar_url.clone(),
            email: account.email.clone(),
            phone_number: account.phone_number.clone(),
        }
    }
}
