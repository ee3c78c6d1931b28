//! Account entity representing a registered PetHome user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::confirmation::Contact;

/// Avatar assigned to every new account
pub const DEFAULT_AVATAR_URL: &str = "https://example.com/default-avatar.png";

/// Registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,

    /// Unique nickname, also used as the login name
    pub nickname: String,

    pub email: Option<String>,

    pub phone_number: Option<String>,

    pub avatar_url: String,

    pub email_confirmed: bool,

    pub phone_confirmed: bool,

    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Builds the stored account from a confirmed registration
    pub fn from_new(new: NewAccount) -> Self {
        let (email, phone_number) = match new.contact {
            Contact::Email(address) => (Some(address), None),
            Contact::Phone(number) => (None, Some(number)),
        };

        Self {
            id: Uuid::new_v4(),
            nickname: new.nickname,
            email_confirmed: email.is_some(),
            phone_confirmed: phone_number.is_some(),
            email,
            phone_number,
            avatar_url: DEFAULT_AVATAR_URL.to_string(),
            created_at: Utc::now(),
        }
    }

    /// Where password reset codes go: the email address if there is one,
    /// otherwise the phone number.
    pub fn reset_contact(&self) -> Option<Contact> {
        self.email
            .as_deref()
            .filter(|e| !e.is_empty())
            .map(|e| Contact::Email(e.to_string()))
            .or_else(|| {
                self.phone_number
                    .as_deref()
                    .filter(|p| !p.is_empty())
                    .map(|p| Contact::Phone(p.to_string()))
            })
    }
}

/// Data for an account about to be created by a confirmed registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub nickname: String,
    /// The confirmed email address or phone number
    pub contact: Contact,
}

impl NewAccount {
    pub fn new(nickname: impl Into<String>, contact: Contact) -> Self {
        Self {
            nickname: nickname.into(),
            contact,
        }
    }
}
