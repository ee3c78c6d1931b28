//! Confirmation codes sent during registration and password reset.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::Rng;
use serde::{Deserialize, Serialize};

use ph_shared::IdentifierKind;

/// Number of digits in a confirmation code
pub const CODE_LENGTH: usize = 6;

/// Smallest code that can be issued
pub const CODE_MIN: u32 = 100_000;

/// Largest code that can be issued
pub const CODE_MAX: u32 = 999_999;

/// Which flow a code belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeKind {
    Registration,
    PasswordReset,
}

impl std::fmt::Display for CodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodeKind::Registration => write!(f, "registration"),
            CodeKind::PasswordReset => write!(f, "password_reset"),
        }
    }
}

/// A deliverable address: an email address or a phone number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "channel", content = "address", rename_all = "lowercase")]
pub enum Contact {
    Email(String),
    Phone(String),
}

impl Contact {
    /// Wrap an already classified identifier. Nicknames and invalid
    /// identifiers cannot receive codes.
    pub fn from_identifier(value: &str, kind: IdentifierKind) -> Option<Self> {
        match kind {
            IdentifierKind::Email => Some(Contact::Email(value.to_string())),
            IdentifierKind::Phone => Some(Contact::Phone(value.to_string())),
            IdentifierKind::Nickname | IdentifierKind::Invalid => None,
        }
    }

    /// The raw address, also the key under which codes and attempts are tracked
    pub fn address(&self) -> &str {
        match self {
            Contact::Email(address) | Contact::Phone(address) => address,
        }
    }

    pub fn is_phone(&self) -> bool {
        matches!(self, Contact::Phone(_))
    }

    /// Human name of the channel ("email" / "phone")
    pub fn channel_name(&self) -> &'static str {
        match self {
            Contact::Email(_) => "email",
            Contact::Phone(_) => "phone",
        }
    }
}

/// Generate a 6-digit code, uniform over [`CODE_MIN`, `CODE_MAX`]
pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    rng.gen_range(CODE_MIN..=CODE_MAX).to_string()
}

/// A code waiting to be confirmed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCode {
    pub code: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl PendingCode {
    /// Issue a fresh random code valid for `lifetime` from `now`
    pub fn issue(now: DateTime<Utc>, lifetime: Duration) -> Self {
        Self::with_code(generate_code(), now, lifetime)
    }

    pub fn with_code(code: impl Into<String>, now: DateTime<Utc>, lifetime: Duration) -> Self {
        Self {
            code: code.into(),
            issued_at: now,
            expires_at: now + lifetime,
        }
    }

    /// A code is still valid at exactly its expiry instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn matches(&self, candidate: &str) -> bool {
        constant_time_eq(self.code.as_bytes(), candidate.as_bytes())
    }

    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}
