//! Login identifier and password rules
//!
//! A user signs in with a phone number, an email address or a nickname, and
//! registers with a phone number or an email address. The three patterns
//! are disjoint: phone numbers contain no `@` and never start with a letter,
//! nicknames always start with a letter and contain no `@`. Classification
//! still runs in a fixed order (phone, email, nickname) so the result never
//! depends on pattern overlap.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?\(?[0-9]{3}\)?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$").unwrap()
});

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w.-]+@([\w-]+\.)+[\w-]{2,4}$").unwrap()
});

static NICKNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9_-]+$").unwrap()
});

static UPPER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").unwrap());
static LOWER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]").unwrap());
static DIGIT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").unwrap());
static SYMBOL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\W_]").unwrap());

pub const NICKNAME_MIN_LEN: usize = 3;
pub const NICKNAME_MAX_LEN: usize = 15;
pub const PASSWORD_MIN_LEN: usize = 8;

/// What kind of identifier a free-form string is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
    Phone,
    Email,
    Nickname,
    Invalid,
}

impl IdentifierKind {
    /// Only phone numbers and email addresses can receive codes
    pub fn is_contact(&self) -> bool {
        matches!(self, IdentifierKind::Phone | IdentifierKind::Email)
    }
}

impl std::fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentifierKind::Phone => write!(f, "phone"),
            IdentifierKind::Email => write!(f, "email"),
            IdentifierKind::Nickname => write!(f, "nickname"),
            IdentifierKind::Invalid => write!(f, "invalid"),
        }
    }
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_REGEX.is_match(value)
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// 3 to 15 characters, starting with a letter, then letters, digits, `_` or `-`
pub fn is_valid_nickname(value: &str) -> bool {
    let len = value.chars().count();
    (NICKNAME_MIN_LEN..=NICKNAME_MAX_LEN).contains(&len) && NICKNAME_REGEX.is_match(value)
}

/// At least 8 characters with an uppercase letter, a lowercase letter,
/// a digit and a symbol
pub fn is_strong_password(value: &str) -> bool {
    value.chars().count() >= PASSWORD_MIN_LEN
        && UPPER_REGEX.is_match(value)
        && LOWER_REGEX.is_match(value)
        && DIGIT_REGEX.is_match(value)
        && SYMBOL_REGEX.is_match(value)
}

/// Classify an identifier, checking phone, then email, then nickname
pub fn classify(value: &str) -> IdentifierKind {
    if is_valid_phone(value) {
        IdentifierKind::Phone
    } else if is_valid_email(value) {
        IdentifierKind::Email
    } else if is_valid_nickname(value) {
        IdentifierKind::Nickname
    } else {
        IdentifierKind::Invalid
    }
}

/// Mask an identifier for logs (e.g. `+12****7890`, `u***@mail.com`)
pub fn mask_identifier(value: &str) -> String {
    if let Some((local, domain)) = value.split_once('@') {
        let first: String = local.chars().take(1).collect();
        return format!("{}***@{}", first, domain);
    }

    let chars: Vec<char> = value.chars().filter(|c| !c.is_whitespace()).collect();
    if chars.len() >= 7 {
        let head: String = chars[..3].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}****{}", head, tail)
    } else {
        "****".to_string()
    }
}
