//! Session token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::Account;

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,

    /// JWT ID, the handle used to revoke a single token on logout
    pub jti: String,

    /// Display name (nickname)
    pub name: String,

    pub username: String,

    pub iat: i64,

    pub exp: i64,

    pub iss: String,

    pub aud: String,
}

impl Claims {
    /// Creates claims for a session token issued to `account`
    pub fn for_account(
        account: &Account,
        issuer: &str,
        audience: &str,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            sub: account.id.to_string(),
            jti: Uuid::new_v4().to_string(),
            name: account.nickname.clone(),
            username: account.nickname.clone(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
        }
    }

    pub fn account_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Signed session token handed to a client after login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    pub token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionToken {
    pub fn bearer(token: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            expires_at,
        }
    }
}
