//! Main token service implementation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info};

use ph_shared::config::JwtConfig;

use crate::domain::entities::{Account, Claims, SessionToken};
use crate::errors::{DomainError, TokenError};

/// Issues and verifies session tokens
pub struct TokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    /// Revoked token ids mapped to their `exp`, kept until the token would
    /// have expired anyway
    revoked: RwLock<HashMap<String, i64>>,
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.validate_exp = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            revoked: RwLock::new(HashMap::new()),
        }
    }

    /// Issue a session token for `account`
    pub fn issue_session_token(&self, account: &Account) -> Result<SessionToken, DomainError> {
        let claims = Claims::for_account(
            account,
            &self.config.issuer,
            &self.config.audience,
            Utc::now(),
            Duration::days(self.config.expiry_days),
        );

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))?;

        debug!(account_id = %account.id, jti = %claims.jti, "Issued session token");
        Ok(SessionToken::bearer(token, claims.expires_at()))
    }

    /// Verify a session token and return its claims
    ///
    /// # Returns
    /// * `Ok(Claims)` - Valid, unexpired and not revoked
    /// * `Err(TokenError::TokenExpired)` - Past `exp`
    /// * `Err(TokenError::TokenRevoked)` - Logged out
    /// * `Err(TokenError::InvalidTokenFormat)` - Anything else
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature {
                DomainError::Token(TokenError::TokenExpired)
            } else {
                DomainError::Token(TokenError::InvalidTokenFormat)
            }
        })?;

        if self.is_revoked(&token_data.claims.jti) {
            return Err(DomainError::Token(TokenError::TokenRevoked));
        }

        Ok(token_data.claims)
    }

    /// Revoke the token carrying `claims`
    pub fn revoke(&self, claims: &Claims) {
        let now = Utc::now().timestamp();
        let mut revoked = self.revoked.write().unwrap_or_else(PoisonError::into_inner);
        revoked.retain(|_, exp| *exp > now);
        revoked.insert(claims.jti.clone(), claims.exp);
        info!(account_id = %claims.sub, jti = %claims.jti, "Session token revoked");
    }

    pub fn is_revoked(&self, jti: &str) -> bool {
        self.revoked
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(jti)
    }
}
