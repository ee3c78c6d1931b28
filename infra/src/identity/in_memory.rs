//! In-memory identity store
//!
//! Accounts live in a map keyed by id. Passwords are stored as bcrypt
//! hashes. Password reset tokens are random, handed out once, and kept
//! only as SHA-256 digests.

use async_trait::async_trait;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use ph_core::domain::entities::{Account, Contact, NewAccount};
use ph_core::errors::{AuthError, DomainError};
use ph_core::repositories::AccountRepository;
use ph_shared::identifier::{is_strong_password, is_valid_nickname};

use crate::InfrastructureError;

/// How long an issued reset token may be consumed
pub const RESET_TOKEN_LIFETIME_MINUTES: i64 = 15;

struct StoredAccount {
    account: Account,
    password_hash: String,
}

struct ResetToken {
    account_id: Uuid,
    expires_at: DateTime<Utc>,
}

pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<Uuid, StoredAccount>>,
    /// Keyed by hex SHA-256 of the raw token
    reset_tokens: Mutex<HashMap<String, ResetToken>>,
    hash_cost: u32,
}

impl InMemoryAccountRepository {
    pub fn new(hash_cost: u32) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            reset_tokens: Mutex::new(HashMap::new()),
            hash_cost,
        }
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn find(&self, pred: impl Fn(&Account) -> bool) -> Option<Account> {
        self.accounts
            .read()
            .await
            .values()
            .find(|stored| pred(&stored.account))
            .map(|stored| stored.account.clone())
    }

    async fn hash_password(&self, password: &str) -> Result<String, InfrastructureError> {
        let password = password.to_string();
        let cost = self.hash_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| InfrastructureError::General(format!("Hashing task failed: {}", e)))?
            .map_err(InfrastructureError::from)
    }
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

fn digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn invalid_token() -> DomainError {
    DomainError::Validation {
        message: "Invalid or expired password reset token.".to_string(),
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        Ok(self
            .accounts
            .read()
            .await
            .get(&id)
            .map(|stored| stored.account.clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        Ok(self
            .find(|a| a.email.as_deref().is_some_and(|e| e.eq_ignore_ascii_case(email)))
            .await)
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Account>, DomainError> {
        Ok(self.find(|a| a.phone_number.as_deref() == Some(phone)).await)
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<Account>, DomainError> {
        Ok(self.find(|a| a.nickname == nickname).await)
    }

    async fn create(&self, new: NewAccount, password: &str) -> Result<Account, DomainError> {
        if !is_valid_nickname(&new.nickname) {
            return Err(AuthError::InvalidNickname.into());
        }
        if !is_strong_password(password) {
            return Err(AuthError::WeakPassword.into());
        }

        let password_hash = self.hash_password(password).await?;

        // Uniqueness is checked under the write lock so two confirmations
        // for the same nickname cannot both succeed
        let mut accounts = self.accounts.write().await;
        for stored in accounts.values() {
            let existing = &stored.account;
            let contact_taken = match &new.contact {
                Contact::Email(email) => existing
                    .email
                    .as_deref()
                    .is_some_and(|e| e.eq_ignore_ascii_case(email)),
                Contact::Phone(phone) => existing.phone_number.as_deref() == Some(phone.as_str()),
            };
            if contact_taken {
                return Err(AuthError::IdentifierTaken.into());
            }
            if existing.nickname == new.nickname {
                return Err(AuthError::NicknameTaken.into());
            }
        }

        let account = Account::from_new(new);
        accounts.insert(
            account.id,
            StoredAccount {
                account: account.clone(),
                password_hash,
            },
        );

        info!(account_id = %account.id, "Account stored");
        Ok(account)
    }

    async fn verify_password(&self, account_id: Uuid, password: &str) -> Result<bool, DomainError> {
        let hash = match self.accounts.read().await.get(&account_id) {
            Some(stored) => stored.password_hash.clone(),
            None => return Ok(false),
        };
        let password = password.to_string();

        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| InfrastructureError::General(format!("Hashing task failed: {}", e)))?
            .map_err(InfrastructureError::from)?;
        Ok(verified)
    }

    async fn issue_password_reset_token(&self, account: &Account) -> Result<String, DomainError> {
        let token = generate_token();
        let now = Utc::now();

        let mut tokens = self.reset_tokens.lock().await;
        tokens.retain(|_, t| t.expires_at > now);
        tokens.insert(
            digest(&token),
            ResetToken {
                account_id: account.id,
                expires_at: now + Duration::minutes(RESET_TOKEN_LIFETIME_MINUTES),
            },
        );

        debug!(account_id = %account.id, "Password reset token issued");
        Ok(token)
    }

    async fn consume_password_reset_token(
        &self,
        account: &Account,
        token: &str,
        new_password: &str,
    ) -> Result<(), DomainError> {
        if !is_strong_password(new_password) {
            return Err(AuthError::WeakPassword.into());
        }

        let key = digest(token);
        {
            let mut tokens = self.reset_tokens.lock().await;
            match tokens.get(&key) {
                Some(t) if t.account_id == account.id && t.expires_at > Utc::now() => {
                    tokens.remove(&key);
                }
                _ => return Err(invalid_token()),
            }
        }

        let password_hash = self.hash_password(new_password).await?;
        let mut accounts = self.accounts.write().await;
        let stored = accounts
            .get_mut(&account.id)
            .ok_or(AuthError::AccountNotFound)?;
        stored.password_hash = password_hash;

        info!(account_id = %account.id, "Password changed");
        Ok(())
    }
}
