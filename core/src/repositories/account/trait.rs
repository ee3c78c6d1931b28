//! Identity store interface.
//!
//! The identity store owns account records, password hashes and password
//! reset tokens. The core never sees a password hash; it hands plaintext
//! passwords to the store and asks it to verify or replace them.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Account, NewAccount};
use crate::errors::DomainError;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Account>, DomainError>;

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<Account>, DomainError>;

    /// Create an account with the given password
    ///
    /// # Returns
    /// * `Ok(Account)` - The stored account
    /// * `Err(DomainError)` - Uniqueness or password policy violation, or a
    ///   storage failure. The message is safe to show to the client.
    async fn create(&self, account: NewAccount, password: &str) -> Result<Account, DomainError>;

    /// Check a plaintext password against the stored hash
    async fn verify_password(&self, account_id: Uuid, password: &str) -> Result<bool, DomainError>;

    /// Issue a single-use token authorising one password change
    async fn issue_password_reset_token(&self, account: &Account) -> Result<String, DomainError>;

    /// Consume a reset token and set the new password. Fails if the token
    /// is unknown, already used, or belongs to another account.
    async fn consume_password_reset_token(
        &self,
        account: &Account,
        token: &str,
        new_password: &str,
    ) -> Result<(), DomainError>;
}
