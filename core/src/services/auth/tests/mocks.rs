//! Mock implementations for auth service tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use ph_shared::identifier::is_strong_password;

use crate::domain::entities::{Account, CodeKind, NewAccount};
use crate::errors::{AuthError, DomainError};
use crate::repositories::AccountRepository;
use crate::services::notification::{EmailSender, SmsSender};

/// Account store keeping plaintext passwords
pub struct MockAccountRepository {
    accounts: Mutex<Vec<(Account, String)>>,
    reset_tokens: Mutex<Vec<(Uuid, String)>>,
    fail_create: AtomicBool,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(Vec::new()),
            reset_tokens: Mutex::new(Vec::new()),
            fail_create: AtomicBool::new(false),
        }
    }

    pub fn insert(&self, account: Account, password: &str) {
        self.accounts
            .lock()
            .unwrap()
            .push((account, password.to_string()));
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }

    pub fn password_of(&self, id: Uuid) -> Option<String> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|(a, _)| a.id == id)
            .map(|(_, p)| p.clone())
    }

    fn find(&self, pred: impl Fn(&Account) -> bool) -> Option<Account> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|(a, _)| pred(a))
            .map(|(a, _)| a.clone())
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        Ok(self.find(|a| a.id == id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        Ok(self.find(|a| a.email.as_deref() == Some(email)))
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Account>, DomainError> {
        Ok(self.find(|a| a.phone_number.as_deref() == Some(phone)))
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<Account>, DomainError> {
        Ok(self.find(|a| a.nickname == nickname))
    }

    async fn create(&self, account: NewAccount, password: &str) -> Result<Account, DomainError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(DomainError::Validation {
                message: "Identity store unavailable.".to_string(),
            });
        }
        if self.find(|a| a.nickname == account.nickname).is_some() {
            return Err(AuthError::NicknameTaken.into());
        }
        let account = Account::from_new(account);
        self.insert(account.clone(), password);
        Ok(account)
    }

    async fn verify_password(&self, account_id: Uuid, password: &str) -> Result<bool, DomainError> {
        Ok(self.password_of(account_id).as_deref() == Some(password))
    }

    async fn issue_password_reset_token(&self, account: &Account) -> Result<String, DomainError> {
        let token = Uuid::new_v4().to_string();
        self.reset_tokens
            .lock()
            .unwrap()
            .push((account.id, token.clone()));
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
        let mut tokens = self.reset_tokens.lock().unwrap();
        let position = tokens
            .iter()
            .position(|(id, t)| *id == account.id && t == token)
            .ok_or_else(|| DomainError::Validation {
                message: "Invalid token.".to_string(),
            })?;
        tokens.remove(position);

        let mut accounts = self.accounts.lock().unwrap();
        if let Some(entry) = accounts.iter_mut().find(|(a, _)| a.id == account.id) {
            entry.1 = new_password.to_string();
        }
        Ok(())
    }
}

/// Records every code it is asked to send
pub struct RecordingSender {
    pub sent: Mutex<Vec<(String, CodeKind, String)>>,
    fail: AtomicBool,
    delay_ms: AtomicU64,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
            delay_ms: AtomicU64::new(0),
        }
    }

    /// Make every delivery take `ms` milliseconds
    pub fn set_delay_ms(&self, ms: u64) {
        self.delay_ms.store(ms, Ordering::SeqCst);
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last_code(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|(_, _, c)| c.clone())
    }

    pub fn last_recipient(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|(r, _, _)| r.clone())
    }

    async fn record(&self, to: &str, kind: CodeKind, code: &str) -> Result<(), DomainError> {
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::internal("provider down"));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), kind, code.to_string()));
        Ok(())
    }
}

#[async_trait]
impl EmailSender for RecordingSender {
    async fn send_code(&self, address: &str, kind: CodeKind, code: &str) -> Result<(), DomainError> {
        self.record(address, kind, code).await
    }
}

#[async_trait]
impl SmsSender for RecordingSender {
    async fn send_code(&self, phone: &str, kind: CodeKind, code: &str) -> Result<(), DomainError> {
        self.record(phone, kind, code).await
    }
}
