//! Main authentication service implementation

use std::sync::Arc;
use tracing::{error, info, warn};

use ph_shared::identifier::{classify, is_strong_password, is_valid_nickname, mask_identifier};
use ph_shared::IdentifierKind;

use crate::domain::entities::{Account, Claims, CodeKind, Contact, NewAccount};
use crate::domain::value_objects::{AuthResponse, CodeDispatch};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::AccountRepository;
use crate::services::confirmation::ConfirmationEngine;
use crate::services::notification::{EmailSender, SmsSender};
use crate::services::token::TokenService;

/// Authentication service orchestrating confirmation codes, the identity
/// store and session tokens
pub struct AuthService {
    /// Identity store
    accounts: Arc<dyn AccountRepository>,
    /// Pending codes and send limits
    engine: Arc<ConfirmationEngine>,
    email: Arc<dyn EmailSender>,
    sms: Arc<dyn SmsSender>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        engine: Arc<ConfirmationEngine>,
        email: Arc<dyn EmailSender>,
        sms: Arc<dyn SmsSender>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            accounts,
            engine,
            email,
            sms,
            tokens,
        }
    }

    /// Start a registration by sending a confirmation code
    ///
    /// This method:
    /// 1. Validates nickname, password and identifier (phone or email)
    /// 2. Rejects an identifier or nickname that is already taken
    /// 3. Checks the registration send limit for the identifier
    /// 4. Stores a fresh code, replacing any pending one
    /// 5. Sends the code over the identifier's channel
    /// 6. Records the send attempt
    ///
    /// # Returns
    ///
    /// * `Ok(CodeDispatch)` - Where the code went
    /// * `Err(DomainError)` - Validation, conflict, rate limit or delivery failure
    pub async fn register(
        &self,
        identifier: &str,
        nickname: &str,
        password: &str,
    ) -> DomainResult<CodeDispatch> {
        // Step 1: Validate input
        if !is_valid_nickname(nickname) {
            return Err(AuthError::InvalidNickname.into());
        }
        if !is_strong_password(password) {
            return Err(AuthError::WeakPassword.into());
        }
        let contact = Contact::from_identifier(identifier, classify(identifier))
            .ok_or(AuthError::InvalidIdentifier)?;

        // Step 2: Uniqueness
        let existing = match &contact {
            Contact::Phone(phone) => self.accounts.find_by_phone(phone).await?,
            Contact::Email(email) => self.accounts.find_by_email(email).await?,
        };
        if existing.is_some() {
            return Err(AuthError::IdentifierTaken.into());
        }
        if self.accounts.find_by_nickname(nickname).await?.is_some() {
            return Err(AuthError::NicknameTaken.into());
        }

        // Steps 3-6: Throttle, store, deliver, record
        self.dispatch_code(CodeKind::Registration, &contact).await?;

        let message = if contact.is_phone() {
            "Check your SMS for confirmation."
        } else {
            "Check your email for confirmation."
        };
        Ok(CodeDispatch::new(message, &contact))
    }

    /// Finish a registration
    ///
    /// The pending entry is removed only after the identity store has created
    /// the account. If creation fails the code stays valid for a retry.
    pub async fn confirm_registration(
        &self,
        identifier: &str,
        nickname: &str,
        password: &str,
        code: &str,
    ) -> DomainResult<Account> {
        let codes = self.engine.codes(CodeKind::Registration);
        let pending = codes.verify(identifier, code).map_err(|e| {
            warn!(
                event = "registration_confirm_rejected",
                identifier = %mask_identifier(identifier),
                reason = %e,
                "Registration confirmation rejected"
            );
            e
        })?;

        let contact = Contact::from_identifier(identifier, classify(identifier))
            .ok_or(AuthError::InvalidIdentifier)?;

        let account = self
            .accounts
            .create(NewAccount::new(nickname, contact), password)
            .await
            .map_err(|e| {
                error!(
                    identifier = %mask_identifier(identifier),
                    error = %e,
                    "Identity store rejected confirmed registration"
                );
                AuthError::UpstreamFailure {
                    message: e.client_message(),
                }
            })?;

        codes.consume(identifier, &pending.code);

        info!(
            event = "registration_completed",
            account_id = %account.id,
            identifier = %mask_identifier(identifier),
            "Registration completed"
        );
        Ok(account)
    }

    /// Send a password reset code to the account's contact method
    ///
    /// The account may be named by email, phone or nickname. The code goes to
    /// its email address if it has one, otherwise to its phone number, and
    /// the send limit is tracked per contact method.
    pub async fn request_password_reset(&self, identifier: &str) -> DomainResult<CodeDispatch> {
        let account = self.resolve_account(identifier).await?;
        let contact = account.reset_contact().ok_or(AuthError::NoContactMethod)?;

        self.dispatch_code(CodeKind::PasswordReset, &contact).await?;

        Ok(CodeDispatch::new(
            format!(
                "The password reset code has been sent to your {}.",
                contact.channel_name()
            ),
            &contact,
        ))
    }

    /// Set a new password using a reset code
    pub async fn reset_password(
        &self,
        identifier: &str,
        code: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let account = self.resolve_account(identifier).await?;
        let contact = account.reset_contact().ok_or(AuthError::NoContactMethod)?;
        let key = contact.address();

        let codes = self.engine.codes(CodeKind::PasswordReset);
        let pending = codes.verify(key, code)?;

        if !is_strong_password(new_password) {
            return Err(AuthError::WeakPassword.into());
        }

        let upstream = |e: DomainError| {
            error!(account_id = %account.id, error = %e, "Password reset failed in identity store");
            AuthError::UpstreamFailure {
                message: e.client_message(),
            }
        };
        let token = self
            .accounts
            .issue_password_reset_token(&account)
            .await
            .map_err(upstream)?;
        self.accounts
            .consume_password_reset_token(&account, &token, new_password)
            .await
            .map_err(upstream)?;

        codes.consume(key, &pending.code);

        info!(
            event = "password_reset_completed",
            account_id = %account.id,
            "Password reset completed"
        );
        Ok(())
    }

    /// Authenticate with identifier and password and issue a session token
    pub async fn login(&self, identifier: &str, password: &str) -> DomainResult<AuthResponse> {
        if identifier.is_empty() || password.is_empty() {
            return Err(DomainError::Validation {
                message: "Identifier and password are required.".to_string(),
            });
        }

        let account = self.resolve_account(identifier).await?;

        if !self.accounts.verify_password(account.id, password).await? {
            warn!(
                event = "login_failed",
                account_id = %account.id,
                "Invalid credentials"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        let session = self.tokens.issue_session_token(&account)?;
        info!(event = "login", account_id = %account.id, "User logged in");
        Ok(AuthResponse::new(session, &account))
    }

    /// End the session the given token belongs to
    pub async fn logout(&self, claims: &Claims) -> DomainResult<()> {
        self.tokens.revoke(claims);
        info!(event = "logout", account_id = %claims.sub, "User logged out");
        Ok(())
    }

    /// Find the account named by an email, phone number or nickname
    async fn resolve_account(&self, identifier: &str) -> DomainResult<Account> {
        let account = match classify(identifier) {
            IdentifierKind::Email => self.accounts.find_by_email(identifier).await?,
            IdentifierKind::Phone => self.accounts.find_by_phone(identifier).await?,
            IdentifierKind::Nickname => self.accounts.find_by_nickname(identifier).await?,
            IdentifierKind::Invalid => {
                return Err(DomainError::Validation {
                    message: "Invalid identifier format.".to_string(),
                })
            }
        };
        account.ok_or_else(|| AuthError::AccountNotFound.into())
    }

    /// Throttle, store and deliver a code for `contact`
    ///
    /// The send is reserved in the limiter before anything is awaited, so
    /// concurrent requests for one contact cannot exceed the limit. The
    /// pending entry is written before delivery and kept if delivery fails;
    /// the reserved attempt counts either way.
    async fn dispatch_code(&self, kind: CodeKind, contact: &Contact) -> DomainResult<()> {
        let key = contact.address();
        let limiter = self.engine.limiter(kind);

        if !limiter.try_acquire(key) {
            let wait = limiter.retry_after(key).unwrap_or_else(|| limiter.window());
            let minutes = ((wait.num_seconds() + 59) / 60).max(1);
            warn!(
                event = "code_rate_limited",
                kind = %kind,
                identifier = %mask_identifier(key),
                retry_after_minutes = minutes,
                "Code request rate limited"
            );
            return Err(AuthError::RateLimited { minutes }.into());
        }

        let pending = self.engine.codes(kind).issue(key);

        let delivery = match contact {
            Contact::Email(address) => self.email.send_code(address, kind, &pending.code).await,
            Contact::Phone(phone) => self.sms.send_code(phone, kind, &pending.code).await,
        };

        if let Err(e) = delivery {
            error!(
                kind = %kind,
                channel = contact.channel_name(),
                identifier = %mask_identifier(key),
                error = %e,
                "Failed to deliver confirmation code"
            );
            return Err(AuthError::DeliveryFailed.into());
        }

        info!(
            event = "code_sent",
            kind = %kind,
            channel = contact.channel_name(),
            identifier = %mask_identifier(key),
            "Confirmation code sent"
        );
        Ok(())
    }
}
