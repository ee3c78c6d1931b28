//! Tests for the in-memory identity store

use ph_core::domain::entities::{Contact, NewAccount};
use ph_core::errors::{AuthError, DomainError};
use ph_core::repositories::AccountRepository;

use crate::identity::InMemoryAccountRepository;

const PASSWORD: &str = "Str0ng!Pw";

fn repo() -> InMemoryAccountRepository {
    // Lowest bcrypt cost keeps the tests fast
    InMemoryAccountRepository::new(4)
}

fn email_account(nickname: &str, email: &str) -> NewAccount {
    NewAccount::new(nickname, Contact::Email(email.to_string()))
}

#[tokio::test]
async fn test_create_and_lookup() {
    let repo = repo();
    let account = repo
        .create(email_account("validNick1", "user@test.com"), PASSWORD)
        .await
        .unwrap();

    assert!(account.email_confirmed);
    assert!(!account.phone_confirmed);
    assert_eq!(repo.find_by_id(account.id).await.unwrap(), Some(account.clone()));
    assert_eq!(
        repo.find_by_email("USER@test.com").await.unwrap().map(|a| a.id),
        Some(account.id)
    );
    assert_eq!(
        repo.find_by_nickname("validNick1").await.unwrap().map(|a| a.id),
        Some(account.id)
    );
    assert!(repo.find_by_phone("+1234567890").await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_enforces_uniqueness() {
    let repo = repo();
    repo.create(email_account("validNick1", "user@test.com"), PASSWORD)
        .await
        .unwrap();

    let err = repo
        .create(email_account("otherNick", "user@test.com"), PASSWORD)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::IdentifierTaken)));

    let err = repo
        .create(email_account("validNick1", "other@test.com"), PASSWORD)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::NicknameTaken)));
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_create_enforces_password_policy() {
    let repo = repo();
    let err = repo
        .create(email_account("validNick1", "user@test.com"), "password")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::WeakPassword)));
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_verify_password() {
    let repo = repo();
    let account = repo
        .create(
            NewAccount::new("phoneUser", Contact::Phone("+1234567890".to_string())),
            PASSWORD,
        )
        .await
        .unwrap();

    assert!(repo.verify_password(account.id, PASSWORD).await.unwrap());
    assert!(!repo.verify_password(account.id, "Wr0ng!Pass").await.unwrap());
    assert!(!repo
        .verify_password(uuid::Uuid::new_v4(), PASSWORD)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_reset_token_is_single_use() {
    let repo = repo();
    let account = repo
        .create(email_account("validNick1", "user@test.com"), PASSWORD)
        .await
        .unwrap();

    let token = repo.issue_password_reset_token(&account).await.unwrap();
    repo.consume_password_reset_token(&account, &token, "N3w!Passw0rd")
        .await
        .unwrap();

    assert!(repo.verify_password(account.id, "N3w!Passw0rd").await.unwrap());
    assert!(!repo.verify_password(account.id, PASSWORD).await.unwrap());

    let err = repo
        .consume_password_reset_token(&account, &token, "An0ther!Pass")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn test_reset_token_bound_to_account() {
    let repo = repo();
    let owner = repo
        .create(email_account("ownerNick", "owner@test.com"), PASSWORD)
        .await
        .unwrap();
    let other = repo
        .create(email_account("otherNick", "other@test.com"), PASSWORD)
        .await
        .unwrap();

    let token = repo.issue_password_reset_token(&owner).await.unwrap();
    assert!(repo
        .consume_password_reset_token(&other, &token, "N3w!Passw0rd")
        .await
        .is_err());

    // Still usable by its owner
    repo.consume_password_reset_token(&owner, &token, "N3w!Passw0rd")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_weak_new_password_keeps_token() {
    let repo = repo();
    let account = repo
        .create(email_account("validNick1", "user@test.com"), PASSWORD)
        .await
        .unwrap();
    let token = repo.issue_password_reset_token(&account).await.unwrap();

    let err = repo
        .consume_password_reset_token(&account, &token, "weak")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::WeakPassword)));

    repo.consume_password_reset_token(&account, &token, "N3w!Passw0rd")
        .await
        .unwrap();
}
