//! Integration tests for registration, login and token verification.

mod common;

use blog_api::domain::{Credentials, Registration};
use blog_api::errors::AppError;
use blog_api::services::{AuthService, EMAIL_TAKEN_MESSAGE};

use common::TestServices;

fn registration(name: &str, email: &str, password: &str) -> Registration {
    Registration {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    }
}

fn credentials(email: &str, password: &str) -> Credentials {
    Credentials {
        email: email.to_string(),
        password: password.to_string(),
    }
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn test_register_returns_usable_token() {
    let services = TestServices::new();

    let response = services
        .auth
        .register(registration("Ada", "ada@example.com", "secret1"))
        .await
        .unwrap();

    assert_eq!(response.status, "success");
    assert_eq!(response.token_type, "Bearer");
    assert_eq!(response.expires_in, 24 * 3600);

    let user = services.auth.verify_token(&response.token).unwrap();
    let stored = services.store.stored_user("ada@example.com").unwrap();
    assert_eq!(user.id, stored.id);
    assert_eq!(user.email, "ada@example.com");
}

#[tokio::test]
async fn test_register_never_stores_plaintext_password() {
    let services = TestServices::new();
    services
        .auth
        .register(registration("Ada", "ada@example.com", "secret1"))
        .await
        .unwrap();

    let stored = services.store.stored_user("ada@example.com").unwrap();
    assert_ne!(stored.password_hash, "secret1");
    assert!(stored.password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn test_password_length_boundary() {
    let services = TestServices::new();

    let short = services
        .auth
        .register(registration("Ada", "ada@example.com", "12345"))
        .await
        .unwrap_err();
    assert!(short.field_errors().unwrap().contains("password"));
    assert_eq!(services.store.user_count(), 0);

    let exact = services
        .auth
        .register(registration("Ada", "ada@example.com", "123456"))
        .await;
    assert!(exact.is_ok());
}

#[tokio::test]
async fn test_register_rejects_overlong_name() {
    let services = TestServices::new();
    let name = "x".repeat(256);

    let err = services
        .auth
        .register(registration(&name, "ada@example.com", "secret1"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(err.field_errors().unwrap().contains("name"));
}

#[tokio::test]
async fn test_register_rejects_malformed_email() {
    let services = TestServices::new();

    let err = services
        .auth
        .register(registration("Ada", "not-an-email", "secret1"))
        .await
        .unwrap_err();

    let fields = err.field_errors().unwrap();
    assert!(fields.contains("email"));
    assert_eq!(fields.len(), 1);
}

#[tokio::test]
async fn test_duplicate_email_reported_alongside_other_errors() {
    let services = TestServices::new();
    services.register("Ada", "ada@example.com").await;

    let err = services
        .auth
        .register(registration("", "ada@example.com", "123"))
        .await
        .unwrap_err();

    let fields = err.field_errors().unwrap();
    assert_eq!(fields.get("email"), Some(EMAIL_TAKEN_MESSAGE));
    assert!(fields.contains("name"));
    assert!(fields.contains("password"));
    assert_eq!(services.store.user_count(), 1);
}

#[tokio::test]
async fn test_duplicate_email_alone() {
    let services = TestServices::new();
    services.register("Ada", "ada@example.com").await;

    let err = services
        .auth
        .register(registration("Another Ada", "ada@example.com", "secret1"))
        .await
        .unwrap_err();

    let fields = err.field_errors().unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields.get("email"), Some(EMAIL_TAKEN_MESSAGE));
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_with_registered_credentials() {
    let services = TestServices::new();
    let (_, user) = services.register("Ada", "ada@example.com").await;

    let response = services
        .auth
        .login(credentials("ada@example.com", "secret1"))
        .await
        .unwrap();

    assert_eq!(response.status, "success");
    assert_eq!(services.auth.verify_token(&response.token).unwrap(), user);
}

#[tokio::test]
async fn test_each_login_issues_a_fresh_valid_token() {
    let services = TestServices::new();
    let (registered, _) = services.register("Ada", "ada@example.com").await;

    let login = services
        .auth
        .login(credentials("ada@example.com", "secret1"))
        .await
        .unwrap();

    assert_ne!(registered.token, login.token);
    assert!(services.auth.verify_token(&registered.token).is_ok());
    assert!(services.auth.verify_token(&login.token).is_ok());
}

#[tokio::test]
async fn test_login_does_not_reveal_registered_emails() {
    let services = TestServices::new();
    services.register("Ada", "ada@example.com").await;

    let wrong_password = services
        .auth
        .login(credentials("ada@example.com", "wrong-password"))
        .await
        .unwrap_err();
    let unknown_email = services
        .auth
        .login(credentials("nobody@example.com", "secret1"))
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, AppError::InvalidCredentials));
    assert!(matches!(unknown_email, AppError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    assert_eq!(wrong_password.code(), unknown_email.code());
}

#[tokio::test]
async fn test_login_with_empty_body_fields() {
    let services = TestServices::new();

    let err = services
        .auth
        .login(Credentials::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidCredentials));
}

// =============================================================================
// Token verification
// =============================================================================

#[tokio::test]
async fn test_verify_rejects_tampered_token() {
    let services = TestServices::new();
    let (token, _) = services.register("Ada", "ada@example.com").await;

    let mut tampered = token.token.clone();
    tampered.push('x');

    assert!(services.auth.verify_token(&tampered).is_err());
    assert!(services.auth.verify_token("").is_err());
}
