//! Integration tests for token issuing/validation and password hashing.
//!
//! Tokens are minted and validated locally with the same HS256 secret the
//! server would use. No running server or database is needed.
//!
//! Run with: `cargo test --test auth_test`
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use gigmarket_backend::auth::jwt::{Claims, issue_token, validate_token};
use gigmarket_backend::auth::password::{hash_password, verify_password};
use gigmarket_backend::models::users::Roles;

/// A fake secret for testing — never use the real one in tests committed to git.
const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

#[test]
fn test_issued_token_round_trips() {
    let user_id = Uuid::new_v4();
    let token = issue_token(user_id, &Roles::Freelancer, TEST_SECRET).expect("issue should work");

    let claims = validate_token(&token, TEST_SECRET).expect("Token should be valid");

    assert_eq!(claims.user_id().unwrap(), user_id);
    assert_eq!(claims.role, "freelancer");
    // One-day expiry.
    assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
}

#[test]
fn test_client_role_is_embedded() {
    let token = issue_token(Uuid::new_v4(), &Roles::Client, TEST_SECRET).unwrap();
    let claims = validate_token(&token, TEST_SECRET).unwrap();
    assert_eq!(claims.role, "client");
}

#[test]
fn test_expired_token_is_rejected() {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        role: "client".to_string(),
        exp: now - 300, // expired 5 minutes ago (well past the 60s default leeway)
        iat: now - 3600,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let result = validate_token(&token, TEST_SECRET);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("ExpiredSignature"));
}

#[test]
fn test_wrong_secret_is_rejected() {
    let token = issue_token(Uuid::new_v4(), &Roles::Client, TEST_SECRET).unwrap();

    let result = validate_token(&token, "completely-wrong-secret-xxxxxxxxxxxxxxxxxxx");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("InvalidSignature"));
}

#[test]
fn test_garbage_token_is_rejected() {
    let result = validate_token("not.a.valid.jwt", TEST_SECRET);
    assert!(result.is_err());
}

#[test]
fn test_malformed_sub_claim_is_rejected() {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: "not-a-uuid".to_string(),
        role: "client".to_string(),
        exp: now + 3600,
        iat: now,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let claims = validate_token(&token, TEST_SECRET).expect("signature itself is fine");
    assert!(claims.user_id().is_err());
}

#[test]
fn test_password_hash_round_trip() {
    let hash = hash_password("hunter2hunter2").expect("hashing should work");

    // Salted: the hash never contains or equals the input.
    assert_ne!(hash, "hunter2hunter2");
    assert!(verify_password("hunter2hunter2", &hash).unwrap());
    assert!(!verify_password("wrong-password", &hash).unwrap());
}

#[test]
fn test_password_hashes_are_salted() {
    let a = hash_password("same-password").unwrap();
    let b = hash_password("same-password").unwrap();
    assert_ne!(a, b);
}
