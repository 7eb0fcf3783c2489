//! Unit tests for the token verifier

use chrono::{Duration, TimeZone, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};

use crate::domain::entities::Role;
use crate::errors::TokenError;
use crate::services::token::{TokenVerifier, TokenVerifierConfig};

const SECRET: &str = "test-signing-secret";

fn mint(claims: Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

fn future_exp() -> i64 {
    (Utc::now() + Duration::hours(1)).timestamp()
}

fn admin_claims(exp: i64) -> Value {
    json!({
        "id": "64b7f0c2a1b2c3d4e5f60718",
        "email": "admin@example.com",
        "role": "admin",
        "name": "Site Admin",
        "exp": exp
    })
}

#[test]
fn test_valid_token_yields_claims_verbatim() {
    let verifier = TokenVerifier::default();
    let identity = verifier.verify(Some(&mint(admin_claims(future_exp())))).unwrap();

    assert_eq!(identity.id, "64b7f0c2a1b2c3d4e5f60718");
    assert_eq!(identity.email, "admin@example.com");
    assert_eq!(identity.role, Role::Admin);
    assert_eq!(identity.name.as_deref(), Some("Site Admin"));
}

#[test]
fn test_missing_token() {
    let verifier = TokenVerifier::default();
    assert_eq!(verifier.verify(None), Err(TokenError::Missing));
    assert_eq!(verifier.verify(Some("")), Err(TokenError::Missing));
    assert_eq!(verifier.verify(Some("   ")), Err(TokenError::Missing));
}

#[test]
fn test_garbage_is_malformed() {
    let verifier = TokenVerifier::default();
    assert_eq!(verifier.verify(Some("not-a-jwt")), Err(TokenError::Malformed));
    assert_eq!(verifier.verify(Some("a.b.c")), Err(TokenError::Malformed));
}

#[test]
fn test_expired_whenever_exp_is_not_in_the_future() {
    let verifier = TokenVerifier::default();
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

    for offset in [0, 1, 60, 86_400 * 365] {
        let token = mint(admin_claims(now.timestamp() - offset));
        assert_eq!(verifier.verify_at(Some(&token), now), Err(TokenError::Expired));
    }

    let token = mint(admin_claims(now.timestamp() + 1));
    assert!(verifier.verify_at(Some(&token), now).is_ok());
}

#[test]
fn test_expiry_is_checked_before_role() {
    let verifier = TokenVerifier::default();
    let token = mint(json!({
        "id": "u1",
        "email": "u1@example.com",
        "role": "overlord",
        "exp": Utc::now().timestamp() - 10
    }));
    assert_eq!(verifier.verify(Some(&token)), Err(TokenError::Expired));
}

#[test]
fn test_missing_claims_are_malformed() {
    let verifier = TokenVerifier::default();

    let no_exp = mint(json!({"id": "u1", "email": "u1@example.com", "role": "user"}));
    assert_eq!(verifier.verify(Some(&no_exp)), Err(TokenError::Malformed));

    let no_email = mint(json!({"id": "u1", "role": "user", "exp": future_exp()}));
    assert_eq!(verifier.verify(Some(&no_email)), Err(TokenError::Malformed));

    let bad_role = mint(json!({"id": "u1", "email": "u1@example.com", "role": "guest", "exp": future_exp()}));
    assert_eq!(verifier.verify(Some(&bad_role)), Err(TokenError::Malformed));
}

#[test]
fn test_subject_claim_is_accepted_as_id() {
    let verifier = TokenVerifier::default();
    let token = mint(json!({
        "sub": "u9",
        "email": "u9@example.com",
        "role": "Decorator",
        "exp": future_exp()
    }));
    let identity = verifier.verify(Some(&token)).unwrap();
    assert_eq!(identity.id, "u9");
    assert_eq!(identity.role, Role::Decorator);
    assert!(identity.name.is_none());
}

#[test]
fn test_signature_checked_when_secret_configured() {
    let token = mint(admin_claims(future_exp()));

    let matching = TokenVerifier::new(TokenVerifierConfig::with_secret(SECRET));
    assert!(matching.verify(Some(&token)).is_ok());

    let other = TokenVerifier::new(TokenVerifierConfig::with_secret("another-secret"));
    assert_eq!(other.verify(Some(&token)), Err(TokenError::Malformed));
}

#[test]
fn test_leeway_extends_validity() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let token = mint(admin_claims(now.timestamp() - 30));

    let strict = TokenVerifier::default();
    assert_eq!(strict.verify_at(Some(&token), now), Err(TokenError::Expired));

    let lenient = TokenVerifier::new(TokenVerifierConfig {
        leeway_seconds: 60,
        ..Default::default()
    });
    assert!(lenient.verify_at(Some(&token), now).is_ok());
}

#[test]
fn test_config_from_shared_jwt_config() {
    let shared = dm_shared::JwtConfig {
        secret: Some(String::new()),
        algorithm: "HS512".to_string(),
        leeway_seconds: 5,
    };
    let config = TokenVerifierConfig::from(&shared);
    assert!(config.secret.is_none());
    assert_eq!(config.algorithm, jsonwebtoken::Algorithm::HS512);
    assert_eq!(config.leeway_seconds, 5);
}
