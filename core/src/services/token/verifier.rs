//! Credential decoding and expiry checks

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde_json::Value;
use tracing::debug;

use crate::domain::entities::Role;
use crate::domain::value_objects::Identity;
use crate::errors::TokenError;

use super::config::TokenVerifierConfig;

/// Turns a stored credential into an identity
///
/// Expiry is checked here against an explicit clock rather than inside
/// `jsonwebtoken`, so an expired token is reported as `Expired` even when
/// its other claims are unusable.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    leeway_seconds: i64,
}

impl TokenVerifier {
    /// Creates a new token verifier
    ///
    /// # Arguments
    ///
    /// * `config` - Secret, algorithm and expiry leeway
    pub fn new(config: TokenVerifierConfig) -> Self {
        let mut validation = Validation::new(config.algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let decoding_key = match &config.secret {
            Some(secret) => DecodingKey::from_secret(secret.as_bytes()),
            None => {
                validation.insecure_disable_signature_validation();
                DecodingKey::from_secret(&[])
            }
        };

        Self {
            decoding_key,
            validation,
            leeway_seconds: config.leeway_seconds,
        }
    }

    /// Verify against the current time
    pub fn verify(&self, token: Option<&str>) -> Result<Identity, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a credential as of `now`
    ///
    /// # Returns
    ///
    /// * `Err(TokenError::Missing)` - no token, or an empty one
    /// * `Err(TokenError::Malformed)` - undecodable, bad signature, no `exp`,
    ///   no id or email, or a role outside the known set
    /// * `Err(TokenError::Expired)` - `exp` is not in the future
    /// * `Ok(Identity)` - the claims, verbatim
    pub fn verify_at(&self, token: Option<&str>, now: DateTime<Utc>) -> Result<Identity, TokenError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(TokenError::Missing)?;

        let claims = decode::<Value>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(error = %e, "Credential could not be decoded");
                TokenError::Malformed
            })?
            .claims;

        let exp = claims
            .get("exp")
            .and_then(Value::as_f64)
            .filter(|exp| exp.is_finite())
            .ok_or(TokenError::Malformed)?;

        if (exp.floor() as i64).saturating_add(self.leeway_seconds) <= now.timestamp() {
            return Err(TokenError::Expired);
        }

        let id = first_string(&claims, &["id", "_id", "sub"]).ok_or(TokenError::Malformed)?;
        let email = first_string(&claims, &["email"]).ok_or(TokenError::Malformed)?;
        let role = claims
            .get("role")
            .and_then(Value::as_str)
            .and_then(Role::parse)
            .ok_or(TokenError::Malformed)?;
        let name = first_string(&claims, &["name"]);

        Ok(Identity::new(id, email, role, name))
    }
}

impl Default for TokenVerifier {
    fn default() -> Self {
        Self::new(TokenVerifierConfig::default())
    }
}

fn first_string(claims: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| claims.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
