use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config;

/// Claims embedded in an access token.
///
/// The authentication endpoint signs whatever JSON object the client posts,
/// so everything beyond the expiry fields rides along in `extra`. An identity
/// without a usable email simply matches no stored user downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub exp: i64,
    pub iat: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    pub fn new(mut payload: Map<String, Value>, ttl_days: i64) -> Self {
        let now = Utc::now();
        // The expiry fields are always server-assigned
        payload.remove("exp");
        payload.remove("iat");

        Self {
            exp: (now + Duration::days(ttl_days)).timestamp(),
            iat: now.timestamp(),
            extra: payload,
        }
    }

    pub fn email(&self) -> Option<&str> {
        self.extra.get("email").and_then(Value::as_str)
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token signing secret is not configured")]
    MissingSecret,
    #[error("token generation error: {0}")]
    Generation(String),
    #[error("token verification error: {0}")]
    Verification(String),
}

/// Sign the posted claims with the configured secret and expiry window.
pub fn issue_token(payload: Map<String, Value>) -> Result<String, TokenError> {
    let security = &config::config().security;
    let claims = Claims::new(payload, security.token_ttl_days);
    encode_claims(&claims, &security.jwt_secret)
}

/// Validate signature and expiry against the configured secret.
pub fn verify_token(token: &str) -> Result<Claims, TokenError> {
    decode_claims(token, &config::config().security.jwt_secret)
}

pub(crate) fn encode_claims(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| TokenError::Generation(e.to_string()))
}

pub(crate) fn decode_claims(token: &str, secret: &str) -> Result<Claims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| TokenError::Verification(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SECRET: &str = "unit-test-secret";

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object payload")
    }

    #[test]
    fn round_trip_preserves_the_posted_claims() {
        let claims = Claims::new(
            payload(json!({ "email": "a@x.com", "device": "web" })),
            10,
        );
        let token = encode_claims(&claims, SECRET).expect("encode");
        let decoded = decode_claims(&token, SECRET).expect("decode");

        assert_eq!(decoded.email(), Some("a@x.com"));
        assert_eq!(decoded.extra.get("device"), Some(&json!("web")));
        assert_eq!(decoded.exp, claims.exp);
    }

    #[test]
    fn token_without_email_still_verifies() {
        let claims = Claims::new(payload(json!({ "nickname": "anon" })), 10);
        let token = encode_claims(&claims, SECRET).expect("encode");
        let decoded = decode_claims(&token, SECRET).expect("decode");

        assert_eq!(decoded.email(), None);
        assert_eq!(decoded.extra.get("nickname"), Some(&json!("anon")));
    }

    #[test]
    fn expired_token_fails_verification() {
        // Issued far enough in the past that the default leeway cannot save it
        let mut claims = Claims::new(payload(json!({ "email": "a@x.com" })), 10);
        claims.exp = (Utc::now() - Duration::days(1)).timestamp();

        let token = encode_claims(&claims, SECRET).expect("encode");
        assert!(matches!(
            decode_claims(&token, SECRET),
            Err(TokenError::Verification(_))
        ));
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let claims = Claims::new(payload(json!({ "email": "a@x.com" })), 10);
        let token = encode_claims(&claims, SECRET).expect("encode");

        assert!(matches!(
            decode_claims(&token, "some-other-secret"),
            Err(TokenError::Verification(_))
        ));
    }

    #[test]
    fn empty_secret_is_rejected_up_front() {
        let claims = Claims::new(payload(json!({ "email": "a@x.com" })), 10);
        assert!(matches!(
            encode_claims(&claims, ""),
            Err(TokenError::MissingSecret)
        ));
    }

    #[test]
    fn expiry_lands_ten_days_out() {
        let claims = Claims::new(payload(json!({ "email": "a@x.com" })), 10);
        let window = claims.exp - claims.iat;
        assert_eq!(window, 10 * 24 * 60 * 60);
    }
}
