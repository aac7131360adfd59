//! Compact JWT payload decoding.
//!
//! Tokens are never verified here. The payload is only read for its expiry
//! and profile claims; the API remains the authority on token validity.

use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use jiff::Timestamp;
use serde::Deserialize;
use thiserror::Error;

/// base64url decoder that accepts payloads with or without padding.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Claims read from an identity token payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Claims {
    /// Expiry, in seconds since the Unix epoch.
    pub exp: Option<i64>,

    pub sub: Option<String>,

    pub email: Option<String>,

    #[serde(rename = "cognito:username")]
    pub username: Option<String>,

    pub name: Option<String>,

    pub given_name: Option<String>,

    pub family_name: Option<String>,
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("token is not a compact JWT")]
    InvalidFormat,

    #[error("token payload is not valid base64")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("token payload is not valid JSON")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("token has no expiry claim")]
    MissingExpiry,

    #[error("token expiry claim is out of range")]
    InvalidExpiry(#[source] jiff::Error),
}

/// Decode the claims carried in the middle segment of a compact JWT.
pub fn decode_claims(token: &str) -> Result<Claims, JwtError> {
    let mut segments = token.trim().split('.');

    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(JwtError::InvalidFormat);
    };

    if payload.is_empty() {
        return Err(JwtError::InvalidFormat);
    }

    // Some issuers hand out standard-alphabet payloads.
    let normalized = payload.replace('+', "-").replace('/', "_");
    let bytes = PAYLOAD_ENGINE.decode(normalized)?;

    Ok(serde_json::from_slice(&bytes)?)
}

/// Instant at which the token stops being accepted.
pub fn expires_at(token: &str) -> Result<Timestamp, JwtError> {
    let exp = decode_claims(token)?.exp.ok_or(JwtError::MissingExpiry)?;

    Timestamp::from_second(exp).map_err(JwtError::InvalidExpiry)
}

/// Whether the token is expired at `now`.
///
/// Malformed tokens, and tokens without an expiry, count as expired.
pub fn is_token_expired(token: &str, now: Timestamp) -> bool {
    match expires_at(token) {
        Ok(expiry) => now >= expiry,
        Err(_malformed) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::test::{make_jwt, token_expiring_in};

    use super::*;

    #[test]
    fn past_expiry_is_expired() {
        let token = token_expiring_in(-60);

        assert!(is_token_expired(&token, Timestamp::now()));
    }

    #[test]
    fn future_expiry_is_not_expired() {
        let token = token_expiring_in(3_600);

        assert!(!is_token_expired(&token, Timestamp::now()));
    }

    #[test]
    fn expiry_equal_to_now_is_expired() -> TestResult {
        let now = Timestamp::from_second(1_700_000_000)?;
        let token = make_jwt(&json!({ "exp": 1_700_000_000 }));

        assert!(is_token_expired(&token, now));

        Ok(())
    }

    #[test]
    fn malformed_tokens_are_expired() {
        let now = Timestamp::now();

        assert!(is_token_expired("", now));
        assert!(is_token_expired("not-a-jwt", now));
        assert!(is_token_expired("a.%%%.c", now));
        assert!(is_token_expired("a.bm90IGpzb24.c", now));
        assert!(is_token_expired("a.b.c.d", now));
    }

    #[test]
    fn missing_expiry_is_expired() {
        let token = make_jwt(&json!({ "sub": "user-1" }));

        assert!(matches!(expires_at(&token), Err(JwtError::MissingExpiry)));
        assert!(is_token_expired(&token, Timestamp::now()));
    }

    #[test]
    fn decodes_profile_claims() -> TestResult {
        let token = make_jwt(&json!({
            "exp": 1_700_000_000,
            "sub": "abc-123",
            "email": "ana@example.com",
            "cognito:username": "ana",
            "given_name": "Ana",
        }));

        let claims = decode_claims(&token)?;

        assert_eq!(claims.exp, Some(1_700_000_000));
        assert_eq!(claims.sub.as_deref(), Some("abc-123"));
        assert_eq!(claims.email.as_deref(), Some("ana@example.com"));
        assert_eq!(claims.username.as_deref(), Some("ana"));
        assert_eq!(claims.given_name.as_deref(), Some("Ana"));
        assert!(claims.name.is_none());

        Ok(())
    }

    #[test]
    fn accepts_padded_payloads() -> TestResult {
        // {"exp":10} base64url-encoded with padding
        let claims = decode_claims("e30.eyJleHAiOjEwfQ==.sig")?;

        assert_eq!(claims.exp, Some(10));

        Ok(())
    }
}
