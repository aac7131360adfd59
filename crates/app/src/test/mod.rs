//! Test Helpers

use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use jiff::{SignedDuration, Timestamp};
use serde_json::{Value, json};
use url::Url;

use crate::{
    api::{ApiResponse, MockHttpTransport},
    oauth::OAuthConfig,
    session::{MemorySessionStore, Session, StoreError, TokenSet, UserInfo},
};

/// Unsigned compact JWT carrying `claims` as its payload.
pub(crate) fn make_jwt(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());

    format!("{header}.{payload}.sig")
}

/// JWT whose `exp` lies `seconds` from now (negative for the past).
pub(crate) fn token_expiring_in(seconds: i64) -> String {
    let exp = Timestamp::now() + SignedDuration::from_secs(seconds);

    make_jwt(&json!({
        "exp": exp.as_second(),
        "email": "ana@example.com",
        "cognito:username": "ana",
    }))
}

pub(crate) fn memory_session() -> Result<Arc<Session>, StoreError> {
    Ok(Arc::new(Session::new(Arc::new(MemorySessionStore::new()))?))
}

/// Memory-backed session signed in with `id_token`.
pub(crate) fn signed_in_session(id_token: &str) -> Result<Arc<Session>, StoreError> {
    let session = memory_session()?;

    session.sign_in(
        &TokenSet {
            id_token: id_token.to_string(),
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
        },
        &UserInfo {
            email: Some("ana@example.com".to_string()),
            username: Some("ana".to_string()),
            ..UserInfo::default()
        },
    )?;

    Ok(session)
}

/// Transport answering every request with `status` and a JSON `body`.
pub(crate) fn transport_returning(status: u16, body: &Value) -> MockHttpTransport {
    let body = body.to_string().into_bytes();

    let mut transport = MockHttpTransport::new();

    transport.expect_execute().returning(move |_request| {
        Ok(ApiResponse::new(
            reqwest::StatusCode::from_u16(status).unwrap_or(reqwest::StatusCode::OK),
            body.clone(),
        ))
    });

    transport
}

pub(crate) fn oauth_config() -> Result<OAuthConfig, url::ParseError> {
    Ok(OAuthConfig {
        domain: Url::parse("https://inventory.auth.us-east-1.amazoncognito.com")?,
        client_id: "client-123".to_string(),
        client_secret: Some("shh".to_string()),
        redirect_uri: "http://localhost:3000/callback".to_string(),
        scopes: "openid email".to_string(),
        logout_uri: "http://localhost:3000/".to_string(),
    })
}
