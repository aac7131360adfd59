//! Identity provider client.

use std::fmt;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, header::CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::{
    oauth::{config::OAuthConfig, errors::OAuthError},
    session::TokenSet,
};

/// Token endpoint response.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub id_token: Option<String>,

    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default)]
    pub refresh_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

impl TokenResponse {
    /// Tokens to persist; absent ones become empty strings.
    #[must_use]
    pub fn token_set(&self) -> TokenSet {
        TokenSet {
            id_token: self.id_token.clone().unwrap_or_default(),
            access_token: self.access_token.clone().unwrap_or_default(),
            refresh_token: self.refresh_token.clone().unwrap_or_default(),
        }
    }
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("id_token", &self.id_token.as_ref().map(|_| "**redacted**"))
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "**redacted**"),
            )
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "**redacted**"),
            )
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .finish()
    }
}

#[automock]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange an authorization code for tokens.
    async fn exchange_code(&self, code: &str) -> Result<TokenResponse, OAuthError>;

    /// Fetch the OpenID Connect discovery document.
    async fn fetch_metadata(&self) -> Result<Value, OAuthError>;
}

/// Cognito-style hosted identity provider.
#[derive(Debug, Clone)]
pub struct CognitoProvider {
    config: OAuthConfig,
    http: Client,
}

impl CognitoProvider {
    #[must_use]
    pub fn new(config: OAuthConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    fn token_request_body(&self, code: &str) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "authorization_code")
            .append_pair("client_id", &self.config.client_id)
            .append_pair("code", code)
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .finish()
    }
}

#[async_trait]
impl IdentityProvider for CognitoProvider {
    async fn exchange_code(&self, code: &str) -> Result<TokenResponse, OAuthError> {
        let mut request = self
            .http
            .post(self.config.token_url()?)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(self.token_request_body(code));

        if let Some(secret) = &self.config.client_secret {
            request = request.basic_auth(&self.config.client_id, Some(secret));
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            warn!(%status, "token exchange rejected");

            return Err(OAuthError::TokenRejected { status, body });
        }

        debug!("authorization code exchanged");

        Ok(response.json().await?)
    }

    async fn fetch_metadata(&self) -> Result<Value, OAuthError> {
        let response = self.http.get(self.config.metadata_url()?).send().await?;

        if !response.status().is_success() {
            return Err(OAuthError::Metadata {
                status: response.status(),
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::oauth_config;

    use super::*;

    #[test]
    fn token_request_is_form_encoded() -> TestResult {
        let provider = CognitoProvider::new(oauth_config()?);

        assert_eq!(
            provider.token_request_body("abc/123"),
            "grant_type=authorization_code&client_id=client-123&code=abc%2F123\
             &redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fcallback"
        );

        Ok(())
    }

    #[test]
    fn secret_is_never_in_the_form_body() -> TestResult {
        let provider = CognitoProvider::new(oauth_config()?);

        assert!(!provider.token_request_body("code").contains("shh"));

        Ok(())
    }

    #[test]
    fn missing_tokens_become_empty_strings() -> TestResult {
        let response: TokenResponse =
            serde_json::from_str(r#"{"id_token":"id","token_type":"Bearer"}"#)?;

        let tokens = response.token_set();

        assert_eq!(tokens.id_token, "id");
        assert_eq!(tokens.access_token, "");
        assert_eq!(tokens.refresh_token, "");

        Ok(())
    }

    #[test]
    fn debug_is_redacted() {
        let response = TokenResponse {
            access_token: Some("secret-access".to_string()),
            ..TokenResponse::default()
        };

        assert!(!format!("{response:?}").contains("secret-access"));
    }
}
