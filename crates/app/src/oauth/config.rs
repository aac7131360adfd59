//! Identity provider configuration.

use std::fmt;

use clap::Args;
use url::Url;

use crate::oauth::errors::OAuthError;

#[derive(Clone, Args)]
pub struct OAuthConfig {
    /// Hosted identity provider domain, e.g. `https://example.auth.us-east-1.amazoncognito.com`
    #[arg(long = "cognito-domain", env = "COGNITO_DOMAIN")]
    pub domain: Url,

    /// OAuth client id
    #[arg(long = "oauth-client-id", env = "OAUTH_CLIENT_ID")]
    pub client_id: String,

    /// OAuth client secret, sent with HTTP Basic authentication when set
    #[arg(
        long = "oauth-client-secret",
        env = "OAUTH_CLIENT_SECRET",
        hide_env_values = true
    )]
    pub client_secret: Option<String>,

    /// Where the provider redirects after sign-in
    #[arg(
        long = "oauth-redirect-uri",
        env = "OAUTH_REDIRECT_URI",
        default_value = "http://localhost:3000/callback"
    )]
    pub redirect_uri: String,

    /// Space separated scopes to request
    #[arg(long = "oauth-scopes", env = "OAUTH_SCOPES", default_value = "openid email")]
    pub scopes: String,

    /// Where the provider redirects after a hosted logout
    #[arg(
        long = "oauth-logout-uri",
        env = "OAUTH_LOGOUT_URI",
        default_value = "http://localhost:3000/"
    )]
    pub logout_uri: String,
}

impl OAuthConfig {
    fn endpoint(&self, segments: &[&str]) -> Result<Url, OAuthError> {
        let mut url = self.domain.clone();

        url.path_segments_mut()
            .map_err(|()| OAuthError::BaseUrl(self.domain.to_string()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Hosted sign-in page for the authorization-code flow.
    pub fn authorize_url(&self) -> Result<Url, OAuthError> {
        let mut url = self.endpoint(&["oauth2", "authorize"])?;

        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("response_type", "code")
            .append_pair("scope", &self.scopes)
            .append_pair("redirect_uri", &self.redirect_uri);

        Ok(url)
    }

    pub fn token_url(&self) -> Result<Url, OAuthError> {
        self.endpoint(&["oauth2", "token"])
    }

    /// OpenID Connect discovery document.
    pub fn metadata_url(&self) -> Result<Url, OAuthError> {
        self.endpoint(&[".well-known", "openid-configuration"])
    }

    /// Hosted logout, ending the provider's own session.
    pub fn logout_url(&self) -> Result<Url, OAuthError> {
        let mut url = self.endpoint(&["logout"])?;

        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("logout_uri", &self.logout_uri);

        Ok(url)
    }
}

impl fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("domain", &self.domain.as_str())
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "**redacted**"),
            )
            .field("redirect_uri", &self.redirect_uri)
            .field("scopes", &self.scopes)
            .field("logout_uri", &self.logout_uri)
            .finish()
    }
}
