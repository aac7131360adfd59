//! Authenticated request wrapper.

use std::{fmt, sync::Arc};

use clap::ValueEnum;
use jiff::Timestamp;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::{
    api::{
        errors::ApiError,
        transport::{ApiRequest, ApiResponse, HttpTransport},
    },
    session::{Session, SessionError},
};

/// How the identity token is presented in the `Authorization` header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum AuthScheme {
    /// `Bearer <token>`
    #[default]
    Bearer,

    /// The token verbatim, for gateways that reject the prefix.
    Raw,
}

impl AuthScheme {
    #[must_use]
    pub fn header_value(self, token: &str) -> String {
        match self {
            Self::Bearer => format!("Bearer {token}"),
            Self::Raw => token.to_string(),
        }
    }
}

/// Client that attaches the session's identity token to every request.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    scheme: AuthScheme,
    session: Arc<Session>,
    transport: Arc<dyn HttpTransport>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        scheme: AuthScheme,
        session: Arc<Session>,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)?;

        if base_url.cannot_be_a_base() {
            return Err(ApiError::BaseUrl(base_url.to_string()));
        }

        Ok(Self {
            base_url,
            scheme,
            session,
            transport,
        })
    }

    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Base URL extended with `segments`, each percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|()| ApiError::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Issue one authenticated request.
    ///
    /// Fails without touching the network when no valid identity token is
    /// stored. A 401 that reports an expired or unauthorized token signs the
    /// session out.
    pub async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<ApiResponse, ApiError> {
        let token = self.session.validate(Timestamp::now())?;

        let request = ApiRequest {
            method,
            url,
            headers: vec![
                ("Authorization".to_string(), self.scheme.header_value(&token)),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            body,
        };

        debug!(method = %request.method, url = %request.url, "api request");

        let response = self.transport.execute(request).await?;

        if response.status == StatusCode::UNAUTHORIZED && reports_expired_token(&response.text())
        {
            warn!("api rejected the session token, signing out");

            self.session.sign_out().map_err(SessionError::from)?;

            return Err(ApiError::SessionExpired);
        }

        Ok(response)
    }

    /// Send a request and decode a successful JSON response.
    pub async fn send_json(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let response = self.send(method, url, body).await?;

        Ok(ensure_success(response)?.json()?)
    }

    pub async fn get_json(&self, url: Url) -> Result<Value, ApiError> {
        self.send_json(Method::GET, url, None).await
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("scheme", &self.scheme)
            .finish_non_exhaustive()
    }
}

/// Turn a non-2xx response into [`ApiError::Status`].
pub fn ensure_success(response: ApiResponse) -> Result<ApiResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }

    Err(ApiError::Status {
        status: response.status,
        body: response.text(),
    })
}

fn reports_expired_token(body: &str) -> bool {
    body.contains("expired") || body.contains("Unauthorized")
}
