//! Server-side authorization code exchange.

use std::fmt;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use stockroom_app::{
    oauth::{OAuthError, TokenResponse, user_info_from_id_token},
    session::UserInfo,
};

use crate::extensions::*;

const CODE_PREFIX_LEN: usize = 10;

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct ExchangeRequest {
    /// Authorization code from the sign-in redirect
    pub code: String,
}

/// Profile claims of the identity token.
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileResponse {
    pub email: Option<String>,
    pub username: Option<String>,
    pub sub: Option<String>,
    pub name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
}

impl From<UserInfo> for ProfileResponse {
    fn from(user: UserInfo) -> Self {
        Self {
            email: user.email,
            username: user.username,
            sub: user.sub,
            name: user.name,
            given_name: user.given_name,
            family_name: user.family_name,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct TokenExchangeResponse {
    pub id_token: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
    pub token_type: Option<String>,

    /// Profile read from the identity token
    pub user_info: ProfileResponse,
}

impl From<TokenResponse> for TokenExchangeResponse {
    fn from(tokens: TokenResponse) -> Self {
        let user = tokens
            .id_token
            .as_deref()
            .map(user_info_from_id_token)
            .unwrap_or_default();

        Self {
            user_info: user.into(),
            id_token: tokens.id_token,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_in,
            token_type: tokens.token_type,
        }
    }
}

impl fmt::Debug for TokenExchangeResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenExchangeResponse")
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .field("user_info", &self.user_info)
            .finish_non_exhaustive()
    }
}

fn into_status_error(error: OAuthError) -> StatusError {
    match error {
        OAuthError::TokenRejected { status, body } => {
            warn!(%status, %body, "identity provider rejected the authorization code");

            StatusError::bad_request().brief("Authorization code was rejected")
        }
        other => {
            error!("token exchange failed: {other}");

            StatusError::bad_gateway().brief("Identity provider unavailable")
        }
    }
}

/// Exchange Authorization Code
///
/// Trades the code for tokens without exposing the client secret to the browser.
#[endpoint(tags("auth"), summary = "Exchange an authorization code for tokens")]
pub(crate) async fn handler(
    body: JsonBody<ExchangeRequest>,
    depot: &mut Depot,
) -> Result<Json<TokenExchangeResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let code = body.into_inner().code;
    let code = code.trim();

    if code.is_empty() {
        return Err(StatusError::bad_request().brief("Missing authorization code"));
    }

    let code_prefix: String = code.chars().take(CODE_PREFIX_LEN).collect();
    info!(%code_prefix, "exchanging authorization code");

    let tokens = state
        .identity
        .exchange_code(code)
        .await
        .map_err(into_status_error)?;

    Ok(Json(tokens.into()))
}
