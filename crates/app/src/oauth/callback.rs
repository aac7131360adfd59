//! Completion of the authorization-code redirect.

use serde::Deserialize;
use tracing::{info, warn};
use url::Url;

use crate::{
    oauth::{errors::CallbackError, provider::IdentityProvider},
    session::{Session, UserInfo, jwt},
};

/// Query parameters the provider appends to the redirect URI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl CallbackParams {
    #[must_use]
    pub fn from_url(url: &Url) -> Self {
        let mut params = Self::default();

        for (key, value) in url.query_pairs() {
            let slot = match key.as_ref() {
                "code" => &mut params.code,
                "error" => &mut params.error,
                "error_description" => &mut params.error_description,
                _ => continue,
            };

            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        params
    }

    /// Parse a pasted redirect URL.
    pub fn parse(callback_url: &str) -> Result<Self, CallbackError> {
        Ok(Self::from_url(&Url::parse(callback_url.trim())?))
    }

    #[must_use]
    pub fn from_code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::default()
        }
    }

    /// The authorization code, unless the provider reported an error.
    pub fn authorization_code(&self) -> Result<&str, CallbackError> {
        if let Some(error) = &self.error {
            return Err(CallbackError::Provider {
                error: error.clone(),
                description: self
                    .error_description
                    .clone()
                    .unwrap_or_else(|| "no description".to_string()),
            });
        }

        self.code
            .as_deref()
            .filter(|code| !code.is_empty())
            .ok_or(CallbackError::MissingCode)
    }
}

/// Profile claims of an identity token.
///
/// An undecodable token yields an empty profile; sign-in still succeeds.
#[must_use]
pub fn user_info_from_id_token(id_token: &str) -> UserInfo {
    match jwt::decode_claims(id_token) {
        Ok(claims) => UserInfo::from_claims(&claims),
        Err(error) => {
            warn!(%error, "could not decode identity token, continuing without profile");
            UserInfo::default()
        }
    }
}

/// Exchange the callback's code, then persist tokens and profile.
pub async fn complete_sign_in(
    provider: &dyn IdentityProvider,
    session: &Session,
    params: &CallbackParams,
) -> Result<UserInfo, CallbackError> {
    let code = params.authorization_code()?;

    let code_prefix: String = code.chars().take(10).collect();
    info!(%code_prefix, "exchanging authorization code");

    let response = provider
        .exchange_code(code)
        .await
        .map_err(CallbackError::Exchange)?;

    let tokens = response.token_set();
    let user = user_info_from_id_token(&tokens.id_token);

    session.sign_in(&tokens, &user)?;

    Ok(user)
}
