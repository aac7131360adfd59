//! Session data models.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::session::jwt::Claims;

/// Keys under which credentials are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    IdToken,
    AccessToken,
    RefreshToken,
    UserInfo,
}

impl StorageKey {
    /// Every credential key, in the order they are written.
    pub const ALL: [Self; 4] = [
        Self::IdToken,
        Self::AccessToken,
        Self::RefreshToken,
        Self::UserInfo,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IdToken => "idToken",
            Self::AccessToken => "accessToken",
            Self::RefreshToken => "refreshToken",
            Self::UserInfo => "userInfo",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile of the signed-in user, derived from the identity token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
}

impl UserInfo {
    /// Build the profile from decoded claims; `name` falls back to the email.
    #[must_use]
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            email: claims.email.clone(),
            username: claims.username.clone(),
            sub: claims.sub.clone(),
            name: claims.name.clone().or_else(|| claims.email.clone()),
            given_name: claims.given_name.clone(),
            family_name: claims.family_name.clone(),
        }
    }

    /// Label used when attributing actions to the user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.email
            .as_deref()
            .or(self.username.as_deref())
            .filter(|value| !value.is_empty())
            .unwrap_or("Unknown user")
    }
}

/// Tokens returned by the identity provider.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    pub id_token: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSet(**redacted**)")
    }
}

impl Drop for TokenSet {
    fn drop(&mut self) {
        self.id_token.zeroize();
        self.access_token.zeroize();
        self.refresh_token.zeroize();
    }
}

/// Everything currently persisted for the session.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub id_token: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

impl SessionSnapshot {
    /// Whether both the identity and access tokens are present.
    #[must_use]
    pub fn has_tokens(&self) -> bool {
        self.id_token.is_some() && self.access_token.is_some()
    }
}

impl fmt::Debug for SessionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSnapshot")
            .field("id_token", &self.id_token.as_ref().map(|_| "**redacted**"))
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "**redacted**"),
            )
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "**redacted**"),
            )
            .field("user_info", &self.user_info)
            .finish()
    }
}

/// First `len` characters of a token, marked when cut short.
#[must_use]
pub fn token_preview(token: &str, len: usize) -> String {
    let mut chars = token.chars();
    let preview: String = chars.by_ref().take(len).collect();

    if chars.next().is_some() {
        format!("{preview}...")
    } else {
        preview
    }
}

/// Observable state of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    SignedOut,
    SignedIn(UserInfo),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_keys_match_persisted_names() {
        let names: Vec<_> = StorageKey::ALL.iter().map(|key| key.as_str()).collect();

        assert_eq!(
            names,
            ["idToken", "accessToken", "refreshToken", "userInfo"]
        );
    }

    #[test]
    fn user_info_name_falls_back_to_email() {
        let claims = Claims {
            email: Some("ana@example.com".to_string()),
            ..Claims::default()
        };

        let info = UserInfo::from_claims(&claims);

        assert_eq!(info.name.as_deref(), Some("ana@example.com"));
        assert_eq!(info.display_name(), "ana@example.com");
    }

    #[test]
    fn display_name_defaults_when_profile_is_empty() {
        assert_eq!(UserInfo::default().display_name(), "Unknown user");
    }

    #[test]
    fn token_preview_marks_truncation() {
        assert_eq!(token_preview("abcdef", 3), "abc...");
        assert_eq!(token_preview("abc", 3), "abc");
        assert_eq!(token_preview("", 50), "");
    }

    #[test]
    fn token_set_debug_is_redacted() {
        let tokens = TokenSet {
            id_token: "secret-id".to_string(),
            access_token: "secret-access".to_string(),
            refresh_token: String::new(),
        };

        assert!(!format!("{tokens:?}").contains("secret"));
    }
}
