//! Session Service

use std::{fmt, sync::Arc};

use jiff::Timestamp;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::session::{
    errors::{SessionError, StoreError},
    jwt,
    models::{SessionSnapshot, SessionStatus, StorageKey, TokenSet, UserInfo},
    store::{SessionStore, clear_credentials},
};

/// Explicit session state shared by every authenticated component.
///
/// Sign-in and sign-out are published on a watch channel so that views can
/// react to transitions instead of polling the store.
pub struct Session {
    store: Arc<dyn SessionStore>,
    status: watch::Sender<SessionStatus>,
}

impl Session {
    /// Open a session over `store`, publishing the status found there.
    ///
    /// Unreadable stored state is cleared and the session starts signed out.
    pub fn new(store: Arc<dyn SessionStore>) -> Result<Self, StoreError> {
        let initial = match initial_status(store.as_ref()) {
            Err(StoreError::Serde(error)) => {
                warn!(%error, "stored session is unreadable, clearing it");

                clear_credentials(store.as_ref())?;

                SessionStatus::SignedOut
            }
            other => other?,
        };

        Ok(Self {
            store,
            status: watch::Sender::new(initial),
        })
    }

    /// Receive status transitions.
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    pub fn status(&self) -> SessionStatus {
        self.status.borrow().clone()
    }

    /// The stored identity token; an empty value reads as absent.
    pub fn id_token(&self) -> Result<Option<String>, StoreError> {
        self.read_token(StorageKey::IdToken)
    }

    pub fn user_info(&self) -> Result<Option<UserInfo>, StoreError> {
        let Some(raw) = self.store.get(StorageKey::UserInfo)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(info) => Ok(Some(info)),
            Err(error) => {
                warn!(%error, "stored user info is unreadable");
                Ok(None)
            }
        }
    }

    pub fn snapshot(&self) -> Result<SessionSnapshot, StoreError> {
        Ok(SessionSnapshot {
            id_token: self.read_token(StorageKey::IdToken)?,
            access_token: self.read_token(StorageKey::AccessToken)?,
            refresh_token: self.read_token(StorageKey::RefreshToken)?,
            user_info: self.user_info()?,
        })
    }

    /// Return the identity token if it is still valid at `now`.
    ///
    /// An expired token clears every credential and publishes
    /// [`SessionStatus::SignedOut`].
    pub fn validate(&self, now: Timestamp) -> Result<String, SessionError> {
        let token = self.id_token()?.ok_or(SessionError::NoToken)?;

        if jwt::is_token_expired(&token, now) {
            warn!("identity token expired, clearing session");

            self.sign_out()?;

            return Err(SessionError::Expired);
        }

        Ok(token)
    }

    /// Persist freshly issued tokens and the derived user profile.
    ///
    /// Missing tokens are stored as empty strings.
    pub fn sign_in(&self, tokens: &TokenSet, user: &UserInfo) -> Result<(), StoreError> {
        self.store.set(StorageKey::IdToken, &tokens.id_token)?;
        self.store.set(StorageKey::AccessToken, &tokens.access_token)?;
        self.store
            .set(StorageKey::RefreshToken, &tokens.refresh_token)?;
        self.store
            .set(StorageKey::UserInfo, &serde_json::to_string(user)?)?;

        info!(user = user.display_name(), "signed in");

        self.status.send_replace(SessionStatus::SignedIn(user.clone()));

        Ok(())
    }

    /// Clear every credential and publish [`SessionStatus::SignedOut`].
    pub fn sign_out(&self) -> Result<(), StoreError> {
        clear_credentials(self.store.as_ref())?;

        self.status.send_replace(SessionStatus::SignedOut);

        Ok(())
    }

    fn read_token(&self, key: StorageKey) -> Result<Option<String>, StoreError> {
        Ok(self.store.get(key)?.filter(|token| !token.is_empty()))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("status", &*self.status.borrow())
            .finish_non_exhaustive()
    }
}

fn initial_status(store: &dyn SessionStore) -> Result<SessionStatus, StoreError> {
    let has_token = store
        .get(StorageKey::IdToken)?
        .is_some_and(|token| !token.is_empty());

    if !has_token {
        return Ok(SessionStatus::SignedOut);
    }

    let user = store
        .get(StorageKey::UserInfo)?
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default();

    Ok(SessionStatus::SignedIn(user))
}
