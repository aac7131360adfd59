//! State

use std::{fmt, sync::Arc};

use stockroom_app::oauth::{CognitoProvider, IdentityProvider};

use crate::{assets::Assets, config::ServerConfig};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) identity: Arc<dyn IdentityProvider>,
    pub(crate) assets: Assets,
    pub(crate) token_log_enabled: bool,
}

impl State {
    #[must_use]
    pub(crate) fn new(
        identity: Arc<dyn IdentityProvider>,
        assets: Assets,
        token_log_enabled: bool,
    ) -> Self {
        Self {
            identity,
            assets,
            token_log_enabled,
        }
    }

    #[must_use]
    pub(crate) fn from_config(config: &ServerConfig) -> Arc<Self> {
        Arc::new(Self::new(
            Arc::new(CognitoProvider::new(config.oauth.clone())),
            Assets::new(config.assets.assets_dir.clone()),
            config.assets.debug_token_log,
        ))
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("assets", &self.assets)
            .field("token_log_enabled", &self.token_log_enabled)
            .finish_non_exhaustive()
    }
}
