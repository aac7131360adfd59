//! Test helpers.

use std::{fs, io, sync::Arc};

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use salvo::{affix_state::inject, prelude::*};
use serde_json::Value;
use stockroom_app::oauth::MockIdentityProvider;
use tempfile::TempDir;

use crate::{assets::Assets, router::app_router, state::State};

const INDEX_PAGE: &str =
    "<!doctype html><html><head><title>Stockroom</title></head><body></body></html>";

const CALLBACK_PAGE: &str = "<!doctype html><p>Signing you in...</p>";

/// Temporary assets root with both views and one stylesheet.
pub(crate) struct TestAssets {
    dir: TempDir,
}

impl TestAssets {
    pub(crate) fn new() -> io::Result<Self> {
        let dir = tempfile::tempdir()?;

        fs::create_dir_all(dir.path().join("Views"))?;
        fs::create_dir_all(dir.path().join("css"))?;

        fs::write(dir.path().join("Views/index.html"), INDEX_PAGE)?;
        fs::write(dir.path().join("Views/callback.html"), CALLBACK_PAGE)?;
        fs::write(dir.path().join("css/site.css"), "body { margin: 0; }")?;

        Ok(Self { dir })
    }

    pub(crate) fn assets(&self) -> Assets {
        Assets::new(self.dir.path())
    }

    pub(crate) fn remove_view(&self, name: &str) -> io::Result<()> {
        fs::remove_file(self.dir.path().join("Views").join(name))
    }
}

/// Unsigned compact JWT carrying `claims` as its payload.
pub(crate) fn make_jwt(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());

    format!("{header}.{payload}.sig")
}

fn strict_identity_mock() -> MockIdentityProvider {
    let mut identity = MockIdentityProvider::new();

    identity.expect_exchange_code().never();
    identity.expect_fetch_metadata().never();

    identity
}

pub(crate) fn service(state: State) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(Arc::new(state)))
            .push(app_router()),
    )
}

pub(crate) fn service_with_identity(
    identity: MockIdentityProvider,
    assets: &TestAssets,
    token_log_enabled: bool,
) -> Service {
    service(State::new(
        Arc::new(identity),
        assets.assets(),
        token_log_enabled,
    ))
}

pub(crate) fn service_with_assets(assets: &TestAssets) -> Service {
    service_with_identity(strict_identity_mock(), assets, false)
}
