//! Identity provider discovery document proxy.

use salvo::prelude::*;
use serde_json::json;
use tracing::error;

use crate::extensions::*;

#[handler]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) {
    let state = match depot.state_or_500() {
        Ok(state) => state,
        Err(status) => {
            res.render(status);
            return;
        }
    };

    match state.identity.fetch_metadata().await {
        Ok(document) => res.render(Json(document)),
        Err(source) => {
            error!("failed to fetch identity provider metadata: {source}");

            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(json!({ "error": "Failed to fetch Cognito metadata" })));
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::Value;
    use stockroom_app::oauth::{MockIdentityProvider, OAuthError};
    use testresult::TestResult;

    use crate::test_helpers::{TestAssets, service_with_identity};

    use super::*;

    #[tokio::test]
    async fn proxies_the_discovery_document() -> TestResult {
        let assets = TestAssets::new()?;

        let mut identity = MockIdentityProvider::new();
        identity
            .expect_fetch_metadata()
            .once()
            .returning(|| Ok(json!({ "issuer": "https://issuer.example.com" })));

        let mut res = TestClient::get("http://example.com/cognito-metadata")
            .send(&service_with_identity(identity, &assets, false))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Value = res.take_json().await?;
        assert_eq!(body["issuer"], "https://issuer.example.com");

        Ok(())
    }

    #[tokio::test]
    async fn provider_failure_is_reported_as_json() -> TestResult {
        let assets = TestAssets::new()?;

        let mut identity = MockIdentityProvider::new();
        identity.expect_fetch_metadata().once().returning(|| {
            Err(OAuthError::Metadata {
                status: StatusCode::SERVICE_UNAVAILABLE,
            })
        });

        let mut res = TestClient::get("http://example.com/cognito-metadata")
            .send(&service_with_identity(identity, &assets, false))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        let body: Value = res.take_json().await?;
        assert_eq!(body, json!({ "error": "Failed to fetch Cognito metadata" }));

        Ok(())
    }
}
