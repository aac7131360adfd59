//! Liveness check.

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HealthResponse {
    /// Always `ok` while the server is accepting requests
    pub status: String,
}

/// Healthcheck handler
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TestAssets, service_with_assets};

    use super::*;

    #[tokio::test]
    async fn reports_ok() -> TestResult {
        let assets = TestAssets::new()?;

        let response: HealthResponse = TestClient::get("http://example.com/healthcheck")
            .send(&service_with_assets(&assets))
            .await
            .take_json()
            .await?;

        assert_eq!(response.status, "ok");

        Ok(())
    }
}
