//! Debug sink that logs token previews.

use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use stockroom_app::session::token_preview;

use crate::extensions::*;

const PREVIEW_LEN: usize = 50;

#[derive(Deserialize)]
struct LogTokensRequest {
    #[serde(default)]
    access_token: Option<String>,

    #[serde(default)]
    id_token: Option<String>,

    #[serde(default)]
    refresh_token: Option<String>,

    #[serde(default, alias = "userInfo")]
    user_info: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct LogTokensResponse {
    pub success: bool,
    pub message: String,
}

fn preview(token: Option<&str>) -> String {
    token.map_or_else(|| "N/A".to_owned(), |token| token_preview(token, PREVIEW_LEN))
}

/// Logs previews of the posted tokens; 404 unless token logging is enabled.
#[handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let state = match depot.state_or_500() {
        Ok(state) => state,
        Err(status) => {
            res.render(status);
            return;
        }
    };

    if !state.token_log_enabled {
        res.render(StatusError::not_found());
        return;
    }

    let tokens = match req.parse_json::<LogTokensRequest>().await {
        Ok(tokens) => tokens,
        Err(source) => {
            warn!("invalid token log payload: {source}");

            res.render(StatusError::bad_request().brief("Invalid token payload"));
            return;
        }
    };

    let user_info = tokens.user_info.unwrap_or_default();

    info!(
        access_token = %preview(tokens.access_token.as_deref()),
        id_token = %preview(tokens.id_token.as_deref()),
        refresh_token = %preview(tokens.refresh_token.as_deref()),
        %user_info,
        "tokens received"
    );

    res.render(Json(LogTokensResponse {
        success: true,
        message: "Tokens logged successfully".to_owned(),
    }));
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use stockroom_app::oauth::MockIdentityProvider;
    use testresult::TestResult;

    use crate::test_helpers::{TestAssets, service_with_identity};

    use super::*;

    fn payload() -> Value {
        json!({
            "access_token": "a".repeat(80),
            "id_token": "i".repeat(80),
            "user_info": { "email": "ana@example.com" },
        })
    }

    #[tokio::test]
    async fn disabled_sink_is_not_found() -> TestResult {
        let assets = TestAssets::new()?;

        let res = TestClient::post("http://example.com/log-tokens")
            .json(&payload())
            .send(&service_with_identity(MockIdentityProvider::new(), &assets, false))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn enabled_sink_acknowledges() -> TestResult {
        let assets = TestAssets::new()?;

        let response: LogTokensResponse = TestClient::post("http://example.com/log-tokens")
            .json(&payload())
            .send(&service_with_identity(MockIdentityProvider::new(), &assets, true))
            .await
            .take_json()
            .await?;

        assert!(response.success);
        assert_eq!(response.message, "Tokens logged successfully");

        Ok(())
    }

    #[tokio::test]
    async fn malformed_payload_is_a_bad_request() -> TestResult {
        let assets = TestAssets::new()?;

        let res = TestClient::post("http://example.com/log-tokens")
            .raw_json("{not json")
            .send(&service_with_identity(MockIdentityProvider::new(), &assets, true))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[test]
    fn camel_case_user_info_is_kept() -> TestResult {
        let tokens: LogTokensRequest = serde_json::from_value(json!({
            "access_token": "a",
            "id_token": "i",
            "refresh_token": "r",
            "userInfo": { "email": "ana@example.com" },
        }))?;

        assert_eq!(
            tokens.user_info,
            Some(json!({ "email": "ana@example.com" }))
        );

        Ok(())
    }

    #[test]
    fn previews_are_truncated() {
        assert_eq!(preview(Some(&"x".repeat(60))), format!("{}...", "x".repeat(50)));
        assert_eq!(preview(None), "N/A");
    }
}
