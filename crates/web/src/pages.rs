//! HTML pages.

use salvo::prelude::*;
use tracing::{error, info, warn};

use crate::{
    assets::{CALLBACK_VIEW, INDEX_VIEW},
    extensions::*,
};

const CODE_PREFIX_LEN: usize = 10;

async fn render_view(depot: &Depot, res: &mut Response, name: &str) {
    let state = match depot.state_or_500() {
        Ok(state) => state,
        Err(status) => {
            res.render(status);
            return;
        }
    };

    match state.assets.view(name).await {
        Ok(page) => res.render(Text::Html(page)),
        Err(source) => {
            error!(view = name, "failed to read view: {source}");

            res.render(StatusError::internal_server_error());
        }
    }
}

/// Application shell.
#[handler]
pub(crate) async fn index(depot: &mut Depot, res: &mut Response) {
    render_view(depot, res, INDEX_VIEW).await;
}

/// Landing page of the sign-in redirect; the page itself completes the exchange.
#[handler]
pub(crate) async fn callback(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    if let Some(code) = req.query::<String>("code") {
        let code_prefix: String = code.chars().take(CODE_PREFIX_LEN).collect();

        info!(%code_prefix, "authorization callback received");
    } else if let Some(error) = req.query::<String>("error") {
        warn!(%error, "authorization callback reported an error");
    } else {
        warn!("authorization callback without a code");
    }

    render_view(depot, res, CALLBACK_VIEW).await;
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TestAssets, service_with_assets};

    #[tokio::test]
    async fn root_serves_the_index_view() -> TestResult {
        let assets = TestAssets::new()?;

        let mut res = TestClient::get("http://example.com/")
            .send(&service_with_assets(&assets))
            .await;

        assert_eq!(res.status_code, Some(salvo::http::StatusCode::OK));
        assert!(res.take_string().await?.contains("<title>Stockroom</title>"));

        Ok(())
    }

    #[tokio::test]
    async fn callback_serves_the_callback_view() -> TestResult {
        let assets = TestAssets::new()?;

        let mut res = TestClient::get("http://example.com/callback?code=abcdefghijklmnop")
            .send(&service_with_assets(&assets))
            .await;

        assert_eq!(res.status_code, Some(salvo::http::StatusCode::OK));
        assert!(res.take_string().await?.contains("Signing you in"));

        Ok(())
    }

    #[tokio::test]
    async fn missing_view_is_a_server_error() -> TestResult {
        let assets = TestAssets::new()?;
        assets.remove_view("callback.html")?;

        let res = TestClient::get("http://example.com/callback")
            .send(&service_with_assets(&assets))
            .await;

        assert_eq!(
            res.status_code,
            Some(salvo::http::StatusCode::INTERNAL_SERVER_ERROR)
        );

        Ok(())
    }
}
