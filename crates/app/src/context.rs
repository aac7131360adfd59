//! App Context

use std::{path::PathBuf, sync::Arc};

use clap::Args;
use thiserror::Error;

use crate::{
    api::{ApiClient, ApiError, AuthScheme, HttpTransport, ReqwestTransport},
    domain::{
        movements::service::{HttpMovementsService, MovementsService},
        products::service::{HttpProductsService, ProductsService},
        reports::service::{HttpReportsService, ReportsService},
    },
    session::{FileSessionStore, Session, StoreError},
};

/// Where the session tokens are kept.
#[derive(Debug, Clone, Args)]
pub struct SessionConfig {
    /// File the session tokens are persisted to
    #[arg(long, env = "SESSION_FILE", default_value = ".stockroom-session.json")]
    pub session_file: PathBuf,
}

impl SessionConfig {
    /// Session persisted at the configured path.
    pub fn open(&self) -> Result<Arc<Session>, StoreError> {
        let store = FileSessionStore::new(self.session_file.clone());

        Ok(Arc::new(Session::new(Arc::new(store))?))
    }
}

/// Where the backend lives and how the session is kept.
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Base URL of the inventory API
    #[arg(long, env = "INVENTORY_API_URL")]
    pub api_url: String,

    /// Base URL of the reports API; defaults to the inventory API
    #[arg(long, env = "REPORTS_API_URL")]
    pub reports_api_url: Option<String>,

    /// How the identity token is presented to the API
    #[arg(long, env = "API_AUTH_SCHEME", value_enum, default_value_t)]
    pub auth_scheme: AuthScheme,

    #[command(flatten)]
    pub session: SessionConfig,
}

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to open session store")]
    Session(#[from] StoreError),

    #[error("invalid API configuration")]
    Api(#[from] ApiError),
}

#[derive(Clone)]
pub struct AppContext {
    pub session: Arc<Session>,
    pub products: Arc<dyn ProductsService>,
    pub movements: Arc<dyn MovementsService>,
    pub reports: Arc<dyn ReportsService>,
}

impl AppContext {
    /// Build application context over the real HTTP transport.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let session = config.session.open()?;

        Self::with_transport(config, session, Arc::new(ReqwestTransport::default()))
    }

    /// Build application context over any transport.
    pub fn with_transport(
        config: &AppConfig,
        session: Arc<Session>,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, AppInitError> {
        let inventory = ApiClient::new(
            &config.api_url,
            config.auth_scheme,
            Arc::clone(&session),
            Arc::clone(&transport),
        )?;

        let reports = ApiClient::new(
            config.reports_api_url.as_deref().unwrap_or(&config.api_url),
            config.auth_scheme,
            Arc::clone(&session),
            transport,
        )?;

        Ok(Self {
            session,
            products: Arc::new(HttpProductsService::new(inventory.clone())),
            movements: Arc::new(HttpMovementsService::new(inventory)),
            reports: Arc::new(HttpReportsService::new(reports)),
        })
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use reqwest::StatusCode;
    use testresult::TestResult;

    use crate::{
        api::{ApiResponse, MockHttpTransport},
        domain::reports::models::{ReportFormat, ReportQuery},
        test::{signed_in_session, token_expiring_in},
    };

    use super::*;

    fn config(reports_api_url: Option<&str>) -> AppConfig {
        AppConfig {
            api_url: "https://inventory.example.com/prod".to_string(),
            reports_api_url: reports_api_url.map(str::to_string),
            auth_scheme: AuthScheme::Bearer,
            session: SessionConfig {
                session_file: PathBuf::from("unused.json"),
            },
        }
    }

    async fn report_host(config: &AppConfig) -> TestResult<Option<String>> {
        let mut transport = MockHttpTransport::new();
        transport.expect_execute().times(1).returning(|request| {
            Ok(ApiResponse::new(
                StatusCode::OK,
                format!("{{\"host\":\"{}\"}}", request.url.host_str().unwrap_or_default())
                    .into_bytes(),
            ))
        });

        let context = AppContext::with_transport(
            config,
            signed_in_session(&token_expiring_in(600))?,
            Arc::new(transport),
        )?;

        let report = context
            .reports
            .generate_report(&ReportQuery {
                start: date(2024, 1, 1),
                end: date(2024, 1, 2),
                format: ReportFormat::Json,
                report_type: "inventory".to_string(),
            })
            .await?;

        Ok(report["host"].as_str().map(str::to_string))
    }

    #[tokio::test]
    async fn reports_default_to_the_inventory_api() -> TestResult {
        assert_eq!(
            report_host(&config(None)).await?.as_deref(),
            Some("inventory.example.com")
        );

        Ok(())
    }

    #[tokio::test]
    async fn reports_use_their_own_api_when_configured() -> TestResult {
        assert_eq!(
            report_host(&config(Some("https://reports.example.com"))).await?.as_deref(),
            Some("reports.example.com")
        );

        Ok(())
    }

    #[test]
    fn invalid_base_url_is_rejected() -> TestResult {
        let result = AppContext::with_transport(
            &AppConfig {
                api_url: "not a url".to_string(),
                ..config(None)
            },
            signed_in_session(&token_expiring_in(600))?,
            Arc::new(MockHttpTransport::new()),
        );

        assert!(matches!(result, Err(AppInitError::Api(_))));

        Ok(())
    }

    #[test]
    fn file_session_starts_signed_out() -> TestResult {
        let dir = tempfile::tempdir()?;

        let session = SessionConfig {
            session_file: dir.path().join("session.json"),
        }
        .open()?;

        assert!(session.snapshot()?.id_token.is_none());

        Ok(())
    }
}
