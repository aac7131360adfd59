//! Reports service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Method;
use serde_json::Value;
use tracing::info;
use url::Url;

use crate::{
    api::{ApiClient, ApiError, ensure_success},
    domain::reports::{
        errors::ReportsServiceError,
        models::{CustomReportRequest, InventoryStatus, ReportQuery, ReportTable},
    },
};

#[derive(Debug, Clone)]
pub struct HttpReportsService {
    api: ApiClient,
}

impl HttpReportsService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn report_url(&self, segments: &[&str], query: &ReportQuery) -> Result<Url, ApiError> {
        let mut path = vec!["api", "reports"];
        path.extend_from_slice(segments);

        let mut url = self.api.endpoint(&path)?;
        url.query_pairs_mut().extend_pairs(query.query_pairs());

        Ok(url)
    }
}

#[async_trait]
impl ReportsService for HttpReportsService {
    async fn generate_report(&self, query: &ReportQuery) -> Result<Value, ReportsServiceError> {
        query.validate()?;

        let response = self
            .api
            .send(Method::GET, self.report_url(&[], query)?, None)
            .await?;

        let response = ensure_success(response)?;

        info!(report_type = %query.report_type, format = %query.format, "report generated");

        // Non-JSON formats are kept verbatim.
        Ok(response
            .json()
            .unwrap_or_else(|_not_json| Value::String(response.text())))
    }

    async fn download_report(&self, query: &ReportQuery) -> Result<Vec<u8>, ReportsServiceError> {
        query.validate()?;

        let response = self
            .api
            .send(Method::GET, self.report_url(&["download"], query)?, None)
            .await?;

        Ok(ensure_success(response)?.body)
    }

    async fn inventory_status(&self) -> Result<InventoryStatus, ReportsServiceError> {
        let url = self.api.endpoint(&["api", "reports", "inventory-status"])?;

        let payload = self.api.get_json(url).await?;

        Ok(InventoryStatus::from_value(&payload))
    }

    async fn custom_report(
        &self,
        request: CustomReportRequest,
    ) -> Result<ReportTable, ReportsServiceError> {
        request.validate()?;

        let body = serde_json::to_value(&request).map_err(ApiError::from)?;
        let url = self.api.endpoint(&["api", "reports", "custom"])?;

        let payload = self.api.send_json(Method::POST, url, Some(body)).await?;

        Ok(ReportTable::from_value(&payload))
    }
}

#[automock]
#[async_trait]
pub trait ReportsService: Send + Sync {
    /// Generates a report; JSON reports are decoded, other formats kept as text.
    async fn generate_report(&self, query: &ReportQuery) -> Result<Value, ReportsServiceError>;

    /// Downloads the rendered report file.
    async fn download_report(&self, query: &ReportQuery) -> Result<Vec<u8>, ReportsServiceError>;

    /// Retrieves headline inventory figures.
    async fn inventory_status(&self) -> Result<InventoryStatus, ReportsServiceError>;

    /// Runs a custom report and tabulates its rows.
    async fn custom_report(
        &self,
        request: CustomReportRequest,
    ) -> Result<ReportTable, ReportsServiceError>;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jiff::civil::date;
    use reqwest::StatusCode;
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        api::{ApiResponse, AuthScheme, MockHttpTransport},
        domain::reports::models::{CustomReportFilters, ReportFormat},
        test::{signed_in_session, token_expiring_in, transport_returning},
    };

    use super::*;

    fn service(transport: MockHttpTransport) -> TestResult<HttpReportsService> {
        let api = ApiClient::new(
            "http://localhost:3000",
            AuthScheme::Bearer,
            signed_in_session(&token_expiring_in(600))?,
            Arc::new(transport),
        )?;

        Ok(HttpReportsService::new(api))
    }

    fn query(format: ReportFormat) -> ReportQuery {
        ReportQuery {
            start: date(2024, 1, 1),
            end: date(2024, 1, 31),
            format,
            report_type: "inventory".to_string(),
        }
    }

    #[tokio::test]
    async fn generate_sends_the_documented_query() -> TestResult {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_execute()
            .withf(|request| {
                request.url.as_str()
                    == "http://localhost:3000/api/reports?startDate=2024-01-01&endDate=2024-01-31&format=json&type=inventory"
            })
            .times(1)
            .returning(|_| Ok(ApiResponse::new(StatusCode::OK, br#"{"rows":2}"#.to_vec())));

        let report = service(transport)?
            .generate_report(&query(ReportFormat::Json))
            .await?;

        assert_eq!(report, json!({ "rows": 2 }));

        Ok(())
    }

    #[tokio::test]
    async fn csv_reports_are_kept_as_text() -> TestResult {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_execute()
            .returning(|_| Ok(ApiResponse::new(StatusCode::OK, b"name,stock\nDesk,3\n".to_vec())));

        let report = service(transport)?
            .generate_report(&query(ReportFormat::Csv))
            .await?;

        assert_eq!(report, Value::String("name,stock\nDesk,3\n".to_string()));

        Ok(())
    }

    #[tokio::test]
    async fn download_returns_raw_bytes() -> TestResult {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_execute()
            .withf(|request| request.url.path() == "/api/reports/download")
            .returning(|_| Ok(ApiResponse::new(StatusCode::OK, b"%PDF-1.7".to_vec())));

        let bytes = service(transport)?
            .download_report(&query(ReportFormat::Pdf))
            .await?;

        assert_eq!(bytes, b"%PDF-1.7");

        Ok(())
    }

    #[tokio::test]
    async fn reversed_range_is_rejected_locally() -> TestResult {
        let mut transport = MockHttpTransport::new();
        transport.expect_execute().never();

        let reversed = ReportQuery {
            start: date(2024, 2, 1),
            ..query(ReportFormat::Json)
        };

        let result = service(transport)?.generate_report(&reversed).await;

        assert!(matches!(result, Err(ReportsServiceError::Invalid(_))));

        Ok(())
    }

    #[tokio::test]
    async fn inventory_status_reads_figures() -> TestResult {
        let reports = service(transport_returning(
            200,
            &json!({ "total_products": 40, "low_stock_products": 3, "total_value": 1250.75 }),
        ))?;

        let status = reports.inventory_status().await?;

        assert_eq!(status.total_products, 40);
        assert_eq!(status.low_stock_products, 3);
        assert_eq!(status.monthly_movements, 0);

        Ok(())
    }

    #[tokio::test]
    async fn custom_report_tabulates_data() -> TestResult {
        let reports = service(transport_returning(
            200,
            &json!({ "data": [{ "name": "Desk", "category": "office" }] }),
        ))?;

        let table = reports
            .custom_report(CustomReportRequest::new(
                vec!["name".to_string(), "category".to_string()],
                None,
                None,
                CustomReportFilters::default(),
            ))
            .await?;

        assert_eq!(table.headers, ["name", "category"]);
        assert_eq!(table.rows.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn failed_generation_is_an_api_error() -> TestResult {
        let reports = service(transport_returning(500, &json!({ "error": "boom" })))?;

        let result = reports.generate_report(&query(ReportFormat::Json)).await;

        assert!(matches!(
            result,
            Err(ReportsServiceError::Api(ApiError::Status { .. }))
        ));

        Ok(())
    }
}
