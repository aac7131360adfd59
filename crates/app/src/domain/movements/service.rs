//! Movements service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Method;
use tracing::info;

use crate::{
    api::{ApiClient, ApiError, shape},
    domain::movements::{
        errors::MovementsServiceError,
        models::{Movement, NewMovement},
    },
};

#[derive(Debug, Clone)]
pub struct HttpMovementsService {
    api: ApiClient,
}

impl HttpMovementsService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl MovementsService for HttpMovementsService {
    async fn list_movements(&self) -> Result<Vec<Movement>, MovementsServiceError> {
        let payload = self.api.get_json(self.api.endpoint(&["movements"])?).await?;

        Ok(shape::extract_list(&payload, "movements")
            .iter()
            .map(Movement::from_value)
            .collect())
    }

    async fn add_movement(&self, movement: NewMovement) -> Result<Movement, MovementsServiceError> {
        let payload = movement.into_payload()?;

        info!(
            product_id = %payload.product_id,
            kind = %payload.kind,
            quantity = payload.quantity,
            "recording movement"
        );

        let body = serde_json::to_value(&payload).map_err(ApiError::from)?;

        let created = self
            .api
            .send_json(Method::POST, self.api.endpoint(&["movements"])?, Some(body))
            .await?;

        Ok(Movement::from_value(&shape::extract_record(created)))
    }
}

#[automock]
#[async_trait]
pub trait MovementsService: Send + Sync {
    /// Retrieves the movement log.
    async fn list_movements(&self) -> Result<Vec<Movement>, MovementsServiceError>;

    /// Validates and records a movement.
    async fn add_movement(&self, movement: NewMovement) -> Result<Movement, MovementsServiceError>;
}
