//! Products service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use reqwest::Method;
use tracing::info;

use crate::{
    api::{ApiClient, ApiError, ensure_success, shape},
    domain::products::{
        errors::ProductsServiceError,
        models::{Product, ProductDraft},
    },
};

#[derive(Debug, Clone)]
pub struct HttpProductsService {
    api: ApiClient,
}

impl HttpProductsService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn created_by(&self) -> Result<String, ProductsServiceError> {
        let user = self.api.session().user_info()?.unwrap_or_default();

        Ok(user.display_name().to_string())
    }
}

fn products_from(payload: &serde_json::Value) -> Vec<Product> {
    shape::extract_list(payload, "products")
        .iter()
        .map(Product::from_value)
        .collect()
}

#[async_trait]
impl ProductsService for HttpProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let payload = self.api.get_json(self.api.endpoint(&["products"])?).await?;

        Ok(products_from(&payload))
    }

    async fn search_products(&self, term: &str) -> Result<Vec<Product>, ProductsServiceError> {
        let term = term.trim();

        if term.is_empty() {
            return self.list_products().await;
        }

        let mut url = self.api.endpoint(&["products", "search"])?;
        url.query_pairs_mut().append_pair("q", term);

        let payload = self.api.get_json(url).await?;

        Ok(products_from(&payload))
    }

    async fn get_product(&self, id: &str) -> Result<Product, ProductsServiceError> {
        let payload = self.api.get_json(self.api.endpoint(&["products", id])?).await?;

        Ok(Product::from_value(&shape::extract_record(payload)))
    }

    async fn create_product(&self, draft: ProductDraft) -> Result<Product, ProductsServiceError> {
        draft.validate()?;

        let payload = draft.create_payload(Timestamp::now(), &self.created_by()?);
        let body = serde_json::to_value(&payload).map_err(ApiError::from)?;

        let created = self
            .api
            .send_json(Method::POST, self.api.endpoint(&["products"])?, Some(body))
            .await?;

        info!(sku = %draft.sku, "product created");

        Ok(Product::from_value(&shape::extract_record(created)))
    }

    async fn update_product(
        &self,
        id: &str,
        draft: ProductDraft,
    ) -> Result<Product, ProductsServiceError> {
        draft.validate()?;

        let payload = draft.update_payload(Timestamp::now());
        let body = serde_json::to_value(&payload).map_err(ApiError::from)?;

        let updated = self
            .api
            .send_json(Method::PUT, self.api.endpoint(&["products", id])?, Some(body))
            .await?;

        info!(id, "product updated");

        Ok(Product::from_value(&shape::extract_record(updated)))
    }

    async fn delete_product(&self, id: &str) -> Result<(), ProductsServiceError> {
        let response = self
            .api
            .send(Method::DELETE, self.api.endpoint(&["products", id])?, None)
            .await?;

        ensure_success(response)?;

        info!(id, "product deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Searches products by free text; a blank term lists everything.
    async fn search_products(&self, term: &str) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, id: &str) -> Result<Product, ProductsServiceError>;

    /// Validates and creates a product, attributed to the signed-in user.
    async fn create_product(&self, draft: ProductDraft) -> Result<Product, ProductsServiceError>;

    /// Validates and replaces the product with the given id.
    async fn update_product(
        &self,
        id: &str,
        draft: ProductDraft,
    ) -> Result<Product, ProductsServiceError>;

    /// Deletes the product with the given id.
    async fn delete_product(&self, id: &str) -> Result<(), ProductsServiceError>;
}
