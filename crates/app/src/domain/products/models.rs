//! Product Models

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::{
    api::loose::{decimal, flag_unless_false, integer, strings, text},
    domain::products::errors::ProductsServiceError,
};

const ID: &[&str] = &["product_Id", "product_id", "productId", "id"];
const NAME: &[&str] = &["name", "productName", "title"];
const SKU: &[&str] = &["SKU", "sku"];
const DESCRIPTION: &[&str] = &["description", "desc"];
const CATEGORY: &[&str] = &["category", "productCategory"];
const UNIT_PRICE: &[&str] = &["unitPrice", "price", "cost"];
const COST_PRICE: &[&str] = &["costPrice"];
const CURRENT_STOCK: &[&str] = &["currentStock", "stock", "quantity"];
const MIN_STOCK: &[&str] = &["minStock", "minimumStock"];
const MAX_STOCK: &[&str] = &["maxStock", "maximumStock"];
const BARCODE: &[&str] = &["barcode", "barCode"];

/// Product as read from the API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Product {
    pub id: Option<String>,
    pub name: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub current_stock: i64,
    pub min_stock: i64,
    pub max_stock: i64,
    pub unit_price: Decimal,
    pub cost_price: Decimal,
    pub barcode: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub tags: Vec<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Product {
    /// Read a product from a loosely-shaped record.
    #[must_use]
    pub fn from_value(record: &Value) -> Self {
        Self {
            id: text(record, ID),
            name: text(record, NAME),
            sku: text(record, SKU),
            description: text(record, DESCRIPTION),
            category: text(record, CATEGORY),
            current_stock: integer(record, CURRENT_STOCK),
            min_stock: integer(record, MIN_STOCK),
            max_stock: integer(record, MAX_STOCK),
            unit_price: decimal(record, UNIT_PRICE),
            cost_price: decimal(record, COST_PRICE),
            barcode: text(record, BARCODE),
            image_url: text(record, &["imageUrl"]),
            is_active: flag_unless_false(record, "isActive"),
            tags: strings(record, "tags"),
            created_at: text(record, &["createdAt"]),
            updated_at: text(record, &["updatedAt"]),
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed product")
    }

    /// SKU, falling back to the id.
    #[must_use]
    pub fn display_sku(&self) -> &str {
        self.sku
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("N/A")
    }

    /// Stock value at unit price, saturating at the decimal bounds.
    #[must_use]
    pub fn stock_value(&self) -> Decimal {
        self.unit_price
            .saturating_mul(Decimal::from(self.current_stock))
    }

    /// Stock at or below a configured, positive minimum.
    #[must_use]
    pub fn is_low_stock(&self) -> bool {
        self.min_stock > 0 && self.current_stock <= self.min_stock
    }
}

/// Product fields entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub sku: String,
    pub category: String,
    pub current_stock: i64,
    pub min_stock: i64,
    pub max_stock: i64,
    pub unit_price: Decimal,
    pub cost_price: Decimal,
    pub barcode: String,
    pub image_url: String,
    pub is_active: bool,
}

impl ProductDraft {
    /// Name and SKU are required.
    pub fn validate(&self) -> Result<(), ProductsServiceError> {
        if self.name.trim().is_empty() {
            return Err(ProductsServiceError::Invalid("product name is required"));
        }

        if self.sku.trim().is_empty() {
            return Err(ProductsServiceError::Invalid("SKU is required"));
        }

        Ok(())
    }

    /// Body for `POST /products`.
    #[must_use]
    pub fn create_payload(&self, now: Timestamp, created_by: &str) -> ProductPayload {
        ProductPayload {
            created_at: Some(now),
            created_by: Some(created_by.to_string()),
            ..self.update_payload(now)
        }
    }

    /// Body for `PUT /products/{id}`.
    #[must_use]
    pub fn update_payload(&self, now: Timestamp) -> ProductPayload {
        let tags = if self.name.is_empty() {
            Vec::new()
        } else {
            vec![self.name.to_lowercase()]
        };

        ProductPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            sku: self.sku.clone(),
            category: self.category.clone(),
            current_stock: self.current_stock,
            min_stock: self.min_stock,
            max_stock: self.max_stock,
            unit_price: self.unit_price,
            cost_price: self.cost_price,
            barcode: self.barcode.clone(),
            image_url: self.image_url.clone(),
            tags,
            created_at: None,
            updated_at: now,
            created_by: None,
            is_active: self.is_active,
        }
    }
}

impl From<&Product> for ProductDraft {
    /// Start an edit from the product as it currently is.
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone().unwrap_or_default(),
            description: product.description.clone().unwrap_or_default(),
            sku: product.sku.clone().unwrap_or_default(),
            category: product.category.clone().unwrap_or_default(),
            current_stock: product.current_stock,
            min_stock: product.min_stock,
            max_stock: product.max_stock,
            unit_price: product.unit_price,
            cost_price: product.cost_price,
            barcode: product.barcode.clone().unwrap_or_default(),
            image_url: product.image_url.clone().unwrap_or_default(),
            is_active: product.is_active,
        }
    }
}

/// Wire body sent when creating or updating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    #[serde(rename = "SKU")]
    pub sku: String,
    pub category: String,
    pub current_stock: i64,
    pub min_stock: i64,
    pub max_stock: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost_price: Decimal,
    pub barcode: String,
    pub image_url: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    pub updated_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    pub is_active: bool,
}
