//! Inventory metrics derived from a product list.

use rust_decimal::Decimal;

use crate::domain::products::models::Product;

/// Product at or below its minimum stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowStockProduct {
    pub name: String,
    pub sku: String,
    pub current_stock: i64,
    pub min_stock: i64,
    pub deficit: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryMetrics {
    /// Sum of unit price times current stock, saturating at the decimal bounds.
    pub total_value: Decimal,
    pub total_products: usize,
    pub low_stock: Vec<LowStockProduct>,
    pub out_of_stock: usize,
    /// Total value per product, rounded to cents.
    pub average_value: Decimal,
}

impl InventoryMetrics {
    #[must_use]
    pub fn from_products(products: &[Product]) -> Self {
        let total_value = products
            .iter()
            .map(Product::stock_value)
            .fold(Decimal::ZERO, Decimal::saturating_add);

        let low_stock = products
            .iter()
            .filter(|product| product.is_low_stock())
            .map(|product| LowStockProduct {
                name: product.display_name().to_string(),
                sku: product.display_sku().to_string(),
                current_stock: product.current_stock,
                min_stock: product.min_stock,
                deficit: product.min_stock.saturating_sub(product.current_stock),
            })
            .collect();

        let out_of_stock = products
            .iter()
            .filter(|product| product.current_stock == 0)
            .count();

        let average_value = if products.is_empty() {
            Decimal::ZERO
        } else {
            (total_value / Decimal::from(products.len())).round_dp(2)
        };

        Self {
            total_value,
            total_products: products.len(),
            low_stock,
            out_of_stock,
            average_value,
        }
    }
}
