//! Product tables.

use std::io;

use tabled::builder::Builder;

use crate::{
    domain::products::{metrics::InventoryMetrics, models::Product},
    render::{NO_LOW_STOCK, NO_PRODUCTS, RenderError, finish_table, money, or_na},
};

pub fn write_products(mut out: impl io::Write, products: &[Product]) -> Result<(), RenderError> {
    if products.is_empty() {
        writeln!(out, "{NO_PRODUCTS}")?;
        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record([
        "ID", "Name", "SKU", "Category", "Stock", "Min", "Max", "Unit price", "Active",
    ]);

    for product in products {
        builder.push_record([
            or_na(product.id.as_deref()),
            product.display_name().to_string(),
            product.display_sku().to_string(),
            or_na(product.category.as_deref()),
            product.current_stock.to_string(),
            product.min_stock.to_string(),
            product.max_stock.to_string(),
            money(product.unit_price),
            if product.is_active { "yes" } else { "no" }.to_string(),
        ]);
    }

    writeln!(out, "{}", finish_table(builder, &[4, 5, 6, 7]))?;

    Ok(())
}

/// Full record of a single product.
pub fn write_product(mut out: impl io::Write, product: &Product) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    let rows = [
        ("ID", or_na(product.id.as_deref())),
        ("Name", product.display_name().to_string()),
        ("SKU", product.display_sku().to_string()),
        ("Description", product.description.clone().unwrap_or_default()),
        ("Category", or_na(product.category.as_deref())),
        ("Current stock", product.current_stock.to_string()),
        ("Min stock", product.min_stock.to_string()),
        ("Max stock", product.max_stock.to_string()),
        ("Unit price", money(product.unit_price)),
        ("Cost price", money(product.cost_price)),
        ("Barcode", or_na(product.barcode.as_deref())),
        ("Image", or_na(product.image_url.as_deref())),
        ("Tags", product.tags.join(", ")),
        ("Active", product.is_active.to_string()),
        ("Created", or_na(product.created_at.as_deref())),
        ("Updated", or_na(product.updated_at.as_deref())),
    ];

    for (label, value) in rows {
        builder.push_record([label.to_string(), value]);
    }

    writeln!(out, "{}", finish_table(builder, &[]))?;

    Ok(())
}

pub fn write_metrics(mut out: impl io::Write, metrics: &InventoryMetrics) -> Result<(), RenderError> {
    writeln!(out, "Total inventory value: {}", money(metrics.total_value))?;
    writeln!(out, "Products: {}", metrics.total_products)?;
    writeln!(out, "Out of stock: {}", metrics.out_of_stock)?;
    writeln!(out, "Average value per product: {}", money(metrics.average_value))?;
    writeln!(out, "Low stock: {}", metrics.low_stock.len())?;

    if metrics.low_stock.is_empty() {
        writeln!(out, "{NO_LOW_STOCK}")?;
        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Name", "SKU", "Stock", "Min", "Deficit"]);

    for product in &metrics.low_stock {
        builder.push_record([
            product.name.clone(),
            product.sku.clone(),
            product.current_stock.to_string(),
            product.min_stock.to_string(),
            product.deficit.to_string(),
        ]);
    }

    writeln!(out, "{}", finish_table(builder, &[2, 3, 4]))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn render(products: &[Product]) -> TestResult<String> {
        let mut out = Vec::new();
        write_products(&mut out, products)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn empty_list_renders_placeholder() -> TestResult {
        assert_eq!(render(&[])?, "No products available\n");

        Ok(())
    }

    #[test]
    fn lists_each_product() -> TestResult {
        let products: Vec<_> = [
            json!({ "id": "p-1", "name": "Desk", "SKU": "D-1", "currentStock": 3 }),
            json!({ "id": "p-2", "title": "Lamp", "sku": "L-1", "isActive": false }),
        ]
        .iter()
        .map(Product::from_value)
        .collect();

        let output = render(&products)?;

        assert!(output.contains("Desk"));
        assert!(output.contains("L-1"));
        assert!(output.contains("no"));

        Ok(())
    }

    #[test]
    fn metrics_without_low_stock_say_so() -> TestResult {
        let mut out = Vec::new();

        write_metrics(&mut out, &InventoryMetrics::default())?;

        let output = String::from_utf8(out)?;
        assert!(output.contains("Products: 0"));
        assert!(output.contains("All products have adequate stock"));

        Ok(())
    }

    #[test]
    fn metrics_list_low_stock_deficits() -> TestResult {
        let products = [Product::from_value(
            &json!({ "name": "Desk", "SKU": "D-1", "currentStock": 1, "minStock": 4 }),
        )];

        let mut out = Vec::new();
        write_metrics(&mut out, &InventoryMetrics::from_products(&products))?;

        let output = String::from_utf8(out)?;
        assert!(output.contains("Low stock: 1"));
        assert!(output.contains("Deficit"));
        assert!(output.contains("D-1"));

        Ok(())
    }

    #[test]
    fn single_product_shows_tags() -> TestResult {
        let product = Product::from_value(&json!({ "name": "Desk", "tags": ["desk", "oak"] }));

        let mut out = Vec::new();
        write_product(&mut out, &product)?;

        assert!(String::from_utf8(out)?.contains("desk, oak"));

        Ok(())
    }
}
