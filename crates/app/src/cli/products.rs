use std::io;

use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use stockroom_app::{
    context::AppConfig,
    domain::products::{metrics::InventoryMetrics, models::ProductDraft},
    render::{write_metrics, write_product, write_products},
};

use crate::cli::{context, failed, info, success};

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,

    #[command(flatten)]
    config: AppConfig,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List products, optionally matching a search term
    List {
        #[arg(long)]
        search: Option<String>,
    },

    /// Show a single product
    Get { id: String },

    /// Create a product
    Create(ProductFields),

    /// Change an existing product; omitted fields keep their value
    Update {
        id: String,

        #[command(flatten)]
        fields: ProductFields,
    },

    /// Delete a product
    Delete {
        id: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Inventory value and low-stock summary
    Metrics,
}

#[derive(Debug, Args)]
struct ProductFields {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    sku: Option<String>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    stock: Option<i64>,

    #[arg(long)]
    min_stock: Option<i64>,

    #[arg(long)]
    max_stock: Option<i64>,

    #[arg(long)]
    unit_price: Option<Decimal>,

    #[arg(long)]
    cost_price: Option<Decimal>,

    #[arg(long)]
    barcode: Option<String>,

    #[arg(long)]
    image_url: Option<String>,

    /// Whether the product is active
    #[arg(long)]
    active: Option<bool>,
}

impl ProductFields {
    fn apply(self, draft: &mut ProductDraft) {
        let Self {
            name,
            sku,
            description,
            category,
            stock,
            min_stock,
            max_stock,
            unit_price,
            cost_price,
            barcode,
            image_url,
            active,
        } = self;

        if let Some(name) = name {
            draft.name = name;
        }
        if let Some(sku) = sku {
            draft.sku = sku;
        }
        if let Some(description) = description {
            draft.description = description;
        }
        if let Some(category) = category {
            draft.category = category;
        }
        if let Some(stock) = stock {
            draft.current_stock = stock;
        }
        if let Some(min_stock) = min_stock {
            draft.min_stock = min_stock;
        }
        if let Some(max_stock) = max_stock {
            draft.max_stock = max_stock;
        }
        if let Some(unit_price) = unit_price {
            draft.unit_price = unit_price;
        }
        if let Some(cost_price) = cost_price {
            draft.cost_price = cost_price;
        }
        if let Some(barcode) = barcode {
            draft.barcode = barcode;
        }
        if let Some(image_url) = image_url {
            draft.image_url = image_url;
        }
        if let Some(active) = active {
            draft.is_active = active;
        }
    }
}

pub(crate) async fn run(command: ProductsCommand) -> Result<(), String> {
    let context = context(&command.config)?;
    let products = &context.products;

    match command.command {
        ProductsSubcommand::List { search } => {
            let listed = products
                .search_products(search.as_deref().unwrap_or_default())
                .await
                .map_err(failed("load products"))?;

            write_products(io::stdout().lock(), &listed).map_err(|error| error.to_string())
        }
        ProductsSubcommand::Get { id } => {
            let product = products.get_product(&id).await.map_err(failed("load product"))?;

            write_product(io::stdout().lock(), &product).map_err(|error| error.to_string())
        }
        ProductsSubcommand::Create(fields) => {
            let mut draft = ProductDraft {
                is_active: true,
                ..ProductDraft::default()
            };
            fields.apply(&mut draft);

            let created = products
                .create_product(draft)
                .await
                .map_err(failed("create product"))?;

            success(&format!("Product {} created", created.display_name()))
        }
        ProductsSubcommand::Update { id, fields } => {
            let current = products.get_product(&id).await.map_err(failed("load product"))?;

            let mut draft = ProductDraft::from(&current);
            fields.apply(&mut draft);

            products
                .update_product(&id, draft)
                .await
                .map_err(failed("update product"))?;

            success("Product updated")
        }
        ProductsSubcommand::Delete { id, yes } => {
            if !yes {
                return info(&format!("Pass --yes to delete product {id}"));
            }

            products
                .delete_product(&id)
                .await
                .map_err(failed("delete product"))?;

            success("Product deleted")
        }
        ProductsSubcommand::Metrics => {
            let listed = products
                .list_products()
                .await
                .map_err(failed("load products"))?;

            write_metrics(io::stdout().lock(), &InventoryMetrics::from_products(&listed))
                .map_err(|error| error.to_string())
        }
    }
}
