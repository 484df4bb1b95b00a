//! Catalog listing.

use anyhow::{Context as _, Result};
use serde::Serialize;
use shop_commerce::catalog::{CatalogQuery, CategoryFilter, Product};

use super::CatalogArgs;
use crate::context::Context;
use crate::output::stock_badge;

/// One listing row.
#[derive(Debug, Serialize)]
struct ProductRow<'a> {
    id: &'a str,
    name: &'a str,
    brand: &'a str,
    category: &'a str,
    price: String,
    in_stock: bool,
    test_id: String,
}

impl<'a> From<&'a Product> for ProductRow<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            id: product.id.as_str(),
            name: &product.name,
            brand: &product.brand,
            category: &product.category,
            price: product
                .primary_price()
                .map(|p| p.display())
                .unwrap_or_else(|| "Price not available".to_string()),
            in_stock: product.in_stock,
            test_id: product.test_id(),
        }
    }
}

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let filter: CategoryFilter = args.category.parse()?;
    ctx.output.debug(&format!("Fetching catalog from {}", ctx.config.service.endpoint));

    let spinner = ctx.output.spinner("Fetching products...");
    let catalog = ctx.client().fetch_catalog().await;
    spinner.finish_and_clear();
    let catalog = catalog.context("Failed to fetch catalog")?;

    let rows: Vec<ProductRow<'_>> = catalog.in_category(&filter).map(ProductRow::from).collect();

    if ctx.output.is_json() {
        ctx.output.json(&rows);
        return Ok(());
    }

    ctx.output.header(&format!("Products ({})", filter));
    if rows.is_empty() {
        ctx.output.info(&format!("No products in category '{}'", filter));
        ctx.output.info(&format!("Categories: {}", catalog.categories().join(", ")));
        return Ok(());
    }

    let widths = [28, 16, 12, 12];
    ctx.output.table_row(&["NAME", "BRAND", "PRICE", "STOCK"], &widths);
    for row in &rows {
        let stock = stock_badge(row.in_stock);
        ctx.output
            .table_row(&[row.name, row.brand, row.price.as_str(), stock.as_str()], &widths);
        ctx.output.debug(&format!("{} ({})", row.id, row.test_id));
    }
    ctx.output.info("");
    ctx.output.info(&format!("{} product(s)", rows.len()));

    Ok(())
}
