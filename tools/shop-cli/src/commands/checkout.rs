//! Cart building and order placement.

use std::fs;

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use serde::{Deserialize, Serialize};
use shop_commerce::cart::{Cart, CartStore, OptionChoice, SelectedOptions};
use shop_commerce::catalog::{Catalog, CatalogQuery};
use shop_commerce::checkout::CreateOrderRequest;
use shop_commerce::ids::ProductId;
use shop_commerce::ShopSession;

use super::CheckoutArgs;
use crate::context::Context;
use crate::output::outcome_badge;

/// A cart file: the products to add, in order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CartFile {
    #[serde(default)]
    pub items: Vec<CartPick>,
}

impl CartFile {
    /// Parse cart text as JSON or TOML.
    pub fn parse(content: &str, json: bool) -> Result<Self> {
        if json {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(toml::from_str(content)?)
        }
    }
}

/// One pick from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPick {
    /// Product id.
    pub product: String,
    /// Times the product is added to the cart.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Chosen options, in choice order. Absent means the first option of
    /// every attribute.
    #[serde(default)]
    pub options: Option<Vec<OptionChoice>>,
}

fn default_quantity() -> u32 {
    1
}

/// Add every pick to the store, one add per unit.
pub fn build_cart(catalog: &Catalog, picks: &CartFile, store: &mut CartStore) -> Result<()> {
    for pick in &picks.items {
        let product = catalog.require(&ProductId::new(pick.product.as_str()))?;

        let selected = match &pick.options {
            None => product.default_options(),
            Some(choices) => {
                let mut selected = SelectedOptions::new();
                for choice in choices {
                    product
                        .select(&mut selected, &choice.name, &choice.value)
                        .with_context(|| format!("Invalid option for {}", product.name))?;
                }
                selected
            }
        };

        let item = product
            .line_item(selected)
            .with_context(|| format!("Cannot add {} to the cart", product.name))?;
        for _ in 0..pick.quantity {
            store.add(item.clone())?;
        }
    }
    Ok(())
}

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(&args.file);
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read cart file: {}", path.display()))?;
    let picks = CartFile::parse(&content, args.file.ends_with(".json"))
        .with_context(|| format!("Failed to parse cart file: {}", path.display()))?;

    let client = ctx.client();

    let spinner = ctx.output.spinner("Fetching products...");
    let catalog = client.fetch_catalog().await;
    spinner.finish_and_clear();
    let catalog = catalog.context("Failed to fetch catalog")?;

    let mut session = ShopSession::new(ctx.config.currency()?, client);
    build_cart(&catalog, &picks, session.cart_mut())?;

    if session.cart().is_empty() {
        ctx.output.warn("Cart is empty, nothing to order");
        return Ok(());
    }

    print_cart(ctx, session.cart())?;

    if args.dry_run {
        let requests: Vec<CreateOrderRequest> =
            session.cart().items.iter().map(CreateOrderRequest::from).collect();
        if ctx.output.is_json() {
            ctx.output.json(&requests);
        } else {
            ctx.output.header("Order requests (dry run)");
            for request in &requests {
                ctx.output.list_item(&format!(
                    "{} x{} [{}]",
                    request.product_id,
                    request.quantity,
                    request.attribute_values.join(", ")
                ));
            }
        }
        return Ok(());
    }

    if !args.yes && !ctx.output.is_json() {
        ctx.output.info("");
        let confirmed = Confirm::new()
            .with_prompt("Place order?")
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Order cancelled");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Placing order...");
    let report = session.place_order_detailed().await;
    spinner.finish_and_clear();
    let report = report?;
    let outcome = report.outcome();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "outcome": outcome,
            "submitted": report.submitted(),
            "failed": report.failed(),
        }));
    } else {
        ctx.output.kv("Outcome", &outcome_badge(outcome));
        for line in report.lines.iter().filter(|l| !l.is_success()) {
            if let Err(e) = &line.result {
                ctx.output.warn(&format!("{}: {}", line.request.product_id, e));
            }
        }
    }

    if !outcome.is_success() {
        bail!(
            "{} ({} of {} line(s) rejected; accepted lines are not rolled back)",
            outcome.message(),
            report.failed(),
            report.submitted()
        );
    }

    ctx.output.success(outcome.message());
    Ok(())
}

fn print_cart(ctx: &Context, cart: &Cart) -> Result<()> {
    let total = cart.total()?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "items": cart.items,
            "itemCount": cart.item_count(),
            "total": total.display(),
        }));
        return Ok(());
    }

    ctx.output.header("Cart");
    let widths = [28, 32, 5, 12];
    ctx.output.table_row(&["ITEM", "OPTIONS", "QTY", "SUBTOTAL"], &widths);
    for item in &cart.items {
        let options: Vec<String> = item
            .selected_options
            .iter()
            .map(|c| format!("{}: {}", c.name, c.value))
            .collect();
        let options = options.join(", ");
        let quantity = item.quantity.to_string();
        let subtotal = item.subtotal()?.display();
        ctx.output.table_row(
            &[item.name.as_str(), options.as_str(), quantity.as_str(), subtotal.as_str()],
            &widths,
        );
    }
    ctx.output.info("");
    ctx.output.kv("Items", &cart.item_count().to_string());
    ctx.output.kv("Total", &total.display());
    Ok(())
}
