//! Price view of a product record.

use anyhow::{Context as _, Result};
use serde::Serialize;
use storefront_commerce::catalog::{pricing, CatalogProduct, ProductPriceView};

use super::PriceArgs;
use crate::context::Context;
use crate::output::badge_label;

/// Run the price command.
pub fn run(args: PriceArgs, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join(&args.file);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read product file: {}", path.display()))?;
    let product: CatalogProduct = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse product record: {}", path.display()))?;

    show_product(&product, ctx)
}

/// Print a product with its derived prices, stock and badges.
pub fn show_product(product: &CatalogProduct, ctx: &Context) -> Result<()> {
    let view = pricing::price_view(product);

    if ctx.output.is_json() {
        ctx.output.json(&PricedProduct { product, price: &view });
        return Ok(());
    }

    let currency = ctx.config.currency();
    let language = &ctx.config.localization.language;

    ctx.output.header(&product.name);
    ctx.output.kv("ID", &product.database_id.to_string());
    ctx.output.kv("Slug", &product.slug);
    ctx.output.kv("Price", &view.display_money(currency).display());
    if let Some(original) = view.original_money(currency) {
        ctx.output.kv("Was", &original.display());
    }
    if view.discount_percent > 0 {
        ctx.output.kv("Discount", &format!("{}%", view.discount_percent));
    }
    ctx.output
        .kv("In stock", if view.in_stock { "yes" } else { "no" });
    if !view.badges.is_empty() {
        let labels: Vec<String> = view.badges.iter().map(|b| badge_label(b, language)).collect();
        ctx.output.kv("Badges", &labels.join(" "));
    }

    let categories = product.category_names();
    if !categories.is_empty() {
        ctx.output.kv("Categories", &categories.join(", "));
    }

    if !product.variations().is_empty() {
        ctx.output.info("");
        ctx.output.info("Variations:");
        for variation in product.variations() {
            let variation_view = pricing::price_view(variation);
            let stock = if variation_view.in_stock { "" } else { " (out of stock)" };
            ctx.output.list_item(&format!(
                "[{}] {}  {}{}",
                variation.database_id,
                variation.name,
                variation_view.display_money(currency).display(),
                stock
            ));
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct PricedProduct<'a> {
    product: &'a CatalogProduct,
    price: &'a ProductPriceView,
}
