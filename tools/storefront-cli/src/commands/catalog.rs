//! Catalog commands.

use anyhow::{bail, Result};
use storefront_commerce::catalog::{pricing, CatalogProduct, Category, ProductPage};
use storefront_commerce::Currency;

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;
use crate::output::badge_label;

const WIDTHS: [usize; 5] = [8, 32, 14, 14, 0];

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog();
    let spinner = ctx.output.spinner("Querying catalog...");

    match args.command {
        CatalogCommand::Products { first, after } => {
            let page = catalog.products(first, after.as_deref());
            spinner.finish_and_clear();
            show_page("Products", &page, ctx)
        }
        CatalogCommand::Featured { first } => {
            let page = catalog.featured_products(first);
            spinner.finish_and_clear();
            show_page("Featured", &page, ctx)
        }
        CatalogCommand::FlashSale { first } => {
            let page = catalog.flash_sale_products(first);
            spinner.finish_and_clear();
            show_page("Flash sale", &page, ctx)
        }
        CatalogCommand::Category { id, first, after } => {
            let page = catalog.products_by_category(id, first, after.as_deref());
            spinner.finish_and_clear();
            show_page(&format!("Category {}", id), &page, ctx)
        }
        CatalogCommand::Product { slug } => {
            let product = catalog.product_by_slug(&slug);
            spinner.finish_and_clear();
            match product {
                Some(product) => super::price::show_product(&product, ctx),
                None => bail!("Product not found: {}", slug),
            }
        }
        CatalogCommand::Search { term, first } => {
            let page = catalog.search_products(&term, first);
            spinner.finish_and_clear();
            show_page(&format!("Search: {}", term), &page, ctx)
        }
        CatalogCommand::Categories { first } => {
            let categories = catalog.categories(first);
            spinner.finish_and_clear();
            show_categories(&categories, ctx)
        }
    }
}

fn show_page(title: &str, page: &ProductPage, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(page);
        return Ok(());
    }

    if page.is_empty() {
        ctx.output.info("No products");
        return Ok(());
    }

    let language = &ctx.config.localization.language;
    let currency = ctx.config.currency();

    ctx.output.header(title);
    ctx.output
        .table_row(&["ID", "NAME", "PRICE", "WAS", "BADGES"], &WIDTHS);
    for product in &page.nodes {
        let row = product_row(product, language, currency);
        let cols: Vec<&str> = row.iter().map(String::as_str).collect();
        ctx.output.table_row(&cols, &WIDTHS);
    }

    if page.page_info.has_next_page {
        if let Some(cursor) = &page.page_info.end_cursor {
            ctx.output.info("");
            ctx.output.kv("Next page", &format!("--after {}", cursor));
        }
    }
    Ok(())
}

fn show_categories(categories: &[Category], ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    if categories.is_empty() {
        ctx.output.info("No categories");
        return Ok(());
    }

    ctx.output.header("Categories");
    for root in categories.iter().filter(|c| c.is_root()) {
        ctx.output
            .list_item(&format!("{} [{}] ({})", root.name, root.database_id, root.count));
        for child in Category::children_of(categories, &root.slug) {
            ctx.output.kv(
                &format!("  {}", child.name),
                &format!("[{}] ({})", child.database_id, child.count),
            );
        }
    }
    Ok(())
}

/// Table cells for one product: id, name, display price, original price,
/// badge labels.
fn product_row(product: &CatalogProduct, language: &str, currency: Currency) -> [String; 5] {
    let view = pricing::price_view(product);
    [
        product.database_id.to_string(),
        product.name.clone(),
        view.display_money(currency).display_whole(),
        view.original_money(currency)
            .map(|m| m.display_whole())
            .unwrap_or_default(),
        view.top_badges(2)
            .iter()
            .map(|b| badge_label(b, language))
            .collect::<Vec<_>>()
            .join(" "),
    ]
}
