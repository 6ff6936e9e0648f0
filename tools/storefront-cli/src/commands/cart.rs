//! Cart commands.

use anyhow::{bail, Context as _, Result};
use chrono::{DateTime, Utc};
use dialoguer::Confirm;
use rust_decimal::Decimal;
use serde::Serialize;
use storefront_commerce::cart::{CartStorage, CartStore, CartVariant, NewCartLine, OrderSummary};
use storefront_commerce::{Currency, LineId, Money, ProductId, VariantId};

use super::{CartArgs, CartCommand};
use crate::context::Context;

const WIDTHS: [usize; 5] = [14, 28, 5, 14, 14];

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => show_cart(&cart, ctx),
        CartCommand::Add {
            product_id,
            name,
            price,
            quantity,
            variant,
            variant_name,
            image,
        } => {
            let product_id = ProductId::new(product_id);
            let variant_id = variant.map(VariantId::new);
            let mut line = NewCartLine::new(
                LineId::compose(&product_id, variant_id.as_ref()),
                product_id,
                name,
                price,
            );
            if let Some(id) = variant_id {
                let name = variant_name.unwrap_or_else(|| id.to_string());
                line = line.with_variant(CartVariant::new(id, name));
            }
            if let Some(image) = image {
                line = line.with_image(image);
            }
            if let Some(quantity) = quantity {
                line = line.with_quantity(quantity);
            }
            add_line(&mut cart, line, ctx)
        }
        CartCommand::AddProduct {
            slug,
            variation,
            quantity,
        } => {
            let spinner = ctx.output.spinner(&format!("Fetching {}...", slug));
            let product = ctx.catalog().product_by_slug(&slug);
            spinner.finish_and_clear();

            let Some(product) = product else {
                bail!("Product not found: {}", slug);
            };
            let variation = match variation {
                Some(id) => Some(product.variation(id).with_context(|| {
                    format!("Product {} has no variation {}", slug, id)
                })?),
                None => None,
            };

            let mut line = NewCartLine::from_product(&product, variation);
            if let Some(quantity) = quantity {
                line = line.with_quantity(quantity);
            }
            add_line(&mut cart, line, ctx)
        }
        CartCommand::Remove { line_id } => {
            if cart.remove_item(&LineId::new(line_id.as_str())) {
                ctx.output.success(&format!("Removed {}", line_id));
            } else {
                ctx.output.warn(&format!("No line {} in cart", line_id));
            }
            show_totals(&cart, ctx);
            Ok(())
        }
        CartCommand::Update { line_id, quantity } => {
            let id = LineId::new(line_id.as_str());
            if !cart.update_quantity(&id, quantity) {
                ctx.output.warn(&format!("No line {} in cart", line_id));
            } else if quantity <= 0 {
                ctx.output.success(&format!("Removed {}", line_id));
            } else {
                ctx.output.success(&format!("{} × {}", line_id, quantity));
            }
            show_totals(&cart, ctx);
            Ok(())
        }
        CartCommand::Clear { yes } => {
            if cart.is_empty() {
                ctx.output.info("Cart is already empty");
                return Ok(());
            }
            if !yes && !confirm(ctx, &format!("Remove all {} lines?", cart.line_count()))? {
                ctx.output.warn("Cancelled");
                return Ok(());
            }
            cart.clear_cart();
            ctx.output.success("Cart cleared");
            Ok(())
        }
        CartCommand::Checkout { yes } => checkout(&mut cart, yes, ctx),
    }
}

fn add_line<S: CartStorage>(
    cart: &mut CartStore<S>,
    line: NewCartLine,
    ctx: &Context,
) -> Result<()> {
    let name = line.name.clone();
    let id = cart.add_item(line);
    let quantity = cart.get_item(&id).map(|l| l.quantity).unwrap_or(0);
    ctx.output
        .success(&format!("{} ({}) × {} in cart", name, id, quantity));
    show_totals(cart, ctx);
    Ok(())
}

fn show_cart<S: CartStorage>(cart: &CartStore<S>, ctx: &Context) -> Result<()> {
    let currency = ctx.config.currency();

    if ctx.output.is_json() {
        ctx.output.json(&CartView::new(cart, currency));
        return Ok(());
    }

    if cart.is_empty() {
        ctx.output.info("Cart is empty");
        return Ok(());
    }

    ctx.output.header("Cart");
    ctx.output
        .table_row(&["LINE", "NAME", "QTY", "UNIT", "TOTAL"], &WIDTHS);
    for row in line_rows(cart, currency) {
        let cols: Vec<&str> = row.iter().map(String::as_str).collect();
        ctx.output.table_row(&cols, &WIDTHS);
    }
    if ctx.output.is_verbose() {
        for line in cart.items().iter().filter(|l| !l.image.is_empty()) {
            ctx.output.kv(line.id.as_str(), &line.image);
        }
    }
    ctx.output.info("");
    show_totals(cart, ctx);
    Ok(())
}

fn show_totals<S: CartStorage>(cart: &CartStore<S>, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&CartView::new(cart, ctx.config.currency()));
        return;
    }
    ctx.output.kv("Items", &cart.total_items().to_string());
    ctx.output
        .kv("Total", &cart.total_money(ctx.config.currency()).display());
}

fn checkout<S: CartStorage>(cart: &mut CartStore<S>, yes: bool, ctx: &Context) -> Result<()> {
    if cart.is_empty() {
        bail!("Cart is empty");
    }

    let currency = ctx.config.currency();
    let preview = cart.summary(currency);
    if !ctx.output.is_json() {
        ctx.output.header("Order summary");
        print_summary(&preview, ctx);
    }

    if !yes && !confirm(ctx, "Place order?")? {
        ctx.output.warn("Checkout cancelled");
        return Ok(());
    }

    let receipt = Receipt {
        placed_at: Utc::now(),
        summary: cart.complete_checkout(currency),
    };

    if ctx.output.is_json() {
        ctx.output.json(&receipt);
    } else {
        ctx.output.success(&format!(
            "Order placed at {} for {}",
            receipt.placed_at.format("%Y-%m-%d %H:%M:%S UTC"),
            receipt.summary.total.display()
        ));
    }
    Ok(())
}

fn print_summary(summary: &OrderSummary, ctx: &Context) {
    for line in &summary.lines {
        ctx.output.list_item(&format!(
            "{} × {}  {}",
            line.name,
            line.quantity,
            line.total.display()
        ));
    }
    ctx.output.kv("Subtotal", &summary.subtotal.display());
    let shipping = if summary.has_free_shipping() {
        "Free".to_string()
    } else {
        summary.shipping.display()
    };
    ctx.output.kv("Shipping", &shipping);
    ctx.output.kv("Total", &summary.total.display());
}

fn confirm(ctx: &Context, prompt: &str) -> Result<bool> {
    if ctx.output.is_json() || !console::user_attended() {
        bail!("Refusing to prompt without a terminal; pass --yes");
    }
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

/// Table cells for each line: id, name, quantity, unit price, line total.
fn line_rows<S: CartStorage>(cart: &CartStore<S>, currency: Currency) -> Vec<[String; 5]> {
    cart.items()
        .iter()
        .map(|line| {
            let name = match &line.variant {
                Some(v) => format!("{} ({})", line.name, v.name),
                None => line.name.clone(),
            };
            [
                line.id.to_string(),
                name,
                line.quantity.to_string(),
                Money::from_decimal(line.price, currency).display(),
                Money::from_decimal(line.line_total(), currency).display(),
            ]
        })
        .collect()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartView<'a> {
    items: &'a [storefront_commerce::cart::CartLine],
    total_items: u64,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    total_price: Decimal,
    total_display: String,
}

impl<'a> CartView<'a> {
    fn new<S: CartStorage>(cart: &'a CartStore<S>, currency: Currency) -> Self {
        Self {
            items: cart.items(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
            total_display: cart.total_money(currency).display(),
        }
    }
}

#[derive(Serialize)]
struct Receipt {
    placed_at: DateTime<Utc>,
    #[serde(flatten)]
    summary: OrderSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_commerce::cart::MemoryStorage;

    #[test]
    fn test_line_rows() {
        let mut cart = CartStore::new(MemoryStorage::new());
        cart.add_item(
            NewCartLine::new("42-7", "42", "Tee", Decimal::new(2505, 1))
                .with_variant(CartVariant::new("7", "M / Red"))
                .with_quantity(2),
        );

        let rows = line_rows(&cart, Currency::THB);
        assert_eq!(
            rows[0],
            [
                "42-7".to_string(),
                "Tee (M / Red)".to_string(),
                "2".to_string(),
                "\u{0e3f}250.50".to_string(),
                "\u{0e3f}501.00".to_string(),
            ]
        );
    }

    #[test]
    fn test_cart_view_json() {
        let mut cart = CartStore::new(MemoryStorage::new());
        cart.add_item(NewCartLine::new("9", "9", "Mug", Decimal::from(8900)).with_quantity(2));

        let json = serde_json::to_value(CartView::new(&cart, Currency::THB)).unwrap();
        assert_eq!(json["totalItems"], 2);
        assert_eq!(json["totalPrice"], 17800.0);
        assert_eq!(json["totalDisplay"], "\u{0e3f}17,800.00");
        assert_eq!(json["items"][0]["productId"], "9");
    }
}
