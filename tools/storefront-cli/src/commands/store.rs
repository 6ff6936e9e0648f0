//! Store API commands against the server-side cart.

use anyhow::{Context as _, Result};
use serde_json::Value;

use super::{StoreArgs, StoreCommand};
use crate::context::Context;

/// Run the store command.
pub fn run(args: StoreArgs, ctx: &Context) -> Result<()> {
    let api = ctx.store_api();
    let spinner = ctx.output.spinner("Calling Store API...");

    let (what, result) = match args.command {
        StoreCommand::Cart => ("cart", api.get_cart()),
        StoreCommand::ShippingRates => ("shipping rates", api.shipping_rates()),
        StoreCommand::ApplyCoupon { code } => ("coupon", api.apply_coupon(&code)),
        StoreCommand::RemoveCoupon { code } => ("coupon", api.remove_coupon(&code)),
        StoreCommand::Categories => ("categories", api.product_categories()),
    };
    spinner.finish_and_clear();

    let value = result.with_context(|| format!("Store API request for {} failed", what))?;
    print_value(&value, ctx);
    Ok(())
}

fn print_value(value: &Value, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(value);
        return;
    }
    match value {
        Value::Object(map) => {
            for (key, v) in map {
                ctx.output.kv(key, &summarize(v));
            }
        }
        Value::Array(items) => {
            for item in items {
                ctx.output.list_item(&summarize(item));
            }
        }
        other => ctx.output.info(&summarize(other)),
    }
}

/// One-line rendering of a JSON value.
fn summarize(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(map) => match map.get("name").and_then(Value::as_str) {
            Some(name) => name.to_string(),
            None => format!("{{{} fields}}", map.len()),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summarize() {
        assert_eq!(summarize(&json!("x")), "x");
        assert_eq!(summarize(&json!(3)), "3");
        assert_eq!(summarize(&json!([1, 2])), "[2 items]");
        assert_eq!(summarize(&json!({ "name": "Mugs", "id": 3 })), "Mugs");
        assert_eq!(summarize(&json!({ "a": 1 })), "{1 fields}");
    }
}
