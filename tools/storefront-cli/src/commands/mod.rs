//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod price;
pub mod store;

use clap::{Args, Subcommand};
use rust_decimal::Decimal;

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart lines and totals.
    Show,
    /// Add a line from explicit fields.
    Add {
        /// Product ID.
        product_id: String,
        /// Product name.
        #[arg(short, long)]
        name: String,
        /// Unit price.
        #[arg(short, long)]
        price: Decimal,
        /// Quantity (default 1).
        #[arg(short, long)]
        quantity: Option<u32>,
        /// Variant ID.
        #[arg(long)]
        variant: Option<String>,
        /// Variant display name.
        #[arg(long, requires = "variant")]
        variant_name: Option<String>,
        /// Image URL.
        #[arg(long)]
        image: Option<String>,
    },
    /// Fetch a product by slug and add it at its current price.
    AddProduct {
        /// Product slug.
        slug: String,
        /// Variation database ID.
        #[arg(long)]
        variation: Option<i64>,
        /// Quantity (default 1).
        #[arg(short, long)]
        quantity: Option<u32>,
    },
    /// Remove a line.
    Remove {
        /// Line ID.
        line_id: String,
    },
    /// Set a line's quantity. Zero or less removes it.
    Update {
        /// Line ID.
        line_id: String,
        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove every line.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the order summary and empty the cart.
    Checkout {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List published products.
    Products {
        #[arg(short, long, default_value = "12")]
        first: u32,
        /// Cursor from a previous page.
        #[arg(long)]
        after: Option<String>,
    },
    /// List featured products.
    Featured {
        #[arg(short, long, default_value = "8")]
        first: u32,
    },
    /// List products on sale.
    FlashSale {
        #[arg(short, long, default_value = "8")]
        first: u32,
    },
    /// List products of one category.
    Category {
        /// Category database ID.
        id: i64,
        #[arg(short, long, default_value = "12")]
        first: u32,
        #[arg(long)]
        after: Option<String>,
    },
    /// Show one product.
    Product {
        /// Product slug.
        slug: String,
    },
    /// Search products.
    Search {
        /// Search term.
        term: String,
        #[arg(short, long, default_value = "20")]
        first: u32,
    },
    /// List categories.
    Categories {
        #[arg(short, long, default_value = "20")]
        first: u32,
    },
}

/// Arguments for the price command.
#[derive(Args)]
pub struct PriceArgs {
    /// Product record (JSON, as returned by the CMS).
    pub file: String,
}

/// Arguments for the store command.
#[derive(Args)]
pub struct StoreArgs {
    #[command(subcommand)]
    pub command: StoreCommand,
}

#[derive(Subcommand)]
pub enum StoreCommand {
    /// Show the server-side cart.
    Cart,
    /// Show shipping rates for the server-side cart.
    ShippingRates,
    /// Apply a coupon code.
    ApplyCoupon { code: String },
    /// Remove a coupon code.
    RemoveCoupon { code: String },
    /// List product categories.
    Categories,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
