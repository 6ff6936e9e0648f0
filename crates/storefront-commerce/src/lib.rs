//! Storefront domain types and logic.
//!
//! This crate holds the client-side state and pure derivations of the
//! storefront:
//!
//! - **Catalog**: CMS product, variation and category records, plus
//!   pricing utilities (display price, discount percent, badges)
//! - **Cart**: the cart store with merge-on-add semantics and explicit
//!   save/load hooks
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//! use rust_decimal::Decimal;
//!
//! let mut cart = CartStore::new(MemoryStorage::new());
//! cart.add_item(NewCartLine::new("42", "42", "Tee", Decimal::from(250)).with_quantity(2));
//! cart.add_item(NewCartLine::new("42", "42", "Tee", Decimal::from(250)));
//!
//! assert_eq!(cart.total_items(), 3);
//! assert_eq!(cart.total_money(Currency::THB).display(), "\u{0e3f}750.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::pricing;
    pub use crate::catalog::{
        Badge, CatalogProduct, Category, PriceFields, ProductPage, ProductPriceView,
        ProductVariation, StockStatus,
    };

    // Cart
    #[cfg(feature = "storage")]
    pub use crate::cart::CacheStorage;
    pub use crate::cart::{
        CartLine, CartStorage, CartStore, CartVariant, MemoryStorage, NewCartLine, OrderSummary,
        PersistedCart,
    };
}
