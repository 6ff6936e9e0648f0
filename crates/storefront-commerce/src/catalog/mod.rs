//! Product catalog module.
//!
//! Contains the CMS product, variation and category records, plus the
//! pricing utilities that derive display prices and badges from them.

mod category;
pub mod pricing;
mod product;

pub use category::{Category, CategoryRef};
pub use pricing::{Badge, PriceFields, ProductPriceView};
pub use product::{
    CatalogProduct, Connection, Edge, MediaImage, PageInfo, ProductPage, ProductVariation,
    StockStatus, VariationAttribute,
};
