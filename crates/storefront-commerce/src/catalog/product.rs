//! Product and variation records as delivered by the CMS.
//!
//! Field names follow the GraphQL schema (camelCase). Prices stay textual
//! here; [`crate::catalog::pricing`] turns them into numbers.

use std::collections::BTreeMap;

use crate::catalog::category::CategoryRef;
use crate::ids::{ProductId, VariantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Stock status values reported by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    /// Available to purchase. This is the sentinel the pricing utilities
    /// compare against.
    InStock,
    OutOfStock,
    OnBackorder,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "IN_STOCK",
            StockStatus::OutOfStock => "OUT_OF_STOCK",
            StockStatus::OnBackorder => "ON_BACKORDER",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "IN_STOCK" => Some(StockStatus::InStock),
            "OUT_OF_STOCK" => Some(StockStatus::OutOfStock),
            "ON_BACKORDER" => Some(StockStatus::OnBackorder),
            _ => None,
        }
    }
}

/// An image reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MediaImage {
    #[serde(default, deserialize_with = "null_default")]
    pub source_url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
}

/// A GraphQL connection (`{ nodes: [...] }`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
    #[serde(default, deserialize_with = "null_default")]
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

/// A GraphQL single-node edge (`{ node: {...} }`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Edge<T> {
    pub node: T,
}

/// Cursor pagination info.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default, deserialize_with = "null_default")]
    pub has_next_page: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub has_previous_page: bool,
    #[serde(default)]
    pub start_cursor: Option<String>,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// One page of products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    #[serde(default, deserialize_with = "null_default")]
    pub nodes: Vec<CatalogProduct>,
    #[serde(default, deserialize_with = "null_default")]
    pub page_info: PageInfo,
}

impl ProductPage {
    /// The page rendered when a fetch fails.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    #[serde(default, deserialize_with = "null_default")]
    pub database_id: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub on_sale: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub featured: bool,
    #[serde(default)]
    pub total_sales: Option<i64>,
    #[serde(default)]
    pub average_rating: Option<Decimal>,
    #[serde(default)]
    pub review_count: Option<i64>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub regular_price: Option<String>,
    #[serde(default)]
    pub sale_price: Option<String>,
    #[serde(default)]
    pub stock_status: Option<String>,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    #[serde(default)]
    pub image: Option<MediaImage>,
    #[serde(default)]
    pub gallery_images: Option<Connection<MediaImage>>,
    #[serde(default)]
    pub product_categories: Option<Connection<CategoryRef>>,
    #[serde(default)]
    pub variations: Option<Connection<ProductVariation>>,
}

impl CatalogProduct {
    /// The product identity used by the cart.
    pub fn id(&self) -> ProductId {
        ProductId::new(self.database_id.to_string())
    }

    /// URL of the primary image, or an empty string.
    pub fn image_url(&self) -> &str {
        self.image.as_ref().map(|i| i.source_url.as_str()).unwrap_or("")
    }

    /// Names of the categories this product belongs to.
    pub fn category_names(&self) -> Vec<&str> {
        self.product_categories
            .iter()
            .flat_map(|c| c.nodes.iter())
            .map(|c| c.name.as_str())
            .collect()
    }

    /// All variations (empty for simple products).
    pub fn variations(&self) -> &[ProductVariation] {
        self.variations
            .as_ref()
            .map(|c| c.nodes.as_slice())
            .unwrap_or(&[])
    }

    /// Find a variation by its database id.
    pub fn variation(&self, database_id: i64) -> Option<&ProductVariation> {
        self.variations().iter().find(|v| v.database_id == database_id)
    }

    /// Parsed stock status, if recognised.
    pub fn stock(&self) -> Option<StockStatus> {
        self.stock_status.as_deref().and_then(StockStatus::from_str)
    }
}

/// An attribute on a variation (e.g., color: Red).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct VariationAttribute {
    pub name: String,
    pub value: String,
}

/// A purchasable variation of a variable product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariation {
    #[serde(default, deserialize_with = "null_default")]
    pub database_id: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub regular_price: Option<String>,
    #[serde(default)]
    pub sale_price: Option<String>,
    #[serde(default)]
    pub stock_status: Option<String>,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    #[serde(default)]
    pub attributes: Option<Connection<VariationAttribute>>,
}

impl ProductVariation {
    pub fn id(&self) -> VariantId {
        VariantId::new(self.database_id.to_string())
    }

    /// Attribute name to value, as stored on a cart line.
    pub fn attribute_map(&self) -> BTreeMap<String, String> {
        self.attributes
            .iter()
            .flat_map(|c| c.nodes.iter())
            .map(|a| (a.name.clone(), a.value.clone()))
            .collect()
    }
}

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
