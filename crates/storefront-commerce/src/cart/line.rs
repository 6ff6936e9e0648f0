//! Cart line types.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::pricing::display_price;
use crate::catalog::{CatalogProduct, ProductVariation};
use crate::ids::{LineId, ProductId, VariantId};

/// One purchasable product/variant combination in the cart.
///
/// Name, image and price are snapshots taken when the line was first
/// added; they are never re-fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Mutation key, unique per product/variant combination.
    pub id: LineId,
    pub product_id: ProductId,
    pub name: String,
    /// Unit price.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
    pub image: String,
    /// Always at least 1.
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<CartVariant>,
}

impl CartLine {
    /// Unit price times quantity, saturating at [`Decimal::MAX`].
    pub fn line_total(&self) -> Decimal {
        self.price
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or(Decimal::MAX)
    }

    /// Sum of line totals, saturating at [`Decimal::MAX`].
    pub fn sum_totals<'a>(lines: impl IntoIterator<Item = &'a CartLine>) -> Decimal {
        lines.into_iter().fold(Decimal::ZERO, |acc, line| {
            acc.checked_add(line.line_total()).unwrap_or(Decimal::MAX)
        })
    }

    pub fn variant_id(&self) -> Option<&VariantId> {
        self.variant.as_ref().map(|v| &v.id)
    }

    /// Whether this line holds the given product/variant combination.
    /// Two absent variants match each other.
    pub fn matches(&self, product_id: &ProductId, variant_id: Option<&VariantId>) -> bool {
        &self.product_id == product_id && self.variant_id() == variant_id
    }
}

/// The selected variant of a cart line (e.g., "256GB Blue").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartVariant {
    pub id: VariantId,
    pub name: String,
    /// Attribute name to value (e.g., storage: 256GB).
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

impl CartVariant {
    pub fn new(id: impl Into<VariantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(attribute.into(), value.into());
        self
    }
}

/// A line about to be added; quantity is optional and defaults to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartLine {
    pub id: LineId,
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    pub quantity: Option<u32>,
    pub variant: Option<CartVariant>,
}

impl NewCartLine {
    pub fn new(
        id: impl Into<LineId>,
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            product_id: product_id.into(),
            name: name.into(),
            price,
            image: String::new(),
            quantity: None,
            variant: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_variant(mut self, variant: CartVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Snapshot a catalog product (and optionally one of its variations)
    /// at its current display price.
    pub fn from_product(product: &CatalogProduct, variation: Option<&ProductVariation>) -> Self {
        let product_id = product.id();
        let (price, variant) = match variation {
            Some(v) => (
                display_price(v),
                Some(CartVariant {
                    id: v.id(),
                    name: v.name.clone(),
                    values: v.attribute_map(),
                }),
            ),
            None => (display_price(product), None),
        };
        Self {
            id: LineId::compose(&product_id, variant.as_ref().map(|v| &v.id)),
            product_id,
            name: product.name.clone(),
            price,
            image: product.image_url().to_string(),
            quantity: None,
            variant,
        }
    }

    /// The quantity this candidate adds. Zero is clamped to 1.
    pub fn effective_quantity(&self) -> u32 {
        self.quantity.unwrap_or(1).max(1)
    }

    pub(crate) fn into_line(self) -> CartLine {
        let quantity = self.effective_quantity();
        CartLine {
            id: self.id,
            product_id: self.product_id,
            name: self.name,
            price: self.price.max(Decimal::ZERO),
            image: self.image,
            quantity,
            variant: self.variant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_quantity() {
        let line = NewCartLine::new("a", "p", "A", Decimal::from(10));
        assert_eq!(line.effective_quantity(), 1);
        assert_eq!(line.clone().with_quantity(3).effective_quantity(), 3);
        assert_eq!(line.with_quantity(0).effective_quantity(), 1);
    }

    #[test]
    fn test_negative_price_is_snapshotted_as_zero() {
        let line = NewCartLine::new("a", "p", "A", Decimal::from(-5)).into_line();
        assert_eq!(line.price, Decimal::ZERO);
    }

    #[test]
    fn test_matches_absent_variants() {
        let line = NewCartLine::new("a", "p", "A", Decimal::ONE).into_line();
        assert!(line.matches(&ProductId::new("p"), None));
        assert!(!line.matches(&ProductId::new("p"), Some(&VariantId::new("v"))));
        assert!(!line.matches(&ProductId::new("q"), None));
    }

    #[test]
    fn test_from_product_with_variation() {
        let product: CatalogProduct = serde_json::from_str(
            r#"{
                "databaseId": 42, "slug": "tee", "name": "Tee", "onSale": true,
                "price": "300", "salePrice": "250", "regularPrice": "300",
                "image": { "sourceUrl": "https://cdn.example/tee.jpg" },
                "variations": { "nodes": [{
                    "databaseId": 7, "name": "Tee - M / Red", "price": "320",
                    "attributes": { "nodes": [{ "name": "size", "value": "M" }] }
                }] }
            }"#,
        )
        .unwrap();

        let simple = NewCartLine::from_product(&product, None);
        assert_eq!(simple.id.as_str(), "42");
        assert_eq!(simple.price, Decimal::from(250));
        assert_eq!(simple.image, "https://cdn.example/tee.jpg");
        assert!(simple.variant.is_none());

        let varied = NewCartLine::from_product(&product, product.variation(7));
        assert_eq!(varied.id.as_str(), "42-7");
        assert_eq!(varied.price, Decimal::from(320));
        let variant = varied.variant.unwrap();
        assert_eq!(variant.name, "Tee - M / Red");
        assert_eq!(variant.values.get("size").map(String::as_str), Some("M"));
    }

    #[test]
    fn test_line_serializes_camel_case() {
        let line = NewCartLine::new("42-7", "42", "Tee", Decimal::new(2505, 1))
            .with_variant(CartVariant::new("7", "M").with_value("size", "M"))
            .with_quantity(2)
            .into_line();
        let json = serde_json::to_value(&line).unwrap();

        assert_eq!(json["productId"], "42");
        assert_eq!(json["price"], 250.5);
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["variant"]["values"]["size"], "M");
        assert_eq!(line.line_total(), Decimal::from(501));
    }
}
