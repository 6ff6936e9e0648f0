//! Display-price derivation from raw catalog fields.
//!
//! Every function here is total: missing or malformed price text counts
//! as zero and the worst outcome is "no discount".

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::catalog::product::{CatalogProduct, ProductVariation, StockStatus};
use crate::money::{Currency, Money};

/// Products with more sales than this get the best-seller badge.
pub const BEST_SELLER_THRESHOLD: i64 = 100;

/// The raw fields price derivation reads.
pub trait PriceFields {
    fn price(&self) -> Option<&str>;
    fn regular_price(&self) -> Option<&str>;
    fn sale_price(&self) -> Option<&str>;
    fn on_sale(&self) -> bool;
    fn stock_status(&self) -> Option<&str>;
    fn stock_quantity(&self) -> Option<i64>;

    fn featured(&self) -> bool {
        false
    }

    fn total_sales(&self) -> Option<i64> {
        None
    }
}

impl PriceFields for CatalogProduct {
    fn price(&self) -> Option<&str> {
        self.price.as_deref()
    }
    fn regular_price(&self) -> Option<&str> {
        self.regular_price.as_deref()
    }
    fn sale_price(&self) -> Option<&str> {
        self.sale_price.as_deref()
    }
    fn on_sale(&self) -> bool {
        self.on_sale
    }
    fn stock_status(&self) -> Option<&str> {
        self.stock_status.as_deref()
    }
    fn stock_quantity(&self) -> Option<i64> {
        self.stock_quantity
    }
    fn featured(&self) -> bool {
        self.featured
    }
    fn total_sales(&self) -> Option<i64> {
        self.total_sales
    }
}

// Variations carry no onSale flag; a positive sale price is the flag.
impl PriceFields for ProductVariation {
    fn price(&self) -> Option<&str> {
        self.price.as_deref()
    }
    fn regular_price(&self) -> Option<&str> {
        self.regular_price.as_deref()
    }
    fn sale_price(&self) -> Option<&str> {
        self.sale_price.as_deref()
    }
    fn on_sale(&self) -> bool {
        parse_price(self.sale_price.as_deref()) > Decimal::ZERO
    }
    fn stock_status(&self) -> Option<&str> {
        self.stock_status.as_deref()
    }
    fn stock_quantity(&self) -> Option<i64> {
        self.stock_quantity
    }
}

/// A short label shown on a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Badge {
    Featured,
    Sale { percent: u8 },
    BestSeller,
    OutOfStock,
}

impl Badge {
    /// Localized label. Thai for `th`, English otherwise.
    pub fn label(&self, language: &str) -> String {
        let thai = language.eq_ignore_ascii_case("th");
        match (self, thai) {
            (Badge::Featured, true) => "แนะนำ".to_string(),
            (Badge::Featured, false) => "Featured".to_string(),
            (Badge::Sale { percent }, true) => format!("ลด {}%", percent),
            (Badge::Sale { percent }, false) => format!("{}% off", percent),
            (Badge::BestSeller, true) => "ขายดี".to_string(),
            (Badge::BestSeller, false) => "Best seller".to_string(),
            (Badge::OutOfStock, true) => "สินค้าหมด".to_string(),
            (Badge::OutOfStock, false) => "Out of stock".to_string(),
        }
    }
}

/// Display-ready price and stock information for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPriceView {
    pub display_price: Decimal,
    pub original_price: Option<Decimal>,
    pub discount_percent: u8,
    pub in_stock: bool,
    pub badges: Vec<Badge>,
}

impl ProductPriceView {
    pub fn display_money(&self, currency: Currency) -> Money {
        Money::from_decimal(self.display_price, currency)
    }

    pub fn original_money(&self, currency: Currency) -> Option<Money> {
        self.original_price.map(|p| Money::from_decimal(p, currency))
    }

    /// Badges to show when space allows only `n`.
    pub fn top_badges(&self, n: usize) -> &[Badge] {
        &self.badges[..self.badges.len().min(n)]
    }
}

/// Parse a textual price. Empty, missing or non-numeric text is zero.
pub fn parse_price(text: Option<&str>) -> Decimal {
    let text = match text.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return Decimal::ZERO,
    };
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .unwrap_or(Decimal::ZERO)
}

/// The price a shopper pays.
///
/// The sale price wins only when the product is on sale and the sale price
/// is positive; otherwise `price` if positive, else `regularPrice`.
pub fn display_price(product: &impl PriceFields) -> Decimal {
    let sale = parse_price(product.sale_price());
    if product.on_sale() && sale > Decimal::ZERO {
        return sale;
    }
    let price = parse_price(product.price());
    if price > Decimal::ZERO {
        price
    } else {
        parse_price(product.regular_price())
    }
}

/// The struck-through price, present only while on sale.
pub fn original_price(product: &impl PriceFields) -> Option<Decimal> {
    if !product.on_sale() {
        return None;
    }
    let regular = parse_price(product.regular_price());
    (regular > Decimal::ZERO).then_some(regular)
}

/// Whole-number discount percentage, rounded half up, in `0..=100`.
pub fn discount_percent(product: &impl PriceFields) -> u8 {
    let current = display_price(product);
    let Some(original) = original_price(product) else {
        return 0;
    };
    if current >= original {
        return 0;
    }
    (original - current)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|d| d.checked_div(original))
        .map(|d| d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_u8())
        .map(|p| p.min(100))
        .unwrap_or(0)
}

/// In stock only when the status is the in-stock sentinel and at least one
/// unit is reported.
pub fn is_in_stock(product: &impl PriceFields) -> bool {
    product.stock_status() == Some(StockStatus::InStock.as_str())
        && product.stock_quantity().unwrap_or(0) > 0
}

/// Badges in display order: featured, sale, best seller, out of stock.
pub fn badges(product: &impl PriceFields) -> Vec<Badge> {
    let mut badges = Vec::new();
    if product.featured() {
        badges.push(Badge::Featured);
    }
    if product.on_sale() {
        badges.push(Badge::Sale {
            percent: discount_percent(product),
        });
    }
    if product.total_sales().unwrap_or(0) > BEST_SELLER_THRESHOLD {
        badges.push(Badge::BestSeller);
    }
    if !is_in_stock(product) {
        badges.push(Badge::OutOfStock);
    }
    badges
}

/// Compute the full price view.
pub fn price_view(product: &impl PriceFields) -> ProductPriceView {
    ProductPriceView {
        display_price: display_price(product),
        original_price: original_price(product),
        discount_percent: discount_percent(product),
        in_stock: is_in_stock(product),
        badges: badges(product),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> CatalogProduct {
        CatalogProduct {
            database_id: 1,
            slug: "p".to_string(),
            name: "P".to_string(),
            ..Default::default()
        }
    }

    fn text(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price(Some("8900")), Decimal::from(8900));
        assert_eq!(parse_price(Some(" 89.50 ")), Decimal::new(8950, 2));
        assert_eq!(parse_price(Some("")), Decimal::ZERO);
        assert_eq!(parse_price(None), Decimal::ZERO);
        assert_eq!(parse_price(Some("abc")), Decimal::ZERO);
        assert_eq!(parse_price(Some("฿8,900.00")), Decimal::ZERO);
    }

    #[test]
    fn test_on_sale_product() {
        let mut p = product();
        p.on_sale = true;
        p.sale_price = text("8900");
        p.regular_price = text("9900");
        p.price = text("9900");

        let view = price_view(&p);
        assert_eq!(view.display_price, Decimal::from(8900));
        assert_eq!(view.original_price, Some(Decimal::from(9900)));
        assert_eq!(view.discount_percent, 10);
    }

    #[test]
    fn test_regular_product() {
        let mut p = product();
        p.price = text("500");

        let view = price_view(&p);
        assert_eq!(view.display_price, Decimal::from(500));
        assert_eq!(view.original_price, None);
        assert_eq!(view.discount_percent, 0);
    }

    #[test]
    fn test_sale_price_ignored_when_not_on_sale() {
        let mut p = product();
        p.sale_price = text("100");
        p.price = text("150");
        assert_eq!(display_price(&p), Decimal::from(150));
    }

    #[test]
    fn test_zero_sale_price_falls_back() {
        let mut p = product();
        p.on_sale = true;
        p.sale_price = text("0");
        p.price = text("");
        p.regular_price = text("300");

        assert_eq!(display_price(&p), Decimal::from(300));
        assert_eq!(original_price(&p), Some(Decimal::from(300)));
        assert_eq!(discount_percent(&p), 0);
    }

    #[test]
    fn test_discount_rounds_half_up() {
        let mut p = product();
        p.on_sale = true;
        p.sale_price = text("199");
        p.regular_price = text("200");
        assert_eq!(discount_percent(&p), 1);

        p.sale_price = text("2");
        p.regular_price = text("3");
        assert_eq!(discount_percent(&p), 33);
    }

    #[test]
    fn test_no_discount_when_sale_not_cheaper() {
        let mut p = product();
        p.on_sale = true;
        p.sale_price = text("120");
        p.regular_price = text("100");
        assert_eq!(discount_percent(&p), 0);
    }

    #[test]
    fn test_in_stock_requires_sentinel_and_quantity() {
        let mut p = product();
        p.stock_status = text("IN_STOCK");
        p.stock_quantity = Some(3);
        assert!(is_in_stock(&p));

        p.stock_quantity = None;
        assert!(!is_in_stock(&p));

        p.stock_quantity = Some(50);
        p.stock_status = text("ON_BACKORDER");
        assert!(!is_in_stock(&p));

        p.stock_status = None;
        assert!(!is_in_stock(&p));
    }

    #[test]
    fn test_badge_order() {
        let mut p = product();
        p.featured = true;
        p.on_sale = true;
        p.sale_price = text("75");
        p.regular_price = text("100");
        p.total_sales = Some(101);
        p.stock_status = text("OUT_OF_STOCK");

        assert_eq!(
            badges(&p),
            vec![
                Badge::Featured,
                Badge::Sale { percent: 25 },
                Badge::BestSeller,
                Badge::OutOfStock,
            ]
        );
        assert_eq!(price_view(&p).top_badges(2), &[Badge::Featured, Badge::Sale { percent: 25 }]);
    }

    #[test]
    fn test_best_seller_threshold_is_exclusive() {
        let mut p = product();
        p.stock_status = text("IN_STOCK");
        p.stock_quantity = Some(1);
        p.total_sales = Some(100);
        assert!(badges(&p).is_empty());
    }

    #[test]
    fn test_badge_labels() {
        assert_eq!(Badge::Sale { percent: 10 }.label("th"), "ลด 10%");
        assert_eq!(Badge::Sale { percent: 10 }.label("en"), "10% off");
        assert_eq!(Badge::OutOfStock.label("TH"), "สินค้าหมด");
        assert_eq!(Badge::BestSeller.label("en"), "Best seller");
    }

    #[test]
    fn test_variation_sale_price_is_its_flag() {
        let variation = ProductVariation {
            database_id: 9,
            price: Some("500".to_string()),
            regular_price: Some("500".to_string()),
            sale_price: Some("400".to_string()),
            ..Default::default()
        };
        let view = price_view(&variation);
        assert_eq!(view.display_price, Decimal::from(400));
        assert_eq!(view.discount_percent, 20);
        assert_eq!(view.badges, vec![Badge::Sale { percent: 20 }, Badge::OutOfStock]);
    }

    #[test]
    fn test_view_money_conversion() {
        let mut p = product();
        p.price = text("8900");
        let view = price_view(&p);
        assert_eq!(view.display_money(Currency::THB).display(), "\u{0e3f}8,900.00");
        assert_eq!(view.original_money(Currency::THB), None);
    }
}
