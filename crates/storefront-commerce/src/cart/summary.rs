//! Order summary shown on the checkout page.

use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::ids::LineId;
use crate::money::{Currency, Money};

/// Totals for a set of cart lines, in display currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSummary {
    /// Per-line breakdown.
    pub lines: Vec<LineSummary>,
    /// Sum of quantities.
    pub item_count: u64,
    /// Sum of line totals.
    pub subtotal: Money,
    /// Shipping cost. The storefront ships for free.
    pub shipping: Money,
    /// Subtotal plus shipping.
    pub total: Money,
}

impl OrderSummary {
    /// Summarize lines in the given currency.
    pub fn from_lines(lines: &[CartLine], currency: Currency) -> Self {
        let subtotal = Money::from_decimal(CartLine::sum_totals(lines), currency);
        let shipping = Money::zero(currency);
        Self {
            lines: lines
                .iter()
                .map(|line| LineSummary::from_line(line, currency))
                .collect(),
            item_count: lines.iter().map(|l| u64::from(l.quantity)).sum(),
            subtotal,
            shipping,
            total: subtotal.try_add(&shipping).unwrap_or(subtotal),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

/// Pricing breakdown for a single line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineSummary {
    pub line_id: LineId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
    /// Unit price times quantity.
    pub total: Money,
}

impl LineSummary {
    fn from_line(line: &CartLine, currency: Currency) -> Self {
        Self {
            line_id: line.id.clone(),
            name: line.name.clone(),
            quantity: line.quantity,
            unit_price: Money::from_decimal(line.price, currency),
            total: Money::from_decimal(line.line_total(), currency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::NewCartLine;
    use rust_decimal::Decimal;

    #[test]
    fn test_summary_totals() {
        let lines = vec![
            NewCartLine::new("a", "a", "A", Decimal::from(8900))
                .with_quantity(2)
                .into_line(),
            NewCartLine::new("b", "b", "B", Decimal::new(4950, 2)).into_line(),
        ];
        let summary = OrderSummary::from_lines(&lines, Currency::THB);

        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.subtotal.amount_minor, 1_784_950);
        assert_eq!(summary.total, summary.subtotal);
        assert!(summary.has_free_shipping());
        assert_eq!(summary.lines[0].total.amount_minor, 1_780_000);
        assert_eq!(summary.lines[1].unit_price.display(), "\u{0e3f}49.50");
    }

    #[test]
    fn test_empty_summary() {
        let summary = OrderSummary::from_lines(&[], Currency::USD);
        assert!(summary.is_empty());
        assert_eq!(summary.item_count, 0);
        assert!(summary.total.is_zero());
    }
}
