//! Money type for representing monetary values.
//!
//! Amounts are held as integers in the currency's minor unit (satang for
//! THB, cents for USD) so display arithmetic never drifts. Catalog and
//! cart prices are [`Decimal`]s; `Money` is what they become when they
//! are shown to a shopper.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    THB,
    USD,
    EUR,
    GBP,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "THB").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::THB => "THB",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol (e.g., "฿").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::THB => "\u{0e3f}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "THB" => Some(Currency::THB),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit.
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// Rounds half away from zero to the currency's minor unit and
    /// saturates at the `i64` range.
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use storefront_commerce::money::{Currency, Money};
    ///
    /// let price = Money::from_decimal(Decimal::new(89005, 1), Currency::THB);
    /// assert_eq!(price.amount_minor, 890050);
    /// ```
    pub fn from_decimal(amount: Decimal, currency: Currency) -> Self {
        let saturated = if amount.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        };
        let amount_minor = amount
            .checked_mul(Decimal::from(10_i64.pow(currency.decimal_places())))
            .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|scaled| scaled.to_i64())
            .unwrap_or(saturated);
        Self::new(amount_minor, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_minor > 0
    }

    /// Convert to a decimal value in major units.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.amount_minor, self.currency.decimal_places())
    }

    /// Format with symbol, thousands separators and minor digits
    /// (e.g., "฿8,900.00").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format without symbol (e.g., "8,900.00").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places();
        let divisor = 10_u64.pow(places);
        let abs = self.amount_minor.unsigned_abs();
        let sign = if self.amount_minor < 0 { "-" } else { "" };
        let whole = group_thousands(abs / divisor);
        if places == 0 {
            format!("{}{}", sign, whole)
        } else {
            let frac = abs % divisor;
            format!("{}{}.{:0width$}", sign, whole, frac, width = places as usize)
        }
    }

    /// Format rounded to whole units (e.g., "฿8,900"), the compact form
    /// used on product cards.
    pub fn display_whole(&self) -> String {
        let whole = self
            .to_decimal()
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or(0);
        let sign = if whole < 0 { "-" } else { "" };
        format!(
            "{}{}{}",
            sign,
            self.currency.symbol(),
            group_thousands(whole.unsigned_abs())
        )
    }

    /// Add another Money value.
    ///
    /// # Panics
    /// Panics if currencies don't match. Use `try_add` for fallible addition.
    pub fn add(&self, other: &Money) -> Money {
        self.try_add(other).expect("Currency mismatch in addition")
    }

    /// Try to add another Money value, returning None if currencies don't
    /// match or the sum overflows.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let amount = self.amount_minor.checked_add(other.amount_minor)?;
        Some(Money::new(amount, self.currency))
    }

    /// Subtract another Money value.
    ///
    /// # Panics
    /// Panics if currencies don't match.
    pub fn subtract(&self, other: &Money) -> Money {
        self.try_subtract(other)
            .expect("Currency mismatch in subtraction")
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let amount = self.amount_minor.checked_sub(other.amount_minor)?;
        Some(Money::new(amount, self.currency))
    }

    /// Multiply by a scalar, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        let amount = self.amount_minor.checked_mul(factor)?;
        Some(Money::new(amount, self.currency))
    }

    /// Sum an iterator of Money values, returning None on currency mismatch
    /// or overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::add(&self, &other)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::subtract(&self, &other)
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        self.try_multiply(factor)
            .expect("Overflow in money multiplication")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(Decimal::new(4999, 2), Currency::USD);
        assert_eq!(m.amount_minor, 4999);

        let m = Money::from_decimal(Decimal::from(100), Currency::JPY);
        assert_eq!(m.amount_minor, 100);

        // 0.005 rounds up to one minor unit
        let m = Money::from_decimal(Decimal::new(5, 3), Currency::THB);
        assert_eq!(m.amount_minor, 1);
    }

    #[test]
    fn test_money_to_decimal() {
        let m = Money::new(890050, Currency::THB);
        assert_eq!(m.to_decimal(), Decimal::new(890050, 2));
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(890000, Currency::THB);
        assert_eq!(m.display(), "\u{0e3f}8,900.00");

        let m = Money::new(123456789, Currency::USD);
        assert_eq!(m.display(), "$1,234,567.89");

        let m = Money::new(100, Currency::JPY);
        assert_eq!(m.display(), "\u{00a5}100");

        let m = Money::new(-550, Currency::USD);
        assert_eq!(m.display_amount(), "-5.50");
    }

    #[test]
    fn test_money_display_whole() {
        let m = Money::new(890050, Currency::THB);
        assert_eq!(m.display_whole(), "\u{0e3f}8,901");

        let m = Money::new(99, Currency::THB);
        assert_eq!(m.display_whole(), "\u{0e3f}1");
    }

    #[test]
    fn test_money_addition() {
        let a = Money::new(1000, Currency::THB);
        let b = Money::new(500, Currency::THB);
        assert_eq!((a + b).amount_minor, 1500);
    }

    #[test]
    fn test_money_try_sum() {
        let values = [Money::new(100, Currency::THB), Money::new(250, Currency::THB)];
        let total = Money::try_sum(values.iter(), Currency::THB).unwrap();
        assert_eq!(total.amount_minor, 350);

        let mixed = [Money::new(100, Currency::THB), Money::new(250, Currency::USD)];
        assert!(Money::try_sum(mixed.iter(), Currency::THB).is_none());
    }

    #[test]
    fn test_money_try_multiply_overflow() {
        let m = Money::new(i64::MAX, Currency::THB);
        assert!(m.try_multiply(2).is_none());
        assert_eq!(Money::new(300, Currency::THB).try_multiply(3).unwrap().amount_minor, 900);
    }

    #[test]
    #[should_panic(expected = "Currency mismatch")]
    fn test_money_currency_mismatch() {
        let thb = Money::new(1000, Currency::THB);
        let eur = Money::new(1000, Currency::EUR);
        let _ = thb + eur;
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("THB"), Some(Currency::THB));
        assert_eq!(Currency::from_code(" usd "), Some(Currency::USD));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
