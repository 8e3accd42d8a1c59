//! Money type for representing monetary values.
//!
//! Uses a cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. Display always rounds
//! to exactly two decimal places.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Bangladeshi Taka, the shop's home currency.
    #[default]
    Bdt,
    Usd,
    Eur,
}

impl Currency {
    /// Get the currency code (e.g., "BDT").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Bdt => "BDT",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    /// Get the currency symbol (e.g., "Tk").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Bdt => "Tk",
            Currency::Usd => "$",
            Currency::Eur => "\u{20ac}",
        }
    }

    /// Whether the symbol trails the amount ("120.00 Tk") rather than
    /// leading it ("$120.00").
    pub fn symbol_trails(&self) -> bool {
        matches!(self, Currency::Bdt)
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "BDT" => Some(Currency::Bdt),
            "USD" => Some(Currency::Usd),
            "EUR" => Some(Currency::Eur),
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
///
/// Amounts are stored in the smallest unit of the currency (poisha for BDT,
/// cents for USD/EUR).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount, rounding to the cent.
    ///
    /// ```
    /// use bodega_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(120.0, Currency::Bdt);
    /// assert_eq!(price.amount_cents, 12000);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let amount_cents = (amount * 100.0).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_cents > 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Format as a display string (e.g., "120.00 Tk").
    pub fn display(&self) -> String {
        if self.currency.symbol_trails() {
            format!("{} {}", self.display_amount(), self.currency.symbol())
        } else {
            format!("{}{}", self.currency.symbol(), self.display_amount())
        }
    }

    /// Format as a display string without symbol (e.g., "120.00").
    pub fn display_amount(&self) -> String {
        format!("{:.2}", self.to_decimal())
    }

    /// Try to add another Money value.
    ///
    /// Returns `None` if the currencies don't match or the sum overflows.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let sum = self.amount_cents.checked_add(other.amount_cents)?;
        Some(Money::new(sum, self.currency))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let diff = self.amount_cents.checked_sub(other.amount_cents)?;
        Some(Money::new(diff, self.currency))
    }

    /// Try to multiply by a scalar, returning `None` on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        let product = self.amount_cents.checked_mul(factor)?;
        Some(Money::new(product, self.currency))
    }

    /// Try to sum an iterator of Money values.
    ///
    /// Returns `None` if any currency differs from `currency` or the sum
    /// overflows.
    pub fn try_sum<'a>(iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        let mut total = Money::zero(currency);
        for m in iter {
            total = total.try_add(m)?;
        }
        Some(total)
    }
}

impl Add for Money {
    type Output = Money;

    /// # Panics
    /// Panics on currency mismatch or overflow. Use `try_add` for fallible
    /// addition.
    fn add(self, other: Money) -> Money {
        self.try_add(&other).expect("Currency mismatch in addition")
    }
}

impl Sub for Money {
    type Output = Money;

    /// # Panics
    /// Panics on currency mismatch or overflow. Use `try_subtract` for
    /// fallible subtraction.
    fn sub(self, other: Money) -> Money {
        self.try_subtract(&other)
            .expect("Currency mismatch in subtraction")
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    /// # Panics
    /// Panics on overflow. Use `try_multiply` for fallible multiplication.
    fn mul(self, factor: i64) -> Money {
        self.try_multiply(factor)
            .expect("Overflow in multiplication")
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
    fn test_money_from_cents() {
        let m = Money::new(12000, Currency::Bdt);
        assert_eq!(m.amount_cents, 12000);
        assert_eq!(m.currency, Currency::Bdt);
    }

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(55.0, Currency::Bdt);
        assert_eq!(m.amount_cents, 5500);

        let m = Money::from_decimal(49.99, Currency::Usd);
        assert_eq!(m.amount_cents, 4999);
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(12000, Currency::Bdt);
        assert_eq!(m.display(), "120.00 Tk");

        let m = Money::new(4999, Currency::Usd);
        assert_eq!(m.display(), "$49.99");
    }

    #[test]
    fn test_money_addition() {
        let a = Money::new(1000, Currency::Bdt);
        let b = Money::new(500, Currency::Bdt);
        assert_eq!((a + b).amount_cents, 1500);
    }

    #[test]
    fn test_money_subtraction() {
        let a = Money::new(1000, Currency::Bdt);
        let b = Money::new(300, Currency::Bdt);
        assert_eq!((a - b).amount_cents, 700);
    }

    #[test]
    fn test_money_multiply() {
        let m = Money::new(12000, Currency::Bdt);
        assert_eq!((m * 3).amount_cents, 36000);
    }

    #[test]
    fn test_try_multiply_overflow() {
        let m = Money::new(i64::MAX, Currency::Bdt);
        assert_eq!(m.try_multiply(2), None);
    }

    #[test]
    fn test_try_sum() {
        let values = vec![
            Money::new(1000, Currency::Bdt),
            Money::new(2000, Currency::Bdt),
        ];
        let total = Money::try_sum(values.iter(), Currency::Bdt).unwrap();
        assert_eq!(total.amount_cents, 3000);
    }

    #[test]
    fn test_try_sum_currency_mismatch() {
        let values = vec![
            Money::new(1000, Currency::Bdt),
            Money::new(2000, Currency::Usd),
        ];
        assert_eq!(Money::try_sum(values.iter(), Currency::Bdt), None);
    }

    #[test]
    #[should_panic(expected = "Currency mismatch")]
    fn test_money_currency_mismatch() {
        let bdt = Money::new(1000, Currency::Bdt);
        let usd = Money::new(1000, Currency::Usd);
        let _ = bdt + usd;
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("BDT"), Some(Currency::Bdt));
        assert_eq!(Currency::from_code("usd"), Some(Currency::Usd));
        assert_eq!(Currency::from_code("XYZ"), None);
    }
}
