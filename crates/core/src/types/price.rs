//! Type-safe price representation using decimal arithmetic.
//!
//! The storefront runs in a single currency, chosen once at configuration
//! time. Prices still carry their [`CurrencyCode`] so that display and
//! arithmetic never have to guess it.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Quantity;

/// Errors that can occur when constructing a [`Price`] or [`CurrencyCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
    /// The currency code is not one we sell in.
    #[error("unsupported currency code: {0}")]
    UnknownCurrency(String),
}

/// A non-negative price with currency information.
///
/// Deserialization goes through [`Price::new`], so a negative amount is
/// rejected there too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPrice")]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    amount: Decimal,
    /// ISO 4217 currency code.
    currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal, currency_code: CurrencyCode) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self {
            amount,
            currency_code,
        })
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency_code,
        }
    }

    /// Create a price from an amount in the smallest currency unit.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `cents` is below zero.
    pub fn from_cents(cents: i64, currency_code: CurrencyCode) -> Result<Self, PriceError> {
        Self::new(Decimal::new(cents, 2), currency_code)
    }

    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }

    /// This price multiplied by a quantity (a line total), or `None` if the
    /// result does not fit in a `Decimal`.
    #[must_use]
    pub fn checked_times(&self, quantity: Quantity) -> Option<Self> {
        let amount = self.amount.checked_mul(Decimal::from(quantity.get()))?;
        Some(Self {
            amount,
            currency_code: self.currency_code,
        })
    }

    /// Sum of two prices, or `None` on overflow. The result keeps `self`'s
    /// currency.
    #[must_use]
    pub fn checked_plus(&self, other: &Self) -> Option<Self> {
        let amount = self.amount.checked_add(other.amount)?;
        Some(Self {
            amount,
            currency_code: self.currency_code,
        })
    }

    /// Like [`Price::checked_times`], clamping to `Decimal::MAX`.
    #[must_use]
    pub fn saturating_times(&self, quantity: Quantity) -> Self {
        Self {
            amount: self.amount.saturating_mul(Decimal::from(quantity.get())),
            currency_code: self.currency_code,
        }
    }

    /// Like [`Price::checked_plus`], clamping to `Decimal::MAX`.
    #[must_use]
    pub fn saturating_plus(&self, other: &Self) -> Self {
        Self {
            amount: self.amount.saturating_add(other.amount),
            currency_code: self.currency_code,
        }
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{}{:.2}",
            self.currency_code.symbol(),
            self.amount.round_dp(2)
        )
    }
}

/// Unvalidated wire form of [`Price`].
#[derive(Deserialize)]
struct RawPrice {
    amount: Decimal,
    currency_code: CurrencyCode,
}

impl TryFrom<RawPrice> for Price {
    type Error = PriceError;

    fn try_from(raw: RawPrice) -> Result<Self, Self::Error> {
        Self::new(raw.amount, raw.currency_code)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

impl FromStr for CurrencyCode {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(PriceError::UnknownCurrency(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_negative_price_rejected() {
        let err = Price::new(Decimal::new(-1, 2), CurrencyCode::USD).unwrap_err();
        assert_eq!(err, PriceError::Negative(Decimal::new(-1, 2)));
    }

    #[test]
    fn test_zero_and_negative_zero_accepted() {
        assert!(Price::new(Decimal::ZERO, CurrencyCode::USD).is_ok());
        assert!(Price::new(-Decimal::ZERO, CurrencyCode::USD).is_ok());
    }

    #[test]
    fn test_times_multiplies_by_quantity() {
        let price = Price::from_cents(1050, CurrencyCode::USD).unwrap();
        let total = price.checked_times(Quantity::new(3).unwrap()).unwrap();
        assert_eq!(total.amount(), Decimal::new(3150, 2));
        assert_eq!(price.saturating_times(Quantity::new(3).unwrap()), total);
    }

    #[test]
    fn test_arithmetic_at_decimal_bounds() {
        let max = Price::new(Decimal::MAX, CurrencyCode::USD).unwrap();
        let two = Quantity::new(2).unwrap();

        assert!(max.checked_times(two).is_none());
        assert!(max.checked_plus(&max).is_none());
        assert_eq!(max.saturating_times(two).amount(), Decimal::MAX);
        assert_eq!(max.saturating_plus(&max).amount(), Decimal::MAX);
        assert_eq!(max.checked_times(Quantity::ONE), Some(max));

        let cent = Price::from_cents(1, CurrencyCode::USD).unwrap();
        let most = cent.checked_times(Quantity::new(u32::MAX).unwrap()).unwrap();
        assert_eq!(most.amount(), Decimal::new(i64::from(u32::MAX), 2));
    }

    #[test]
    fn test_deserialize_validates_amount() {
        let price: Price =
            serde_json::from_str(r#"{"amount":"2.50","currency_code":"EUR"}"#).unwrap();
        assert_eq!(price.amount(), Decimal::new(250, 2));
        assert_eq!(price.currency_code(), CurrencyCode::EUR);

        let err = serde_json::from_str::<Price>(r#"{"amount":"-1.00","currency_code":"USD"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn test_display_formats_two_places() {
        let price = Price::new(Decimal::new(5, 0), CurrencyCode::USD).unwrap();
        assert_eq!(price.display(), "$5.00");

        let price = Price::from_cents(1999, CurrencyCode::GBP).unwrap();
        assert_eq!(price.to_string(), "£19.99");
    }

    #[test]
    fn test_currency_code_parse() {
        assert_eq!("usd".parse::<CurrencyCode>().unwrap(), CurrencyCode::USD);
        assert_eq!(" EUR ".parse::<CurrencyCode>().unwrap(), CurrencyCode::EUR);
        assert!(matches!(
            "JPY".parse::<CurrencyCode>(),
            Err(PriceError::UnknownCurrency(_))
        ));
    }
}
