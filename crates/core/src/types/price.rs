//! Monetary amounts using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A monetary amount in the club's billing currency.
///
/// Wraps [`Decimal`] so that menu prices and order totals never go through
/// floating point. The currency itself is a club-wide setting, not carried
/// per value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// The amount in whole currency units, truncated toward zero.
    ///
    /// Used for loyalty accrual (one point per whole unit spent).
    #[must_use]
    pub fn whole_units(&self) -> i64 {
        self.0.trunc().to_i64().unwrap_or(0)
    }

    /// Multiply by an item quantity.
    #[must_use]
    pub fn times(&self, quantity: i32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl std::ops::Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, std::ops::Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(amount))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn price(mantissa: i64, scale: u32) -> Price {
        Price::new(Decimal::new(mantissa, scale))
    }

    #[test]
    fn test_whole_units_truncates() {
        assert_eq!(price(1875, 2).whole_units(), 18);
        assert_eq!(price(99, 2).whole_units(), 0);
        assert_eq!(price(42, 0).whole_units(), 42);
    }

    #[test]
    fn test_times_and_sum() {
        let line = price(450, 2).times(3);
        assert_eq!(line.amount(), Decimal::new(1350, 2));

        let total: Price = [price(1350, 2), price(625, 2)].into_iter().sum();
        assert_eq!(total.amount(), Decimal::new(1975, 2));
    }

    #[test]
    fn test_is_negative() {
        assert!(price(-1, 0).is_negative());
        assert!(!Price::ZERO.is_negative());
        assert!(!price(1, 2).is_negative());
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(price(5, 0).to_string(), "5.00");
        assert_eq!(price(199, 1).to_string(), "19.90");
    }
}
