//! # Money
//!
//! Fixed-point monetary amounts with two decimal places.
//!
//! Prices are captured at product-creation time and rounded half away from zero to
//! two places, the same rounding a till display applies (`9.999` becomes `10.00`).
//! Every later accumulation (product revenue, cart total, total revenue) is exact
//! decimal addition, so repeated sales never drift the way binary floats do.
//!
//! On the wire an amount is a JSON number inside the `cards` document and a plain
//! decimal string under the aggregate keys. Loading is lenient: a price may also
//! arrive as a string, which is how older data stored it.
//!
//! A JSON number is read back through `f64`, which holds fifteen significant
//! digits exactly. Amounts are therefore capped at [`Money::MAX`]
//! (`9999999999999.99`) and addition is checked against that cap instead of
//! panicking or wrapping.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of decimal places every amount is held at.
pub const SCALE: u32 = 2;

/// Errors produced when turning user or stored input into a [`Money`] value.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MoneyError {
    #[error("Not a valid amount: {0:?}")]
    Invalid(String),

    #[error("Amount is not finite: {0}")]
    NotFinite(f64),

    #[error("Amount exceeds the limit of {max}: {0}", max = Money::MAX)]
    OutOfRange(String),
}

/// A two-decimal fixed-point amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Largest amount the till holds: 15 significant digits at scale 2.
    pub const MAX: Money = Money(Decimal::from_parts(0xA4C6_7FFF, 0x0003_8D7E, 0, false, SCALE));

    /// Rounds `value` to two places, half away from zero.
    pub fn from_decimal(value: Decimal) -> Self {
        let mut rounded = value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(SCALE);
        Self(rounded)
    }

    /// Parses a decimal literal such as `"9.99"` or `" 12 "`.
    pub fn parse(input: &str) -> Result<Self, MoneyError> {
        let trimmed = input.trim();
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(Self::from_decimal)
            .map_err(|_| MoneyError::Invalid(input.to_string()))
    }

    pub fn from_f64(value: f64) -> Result<Self, MoneyError> {
        if !value.is_finite() {
            return Err(MoneyError::NotFinite(value));
        }
        // Go through the shortest round-trip text so 9.99 stays 9.99 and not 9.9899999...
        Self::parse(&value.to_string())
    }

    /// Whole-unit constructor, mostly for tests and fixtures.
    pub fn from_units(units: i64) -> Self {
        Self::from_decimal(Decimal::from(units))
    }

    /// Constructs from minor units (pence, cents): `from_minor(999)` is `9.99`.
    pub fn from_minor(minor: i64) -> Self {
        Self::from_decimal(Decimal::new(minor, SCALE))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Whether the amount lies within `-MAX..=MAX`.
    pub fn is_within_limit(&self) -> bool {
        self.0.abs() <= Self::MAX.0
    }

    /// Adds two amounts, failing instead of going past [`Money::MAX`].
    pub fn checked_add(self, rhs: Money) -> Result<Money, MoneyError> {
        let sum = self
            .0
            .checked_add(rhs.0)
            .map(Self::from_decimal)
            .filter(Money::is_within_limit);
        sum.ok_or_else(|| MoneyError::OutOfRange(format!("{} + {}", self, rhs)))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut value = self.0;
        value.rescale(SCALE);
        write!(f, "{}", value)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Parsing the decimal text gives the nearest f64; converting the parts does not.
        let value = self.to_string().parse::<f64>().map_err(serde::ser::Error::custom)?;
        serializer.serialize_f64(value)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount as a number or a string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        Ok(Money::from_units(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        Ok(Money::from_decimal(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Money::from_f64(v).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        Money::parse(v).map_err(E::custom)
    }
}
