//! Fixed-point money amounts.
//!
//! Balances and transaction amounts are `rust_decimal::Decimal` values held at
//! a fixed scale of two fractional digits. Inputs with more precision are
//! rejected rather than rounded, so every stored value is exact.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DomainError, DomainResult};

/// Signed monetary amount with exactly two fractional digits.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    /// Number of fractional digits every amount is stored with.
    pub const SCALE: u32 = 2;

    pub fn zero() -> Self {
        Self(Decimal::new(0, Self::SCALE))
    }

    /// Build from an integer count of minor units (`550000` → `5500.00`).
    pub fn from_minor_units(minor: i64) -> Self {
        Self(Decimal::new(minor, Self::SCALE))
    }

    /// Wrap a decimal, rejecting values that need more than two fractional
    /// digits.
    pub fn new(value: Decimal) -> DomainResult<Self> {
        let normalized = value.normalize();
        if normalized.scale() > Self::SCALE {
            return Err(DomainError::validation(format!(
                "amount {value} has more than {} fractional digits",
                Self::SCALE
            )));
        }

        // Collapse -0 so it never renders as "-0.00".
        let mut fixed = if normalized.is_zero() { Decimal::ZERO } else { normalized };
        // `rescale` silently settles for a smaller scale when the integer part
        // leaves no room for two fractional digits.
        fixed.rescale(Self::SCALE);
        if fixed.scale() != Self::SCALE {
            return Err(DomainError::overflow(format!("amount {value} is out of range")));
        }
        Ok(Self(fixed))
    }

    /// Parse a numeric string (`"5000"`, `"12.5"`, `" 7.25 "`, `"1e3"`).
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("amount is empty"));
        }

        // `Decimal::from_str` rounds past 28 fractional digits, so precision is
        // checked on the text before any conversion.
        if fractional_digits(trimmed)? > i64::from(Self::SCALE) {
            return Err(DomainError::validation(format!(
                "amount {trimmed} has more than {} fractional digits",
                Self::SCALE
            )));
        }

        let value = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| DomainError::validation(format!("'{trimmed}' is not a number")))?;
        Self::new(value)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Same magnitude, opposite sign.
    pub fn negated(self) -> Money {
        if self.is_zero() { self } else { Self(-self.0) }
    }

    pub fn checked_add(self, rhs: Money) -> DomainResult<Money> {
        self.0
            .checked_add(rhs.0)
            .ok_or_else(|| DomainError::overflow(format!("{self} + {rhs}")))
            .and_then(Money::new)
    }

    pub fn checked_sub(self, rhs: Money) -> DomainResult<Money> {
        self.0
            .checked_sub(rhs.0)
            .ok_or_else(|| DomainError::overflow(format!("{self} - {rhs}")))
            .and_then(Money::new)
    }
}

/// Significant fractional digits of a plain or scientific decimal literal
/// (`"7.250"` → 2, `"1.5e-3"` → 4, `"1000e-4"` → 1).
fn fractional_digits(text: &str) -> DomainResult<i64> {
    let not_a_number = || DomainError::validation(format!("'{text}' is not a number"));

    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((m, e)) => (m, e.parse::<i64>().map_err(|_| not_a_number())?),
        None => (unsigned, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let digits = || int_part.bytes().chain(frac_part.bytes());
    if (int_part.is_empty() && frac_part.is_empty()) || !digits().all(|b| b.is_ascii_digit()) {
        return Err(not_a_number());
    }

    let trailing_zeros = digits().rev().take_while(|b| *b == b'0').count();
    let significant = digits().count() - trailing_zeros;
    if significant == 0 {
        return Ok(0);
    }

    let frac_len = i64::try_from(frac_part.len()).map_err(|_| not_a_number())?;
    let trailing = i64::try_from(trailing_zeros).map_err(|_| not_a_number())?;
    Ok(frac_len.saturating_sub(exponent).saturating_sub(trailing))
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

/// Serialized as a decimal string (`"5300.00"`) so no JSON consumer ever
/// round-trips it through a float.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

/// Accepts JSON numbers as well as numeric strings.
impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        Money::parse(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        Money::new(Decimal::from(v)).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        Money::new(Decimal::from(v)).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        if !v.is_finite() {
            return Err(E::custom("amount must be finite"));
        }
        // Shortest round-trip rendering: 0.1 stays "0.1", not 0.1000000000000000055...
        Money::parse(&v.to_string()).map_err(E::custom)
    }
}
