//! Value Objects for the cart

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;

/// Product identifier, unique within a cart
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    pub const fn new(value: i64) -> Self { Self(value) }
    pub const fn value(&self) -> i64 { self.0 }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self { Self(value) }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// Money value object, in whole currency units.
///
/// The storefront trades in a single currency, so amounts are plain integers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn new(amount: i64) -> Self { Self(amount) }
    pub const fn amount(&self) -> i64 { self.0 }
    pub const fn add(&self, other: Money) -> Money { Money(self.0.saturating_add(other.0)) }
    pub const fn multiply(&self, qty: i64) -> Money { Money(self.0.saturating_mul(qty)) }
    pub const fn saturating_sub(&self, other: Money) -> Money { Money(self.0.saturating_sub(other.0)) }
}

impl From<i64> for Money {
    fn from(amount: i64) -> Self { Self(amount) }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self { iter.fold(Money::ZERO, |acc, m| acc.add(m)) }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn test_money_arithmetic() {
        let price = Money::new(900);
        assert_eq!(price.multiply(2), Money::new(1800));
        assert_eq!(Money::new(1000).saturating_sub(price), Money::new(100));
        assert_eq!(vec![Money::new(1), Money::new(2)].into_iter().sum::<Money>(), Money::new(3));
    }
    #[test]
    fn test_ids_serialize_as_numbers() {
        assert_eq!(serde_json::to_string(&ProductId::new(7)).unwrap(), "7");
        assert_eq!(serde_json::from_str::<Money>("1500").unwrap(), Money::new(1500));
    }
}
