//! Coin and money amount types.
//!
//! Coins are the in-app reward unit and are always whole. Money is fixed-point
//! with two decimal places (hundredths of the payout currency) to avoid
//! floating-point errors in cash-out arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Number of money hundredths in one major unit.
pub const MONEY_SCALE: u64 = 100;

/// A whole number of reward coins.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Coins(u64);

impl Coins {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Add for Coins {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Coins {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} coins", self.0)
    }
}

/// A money amount in hundredths of the payout currency.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Self = Self(0);

    /// Build from hundredths (`Money::from_hundredths(150)` is 1.50).
    pub fn from_hundredths(hundredths: u64) -> Self {
        Self(hundredths)
    }

    /// Build from a whole and fractional part (`Money::new(8, 50)` is 8.50).
    pub fn new(major: u64, minor: u64) -> Self {
        Self(major * MONEY_SCALE + minor % MONEY_SCALE)
    }

    pub fn hundredths(&self) -> u64 {
        self.0
    }

    pub fn major(&self) -> u64 {
        self.0 / MONEY_SCALE
    }

    pub fn minor(&self) -> u64 {
        self.0 % MONEY_SCALE
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.major(), self.minor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_formats_two_decimals() {
        assert_eq!(Money::new(8, 50).to_string(), "8.50");
        assert_eq!(Money::from_hundredths(150).to_string(), "1.50");
        assert_eq!(Money::from_hundredths(7).to_string(), "0.07");
    }

    #[test]
    fn coins_checked_arithmetic() {
        assert_eq!(Coins::new(u64::MAX).checked_add(Coins::new(1)), None);
        assert_eq!(Coins::new(3).checked_sub(Coins::new(5)), None);
        assert_eq!(Coins::new(3).saturating_sub(Coins::new(5)), Coins::ZERO);
    }

    #[test]
    fn coins_serialize_as_plain_number() {
        let json = serde_json::to_string(&Coins::new(250)).unwrap();
        assert_eq!(json, "250");
    }
}
