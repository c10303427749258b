use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// A non-negative amount in the minor currency unit.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    pub const fn amount(&self) -> u64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Applies a percentage discount and rounds to the nearest whole unit,
    /// halves away from zero.
    ///
    /// ```
    /// use rtw_domain::{Money, Percent};
    ///
    /// let price = Money::new(390);
    /// let discount = Percent::new(15).unwrap();
    /// assert_eq!(price.discounted(discount), Money::new(332));
    /// ```
    pub fn discounted(&self, discount: Percent) -> Self {
        let base = Decimal::from(self.0);
        let reduction = base * discount.as_decimal() / Decimal::ONE_HUNDRED;
        let rounded = (base - reduction)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        // The result lies in 0..=self, so the conversion cannot fail.
        Self(rounded.to_u64().unwrap_or_default())
    }
}

impl TryFrom<i64> for Money {
    type Error = rtw_error::Error;

    fn try_from(amount: i64) -> Result<Self, Self::Error> {
        u64::try_from(amount).map(Self).map_err(|_| {
            rtw_error::Error::InvalidArgument(format!("amount must not be negative, got {amount}"))
        })
    }
}

impl From<u64> for Money {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A whole-number percentage between 0 and 100.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Percent(u8);

impl Percent {
    pub const ZERO: Percent = Percent(0);
    pub const HUNDRED: Percent = Percent(100);

    pub fn new(value: u8) -> rtw_error::Result<Self> {
        if value > 100 {
            return Err(rtw_error::Error::InvalidArgument(format!(
                "percentage must be between 0 and 100, got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Builds a percentage from an arbitrary integer, saturating at the
    /// bounds of the valid range.
    pub fn saturating(value: i64) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    pub const fn value(&self) -> u8 {
        self.0
    }

    pub fn as_decimal(&self) -> Decimal {
        Decimal::from(self.0)
    }
}

impl TryFrom<u8> for Percent {
    type Error = rtw_error::Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percent> for u8 {
    fn from(percent: Percent) -> Self {
        percent.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
