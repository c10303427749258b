use crate::{Money, PaymentSubject};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::Date;

const WITH_REWARD_SUFFIX: &str = "_with_reward";

/// Category a price tier is published for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierCategory {
    Basic,
    Company,
    School,
}

impl TierCategory {
    pub const ALL: [TierCategory; 3] = [
        TierCategory::Basic,
        TierCategory::Company,
        TierCategory::School,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            TierCategory::Basic => "basic",
            TierCategory::Company => "company",
            TierCategory::School => "school",
        }
    }

    /// The tier category whose price applies to a payment subject.
    pub const fn for_subject(subject: PaymentSubject) -> Self {
        match subject {
            PaymentSubject::Individual | PaymentSubject::Voucher => TierCategory::Basic,
            PaymentSubject::Company => TierCategory::Company,
            PaymentSubject::School => TierCategory::School,
        }
    }
}

impl fmt::Display for TierCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TierCategory {
    type Err = rtw_error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(TierCategory::Basic),
            "company" => Ok(TierCategory::Company),
            "school" => Ok(TierCategory::School),
            other => Err(rtw_error::Error::InvalidArgument(format!(
                "unknown tier category: {other}"
            ))),
        }
    }
}

/// Reward pricing is published as a parallel table; the family selects
/// which of the two tables a lookup reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierFamily {
    #[default]
    Plain,
    WithReward,
}

impl TierFamily {
    pub const ALL: [TierFamily; 2] = [TierFamily::Plain, TierFamily::WithReward];

    pub const fn from_reward(with_reward: bool) -> Self {
        if with_reward {
            TierFamily::WithReward
        } else {
            TierFamily::Plain
        }
    }

    pub const fn has_reward(&self) -> bool {
        matches!(self, TierFamily::WithReward)
    }
}

/// A category together with its family, as spelled by the tier API
/// (`basic`, `basic_with_reward`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TierKey {
    pub category: TierCategory,
    pub family: TierFamily,
}

impl TierKey {
    pub const fn new(category: TierCategory, family: TierFamily) -> Self {
        Self { category, family }
    }
}

impl fmt::Display for TierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.family {
            TierFamily::Plain => write!(f, "{}", self.category),
            TierFamily::WithReward => write!(f, "{}{WITH_REWARD_SUFFIX}", self.category),
        }
    }
}

impl FromStr for TierKey {
    type Err = rtw_error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_suffix(WITH_REWARD_SUFFIX) {
            Some(category) => Ok(Self::new(category.parse()?, TierFamily::WithReward)),
            None => Ok(Self::new(s.parse()?, TierFamily::Plain)),
        }
    }
}

/// A price bound to a category and the date it takes effect on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTier {
    pub category: TierCategory,
    pub family: TierFamily,
    pub price: Money,
    pub effective_from: Date,
}

impl PriceTier {
    pub fn new(
        category: TierCategory,
        family: TierFamily,
        price: Money,
        effective_from: Date,
    ) -> Self {
        Self {
            category,
            family,
            price,
            effective_from,
        }
    }

    /// Zero-price stand-in used when no published tier is in effect.
    pub fn placeholder(category: TierCategory, family: TierFamily) -> Self {
        Self::new(category, family, Money::ZERO, Date::MIN)
    }

    pub fn is_placeholder(&self) -> bool {
        self.price.is_zero() && self.effective_from == Date::MIN
    }

    pub fn key(&self) -> TierKey {
        TierKey::new(self.category, self.family)
    }
}
