use crate::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who is paying and under which rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentSubject {
    Individual,
    Voucher,
    Company,
    School,
}

impl PaymentSubject {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentSubject::Individual => "individual",
            PaymentSubject::Voucher => "voucher",
            PaymentSubject::Company => "company",
            PaymentSubject::School => "school",
        }
    }

    /// Sponsor-type payers contribute a donation only.
    pub const fn is_sponsor(&self) -> bool {
        matches!(self, PaymentSubject::Company | PaymentSubject::School)
    }
}

impl fmt::Display for PaymentSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentSubject {
    type Err = rtw_error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(PaymentSubject::Individual),
            "voucher" => Ok(PaymentSubject::Voucher),
            "company" => Ok(PaymentSubject::Company),
            "school" => Ok(PaymentSubject::School),
            other => Err(rtw_error::Error::InvalidArgument(format!(
                "unknown payment subject: {other}"
            ))),
        }
    }
}

/// What a payment pays for, derived from its split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentCategory {
    EntryFee,
    Donation,
    EntryFeeAndDonation,
}

impl PaymentCategory {
    /// Returns `None` when both parts are zero.
    pub const fn from_split(entry_fee: Money, donation: Money) -> Option<Self> {
        match (entry_fee.is_zero(), donation.is_zero()) {
            (false, false) => Some(PaymentCategory::EntryFeeAndDonation),
            (false, true) => Some(PaymentCategory::EntryFee),
            (true, false) => Some(PaymentCategory::Donation),
            (true, true) => None,
        }
    }
}
