#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Shared domain types for campaign pricing: money, percentages, price tiers
//! and payment subjects.

mod money;
mod payment;
mod tier;

pub use money::{Money, Percent};
pub use payment::{PaymentCategory, PaymentSubject};
pub use tier::{PriceTier, TierCategory, TierFamily, TierKey};
