#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Time-varying price tiers for the campaign.
//!
//! Prices are published as a flat list of tiers, each taking effect on a
//! given date. This crate ingests that list, works out the campaign-local
//! date for an instant and resolves which tier is in effect per category.

mod clock;
mod resolver;
mod table;

pub use clock::{CampaignTimezone, campaign_date};
pub use resolver::{CurrentPrices, ResolvedPriceSet, resolve_current_tiers};
pub use table::{TierRecord, TierTable};
