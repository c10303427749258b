use crate::resolver::{CurrentPrices, ResolvedPriceSet, resolve_current_tiers};
use rtw_domain::{Money, PriceTier, TierFamily, TierKey};
use rtw_error::Error;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing::warn;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// A price tier as published by the campaign API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRecord {
    pub category: String,
    /// Whole units; the API sometimes sends them as `990.0`.
    pub price: Number,
    /// ISO date; a trailing time of day is ignored.
    pub takes_effect_on: String,
}

impl TryFrom<TierRecord> for PriceTier {
    type Error = Error;

    fn try_from(record: TierRecord) -> Result<Self, Self::Error> {
        let key: TierKey = record.category.parse()?;
        let price = whole_amount(&record.price)?;
        let day = record
            .takes_effect_on
            .split_once('T')
            .map_or(record.takes_effect_on.as_str(), |(day, _)| day);
        let effective_from = Date::parse(day, DATE_FORMAT).map_err(|e| {
            Error::InvalidArgument(format!(
                "invalid takes_effect_on '{}': {e}",
                record.takes_effect_on
            ))
        })?;
        Ok(PriceTier::new(key.category, key.family, price, effective_from))
    }
}

fn whole_amount(price: &Number) -> Result<Money, Error> {
    if let Some(amount) = price.as_i64() {
        return Money::try_from(amount);
    }
    if let Some(amount) = price.as_u64() {
        return Ok(Money::new(amount));
    }
    match price.as_f64() {
        Some(amount) if amount.fract() == 0.0 && (0.0..=u64::MAX as f64).contains(&amount) => {
            Ok(Money::new(amount as u64))
        }
        _ => Err(Error::InvalidArgument(format!(
            "price must be a non-negative whole amount, got {price}"
        ))),
    }
}

/// Read-only snapshot of every published price tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierTable {
    tiers: Vec<PriceTier>,
}

impl TierTable {
    pub fn new(tiers: Vec<PriceTier>) -> Self {
        Self { tiers }
    }

    /// Builds a table from API records. Records that do not describe a
    /// known tier are logged and left out.
    pub fn from_records(records: impl IntoIterator<Item = TierRecord>) -> Self {
        let tiers = records
            .into_iter()
            .filter_map(|record| {
                let category = record.category.clone();
                match PriceTier::try_from(record) {
                    Ok(tier) => Some(tier),
                    Err(e) => {
                        warn!("Skipping price tier '{}': {}", category, e);
                        None
                    }
                }
            })
            .collect();
        Self { tiers }
    }

    /// Parses the flat JSON list returned by the tier API. Only a document
    /// that is not a list is an error; entries with missing or mistyped
    /// fields are logged and left out like any other invalid record.
    pub fn from_json(source: &str) -> rtw_error::Result<Self> {
        let entries: Vec<Value> = serde_json::from_str(source)
            .map_err(|e| Error::InvalidArgument(format!("malformed tier table: {e}")))?;
        let records = entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<TierRecord>(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping malformed price tier entry: {}", e);
                    None
                }
            });
        Ok(Self::from_records(records))
    }

    pub fn tiers(&self) -> &[PriceTier] {
        &self.tiers
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn resolve(&self, family: TierFamily, as_of: Date) -> ResolvedPriceSet {
        resolve_current_tiers(&self.tiers, family, as_of)
    }

    pub fn current_prices(&self, as_of: Date) -> CurrentPrices {
        CurrentPrices::resolve(&self.tiers, as_of)
    }
}

impl From<Vec<PriceTier>> for TierTable {
    fn from(tiers: Vec<PriceTier>) -> Self {
        Self::new(tiers)
    }
}
