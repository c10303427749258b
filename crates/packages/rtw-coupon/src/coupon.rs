use rtw_domain::{Money, Percent};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Envelope returned by the coupon lookup endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponResponse {
    #[serde(default)]
    pub results: Vec<CouponRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub discount: Option<i64>,
    #[serde(default)]
    pub available: Option<bool>,
}

/// A coupon lookup normalized into a validity flag and a percentage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedCoupon {
    pub valid: bool,
    pub discount: Percent,
    pub name: String,
}

impl ValidatedCoupon {
    pub fn invalid() -> Self {
        Self::default()
    }

    /// The discount to apply: an invalid coupon discounts nothing,
    /// whatever it stores.
    pub fn effective_discount(&self) -> Percent {
        if self.valid {
            self.discount
        } else {
            Percent::ZERO
        }
    }
}

/// Normalizes a coupon lookup. An absent envelope or an empty result list
/// is an invalid coupon.
pub fn to_validated_coupon(response: Option<&CouponResponse>) -> ValidatedCoupon {
    let Some(results) = response.map(|r| r.results.as_slice()) else {
        return ValidatedCoupon::invalid();
    };
    let Some(record) = results.first() else {
        return ValidatedCoupon::invalid();
    };
    if results.len() > 1 {
        debug!(
            "Coupon lookup returned {} records, using the first",
            results.len()
        );
    }

    let name = record.name.clone().unwrap_or_default();
    let raw_discount = record.discount.unwrap_or(0);
    let discount = Percent::saturating(raw_discount);
    if i64::from(discount.value()) != raw_discount {
        warn!(
            "Coupon '{}' carries out-of-range discount {}, clamped to {}",
            name, raw_discount, discount
        );
    }

    ValidatedCoupon {
        valid: record.available.unwrap_or(false),
        discount,
        name,
    }
}

/// The price after the coupon's discount, rounded to whole units.
pub fn coupon_price(base_price: Money, coupon: Option<&ValidatedCoupon>) -> Money {
    let discount = coupon.map_or(Percent::ZERO, ValidatedCoupon::effective_discount);
    base_price.discounted(discount)
}
