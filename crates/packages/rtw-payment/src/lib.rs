#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Reconciliation of a requested payment amount against the current price.
//!
//! A payment is split into an entry fee, which covers the registration
//! itself, and a donation, which is whatever the payer adds on top. Sponsor
//! payers (companies and schools) only ever donate.

mod request;

use rtw_coupon::ValidatedCoupon;
use rtw_domain::{Money, PaymentCategory, PaymentSubject};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub use request::PaymentRequest;

/// Why a requested payment cannot be accepted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("payment subject is missing or unknown")]
    MissingSubject,
    #[error("amount must not be negative, got {0}")]
    NegativeAmount(i64),
    #[error("amount {requested} is below the minimum of {minimum}")]
    BelowMinimum { requested: Money, minimum: Money },
    #[error("amount must be greater than zero")]
    ZeroAmount,
}

impl Rejection {
    /// The request field a validation message belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Rejection::MissingSubject => "payment_subject",
            Rejection::NegativeAmount(_) | Rejection::BelowMinimum { .. } | Rejection::ZeroAmount => {
                "amount"
            }
        }
    }
}

/// An accepted payment split into its entry fee and donation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentDecision {
    subject: PaymentSubject,
    entry_fee: Money,
    donation: Money,
    category: PaymentCategory,
}

impl PaymentDecision {
    pub fn subject(&self) -> PaymentSubject {
        self.subject
    }

    pub fn entry_fee(&self) -> Money {
        self.entry_fee
    }

    pub fn donation(&self) -> Money {
        self.donation
    }

    pub fn category(&self) -> PaymentCategory {
        self.category
    }

    /// Always equal to the requested total.
    pub fn total(&self) -> Money {
        self.entry_fee + self.donation
    }
}

/// Validates `requested_total` for `subject` and splits it.
///
/// Individuals pay at least `base_price` and voucher holders at least
/// `coupon_price`, the price left after the coupon's discount. Anything
/// above the minimum is a donation. Companies and
/// schools donate the whole amount. A payment that would carry neither an
/// entry fee nor a donation is rejected.
pub fn try_reconcile(
    subject: Option<PaymentSubject>,
    requested_total: Money,
    coupon: Option<&ValidatedCoupon>,
    base_price: Money,
    coupon_price: Money,
) -> Result<PaymentDecision, Rejection> {
    let subject = subject.ok_or(Rejection::MissingSubject)?;
    let (entry_fee, donation) = match subject {
        PaymentSubject::Individual => split_at_minimum(requested_total, base_price)?,
        PaymentSubject::Voucher => {
            debug!(
                "Voucher payment against coupon price {} (coupon {:?})",
                coupon_price,
                coupon.filter(|c| c.valid).map(|c| c.name.as_str())
            );
            split_at_minimum(requested_total, coupon_price)?
        }
        PaymentSubject::Company | PaymentSubject::School => (Money::ZERO, requested_total),
    };
    let category =
        PaymentCategory::from_split(entry_fee, donation).ok_or(Rejection::ZeroAmount)?;

    Ok(PaymentDecision {
        subject,
        entry_fee,
        donation,
        category,
    })
}

/// Like [`try_reconcile`], discarding the rejection reason.
pub fn reconcile(
    subject: Option<PaymentSubject>,
    requested_total: Money,
    coupon: Option<&ValidatedCoupon>,
    base_price: Money,
    coupon_price: Money,
) -> Option<PaymentDecision> {
    match try_reconcile(subject, requested_total, coupon, base_price, coupon_price) {
        Ok(decision) => Some(decision),
        Err(rejection) => {
            debug!(
                "Rejected payment of {} for {:?}: {}",
                requested_total, subject, rejection
            );
            None
        }
    }
}

fn split_at_minimum(total: Money, minimum: Money) -> Result<(Money, Money), Rejection> {
    let donation = total
        .checked_sub(minimum)
        .ok_or(Rejection::BelowMinimum {
            requested: total,
            minimum,
        })?;
    Ok((minimum, donation))
}
