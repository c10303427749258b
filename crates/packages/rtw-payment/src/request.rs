use crate::{PaymentDecision, Rejection, try_reconcile};
use rtw_coupon::ValidatedCoupon;
use rtw_domain::{Money, PaymentSubject};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A payment as submitted by the registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    #[serde(default)]
    pub payment_subject: Option<String>,
    pub amount: i64,
}

impl PaymentRequest {
    /// The payment subject, or `None` if it is missing or not one we know.
    pub fn subject(&self) -> Option<PaymentSubject> {
        let raw = self.payment_subject.as_deref()?;
        match raw.parse() {
            Ok(subject) => Some(subject),
            Err(e) => {
                debug!("Ignoring payment subject: {}", e);
                None
            }
        }
    }

    pub fn requested_total(&self) -> Result<Money, Rejection> {
        Money::try_from(self.amount).map_err(|_| Rejection::NegativeAmount(self.amount))
    }

    pub fn reconcile(
        &self,
        coupon: Option<&ValidatedCoupon>,
        base_price: Money,
        coupon_price: Money,
    ) -> Result<PaymentDecision, Rejection> {
        let requested_total = self.requested_total()?;
        try_reconcile(
            self.subject(),
            requested_total,
            coupon,
            base_price,
            coupon_price,
        )
    }
}
