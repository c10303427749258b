use crate::order::{GatewayOrder, ProductNames};
use rtw_config::Settings;
use rtw_coupon::{RewardClassifier, ValidatedCoupon, coupon_price};
use rtw_domain::{Money, PaymentSubject, TierCategory, TierFamily};
use rtw_error::{Error, Result};
use rtw_payment::PaymentRequest;
use rtw_pricing::{CampaignTimezone, TierTable, campaign_date};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use tracing::{debug, info};

/// A registration payment together with the choices that decide its price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    #[serde(flatten)]
    pub payment: PaymentRequest,
    /// Whether the registrant wants the reward add-on.
    #[serde(default)]
    pub with_reward: bool,
    #[serde(default)]
    pub voucher_code: Option<String>,
}

/// Prices that apply to one registration on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub as_of: Date,
    pub family: TierFamily,
    pub category: TierCategory,
    pub base_price: Money,
    pub coupon_price: Money,
}

impl Quote {
    /// The least a payer of `subject` may pay.
    pub fn minimum_for(&self, subject: PaymentSubject) -> Money {
        match subject {
            PaymentSubject::Individual => self.base_price,
            PaymentSubject::Voucher => self.coupon_price,
            PaymentSubject::Company | PaymentSubject::School => Money::ZERO,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CheckoutService {
    classifier: RewardClassifier,
    timezone: CampaignTimezone,
    products: ProductNames,
}

impl CheckoutService {
    pub fn new(
        classifier: RewardClassifier,
        timezone: CampaignTimezone,
        products: ProductNames,
    ) -> Self {
        Self {
            classifier,
            timezone,
            products,
        }
    }

    /// Fails only on a campaign timezone that is neither
    /// `central_european` nor a valid whole-hour offset.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let timezone: CampaignTimezone = settings
            .campaign
            .timezone
            .parse()
            .map_err(|e| Error::Config(format!("campaign.timezone: {e}")))?;
        Ok(Self::new(
            RewardClassifier::new(settings.vouchers.without_reward_pattern.as_deref()),
            timezone,
            ProductNames::from(&settings.checkout),
        ))
    }

    pub fn classifier(&self) -> &RewardClassifier {
        &self.classifier
    }

    /// Resolves the prices that apply at `now` for the given choices.
    pub fn quote(
        &self,
        tiers: &TierTable,
        coupon: Option<&ValidatedCoupon>,
        category: TierCategory,
        voucher_code: Option<&str>,
        with_reward: bool,
        now: OffsetDateTime,
    ) -> Quote {
        let as_of = campaign_date(now, self.timezone);
        let family = self.classifier.family_for(voucher_code, with_reward);
        let base_price = tiers.resolve(family, as_of).price(category);
        let quote = Quote {
            as_of,
            family,
            category,
            base_price,
            coupon_price: coupon_price(base_price, coupon),
        };
        debug!("Quoted {:?}", quote);
        quote
    }

    /// Reconciles the request against the current prices and builds the
    /// gateway order. A voucher code sent with any other subject is ignored. Rejections become [`Error::Validation`] on the field
    /// the message belongs to.
    pub fn prepare_order(
        &self,
        tiers: &TierTable,
        coupon: Option<&ValidatedCoupon>,
        request: &CheckoutRequest,
        now: OffsetDateTime,
    ) -> Result<GatewayOrder> {
        let subject = request.payment.subject();
        let category = subject.map_or(TierCategory::Basic, TierCategory::for_subject);
        // A voucher code only decides the reward family of voucher payments.
        let voucher_code = request
            .voucher_code
            .as_deref()
            .filter(|_| subject == Some(PaymentSubject::Voucher));
        let quote = self.quote(
            tiers,
            coupon,
            category,
            voucher_code,
            request.with_reward,
            now,
        );

        let decision = request
            .payment
            .reconcile(coupon, quote.base_price, quote.coupon_price)
            .map_err(|rejection| {
                debug!("Checkout rejected: {}", rejection);
                Error::validation(rejection.field(), rejection.to_string())
            })?;

        let order = GatewayOrder::from_decision(&decision, &self.products);
        info!(
            "Prepared {} order of {} ({:?})",
            order.payment_subject, order.amount, order.payment_category
        );
        Ok(order)
    }
}
