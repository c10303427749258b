use rtw_config::Checkout;
use rtw_domain::{Money, PaymentCategory, PaymentSubject};
use rtw_payment::PaymentDecision;
use serde::{Deserialize, Serialize};

/// Names of the line items on a gateway order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductNames {
    pub entry_fee: String,
    pub donation: String,
}

impl From<&Checkout> for ProductNames {
    fn from(checkout: &Checkout) -> Self {
        Self {
            entry_fee: checkout.entry_fee_product.clone(),
            donation: checkout.donation_product.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderProduct {
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
}

impl OrderProduct {
    fn single(name: &str, unit_price: Money) -> Self {
        Self {
            name: name.to_string(),
            unit_price,
            quantity: 1,
        }
    }
}

/// Order payload handed to the payment gateway adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub amount: Money,
    pub payment_subject: PaymentSubject,
    pub payment_category: PaymentCategory,
    pub products: Vec<OrderProduct>,
}

impl GatewayOrder {
    /// One product per non-zero part of the payment.
    pub fn from_decision(decision: &PaymentDecision, names: &ProductNames) -> Self {
        let mut products = Vec::with_capacity(2);
        if !decision.entry_fee().is_zero() {
            products.push(OrderProduct::single(&names.entry_fee, decision.entry_fee()));
        }
        if !decision.donation().is_zero() {
            products.push(OrderProduct::single(&names.donation, decision.donation()));
        }

        Self {
            amount: decision.total(),
            payment_subject: decision.subject(),
            payment_category: decision.category(),
            products,
        }
    }

    pub fn to_json(&self) -> rtw_error::Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| rtw_error::Error::Internal(e.to_string()))
    }
}
