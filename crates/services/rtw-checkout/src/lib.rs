#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Registration checkout.
//!
//! Turns a submitted registration payment into the order payload for the
//! payment gateway: the tier family is chosen from the reward toggle and the
//! voucher, the price in effect on the campaign date is resolved, the
//! coupon is applied and the requested amount is reconciled against it.

mod order;
mod service;

pub use order::{GatewayOrder, OrderProduct, ProductNames};
pub use service::{CheckoutRequest, CheckoutService, Quote};
