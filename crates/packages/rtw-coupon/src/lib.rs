#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Discount coupons and voucher reward eligibility.

mod coupon;
mod reward;

pub use coupon::{CouponRecord, CouponResponse, ValidatedCoupon, coupon_price, to_validated_coupon};
pub use reward::{RewardClassifier, is_voucher_with_reward, is_voucher_without_reward};
