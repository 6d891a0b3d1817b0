//! Rounding rules for currency amounts
//!
//! Amounts are carried as `f64` through the projection. Cent-level rounding and
//! truncation go through `Decimal`, built from the shortest decimal
//! representation of the float, so 1.15 stays 1.15 rather than 1.14999...

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

const CENTS: u32 = 2;

fn to_decimal(amount: f64) -> Option<Decimal> {
    Decimal::from_str(&amount.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(amount))
}

/// Round to the nearest dollar; 50 cents rounds up
pub fn round_half_up(amount: f64) -> f64 {
    (amount + 0.5).floor()
}

/// Round to cents, half away from zero
pub fn round_cents(amount: f64) -> f64 {
    to_decimal(amount)
        .map(|d| d.round_dp_with_strategy(CENTS, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(amount)
}

/// Drop everything past the second decimal place
pub fn truncate_cents(amount: f64) -> f64 {
    to_decimal(amount)
        .map(|d| d.round_dp_with_strategy(CENTS, RoundingStrategy::ToZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(amount)
}

/// Format as a decimal string with two places
pub fn format_cents(amount: f64) -> String {
    let rounded = match to_decimal(amount) {
        Some(d) => d.round_dp_with_strategy(CENTS, RoundingStrategy::MidpointAwayFromZero),
        None => return format!("{:.2}", amount),
    };
    // avoid "-0.00"
    if rounded.is_zero() {
        return "0.00".to_string();
    }
    format!("{:.2}", rounded)
}
