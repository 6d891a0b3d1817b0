//! Account balance tracking during a projection

use serde::{Deserialize, Serialize};

use crate::money::round_cents;
use crate::rates::AccountSplit;

/// Running balances of the three accounts
///
/// Owned by a single projection call. No floor is enforced: a withdrawal
/// larger than the balance leaves the account negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AccountBalances {
    /// Ordinary account
    pub oa: f64,

    /// Special account
    pub sa: f64,

    /// Medical account
    pub ma: f64,
}

impl AccountBalances {
    pub fn new(oa: f64, sa: f64, ma: f64) -> Self {
        Self { oa, sa, ma }
    }

    /// Add a per-account amount (allocation, cash-flow delta or interest)
    pub fn add(&mut self, amounts: &AccountSplit) {
        self.oa += amounts.oa;
        self.sa += amounts.sa;
        self.ma += amounts.ma;
    }

    /// Balances rounded to cents, as carried from one year into the next
    pub fn rounded_to_cents(&self) -> Self {
        Self {
            oa: round_cents(self.oa),
            sa: round_cents(self.sa),
            ma: round_cents(self.ma),
        }
    }

    pub fn total(&self) -> f64 {
        self.oa + self.sa + self.ma
    }

    pub fn any_negative(&self) -> bool {
        self.oa < 0.0 || self.sa < 0.0 || self.ma < 0.0
    }
}
