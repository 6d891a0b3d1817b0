//! Monthly interest with the extra-interest waterfall
//!
//! Extra interest is earned on the first $60k of combined balances, of which at
//! most $20k may come from the OA. The allowance is consumed in the fixed order
//! OA, then SA, then MA. Extra interest earned on the OA is credited to the SA.

use crate::rates::{AccountSplit, InterestRates};
use super::state::AccountBalances;

#[derive(Debug, Clone, Copy)]
pub struct InterestEngine<'a> {
    rates: &'a InterestRates,
}

impl<'a> InterestEngine<'a> {
    pub fn new(rates: &'a InterestRates) -> Self {
        Self { rates }
    }

    /// Interest earned by each account over one month
    pub fn monthly_interest(&self, balances: &AccountBalances) -> AccountSplit {
        let r = self.rates;

        // OA: base rate only
        let oa = balances.oa * (r.oa / 12.0);

        // SA: extra interest on the eligible OA portion, then its own balance
        let oa_eligible = balances.oa.min(r.extra_oa_cap);
        let remaining_for_sa_ma = r.extra_total_cap - oa_eligible;
        let sa = oa_eligible * (r.extra / 12.0) + split_interest(balances.sa, remaining_for_sa_ma, r.sa, r.extra);

        // MA: whatever allowance the SA left over
        let remaining_for_ma = (remaining_for_sa_ma - balances.sa).max(0.0);
        let ma = split_interest(balances.ma, remaining_for_ma, r.ma, r.extra);

        AccountSplit { oa, sa, ma }
    }
}

/// Interest on a balance where only `eligible` of it earns the extra rate
fn split_interest(balance: f64, eligible: f64, base_rate: f64, extra_rate: f64) -> f64 {
    if balance > eligible {
        eligible * ((base_rate + extra_rate) / 12.0) + (balance - eligible) * (base_rate / 12.0)
    } else {
        balance * ((base_rate + extra_rate) / 12.0)
    }
}
