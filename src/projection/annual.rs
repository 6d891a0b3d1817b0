//! Single-year projection
//!
//! A year is advanced month by month from its start month to December. Each
//! month receives its allocation and cash-flow deltas, then accrues interest on
//! the resulting balances. Accrued interest is credited once after December.

use log::{debug, warn};
use std::collections::HashMap;

use crate::age::{AgeResolver, BracketPurpose};
use crate::allocation::AllocationCalculator;
use crate::period::YearMonth;
use crate::rates::{AccountSplit, RateTables};
use super::cashflows::{monthly_deltas, CashFlowEvent};
use super::interest::InterestEngine;
use super::results::AnnualResult;
use super::state::AccountBalances;

/// Where the member's age comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeSource {
    /// Same age for every month
    Fixed(u32),
    /// Re-resolved each month from the birth month
    DateOfBirth(YearMonth),
}

impl AgeSource {
    pub fn age_at(&self, as_of: YearMonth) -> u32 {
        match *self {
            AgeSource::Fixed(age) => age,
            AgeSource::DateOfBirth(dob) => AgeResolver::age(dob, as_of),
        }
    }
}

/// Inputs for one projected year
#[derive(Debug, Clone, Copy)]
pub struct YearInputs {
    /// First month projected; the year runs from here to December
    pub start: YearMonth,
    pub monthly_salary: f64,
    pub bonus: f64,
    /// Month (1-12) in which the bonus is paid
    pub bonus_month: u32,
    pub age: AgeSource,
}

/// Monthly allocation with and without the bonus, for one pair of age brackets
#[derive(Debug, Clone, Copy)]
struct AllocationPair {
    with_bonus: AccountSplit,
    without_bonus: AccountSplit,
}

pub struct AnnualProjector<'a> {
    rates: &'a RateTables,
}

impl<'a> AnnualProjector<'a> {
    pub fn new(rates: &'a RateTables) -> Self {
        Self { rates }
    }

    /// Project one calendar year from the opening balances
    ///
    /// `cash_flows` should already be restricted to the calendar year being
    /// projected. `None` and an empty slice behave identically.
    pub fn project(
        &self,
        inputs: &YearInputs,
        opening: AccountBalances,
        cash_flows: Option<&[CashFlowEvent]>,
    ) -> AnnualResult {
        let resolver = AgeResolver::new(self.rates);
        let allocator = AllocationCalculator::new(self.rates);
        let interest_engine = InterestEngine::new(&self.rates.interest);
        let cash_flows = cash_flows.unwrap_or(&[]);

        // Rebuilt every year; keyed by (contribution, allocation) bracket index
        let mut allocations: HashMap<(usize, usize), AllocationPair> = HashMap::new();

        let mut balances = opening;
        let mut accrued = AccountBalances::default();
        let mut age = inputs.age.age_at(inputs.start);

        for month in inputs.start.month..=12 {
            let as_of = YearMonth { year: inputs.start.year, month };
            age = inputs.age.age_at(as_of);
            let key = (
                resolver.bracket(age, BracketPurpose::Contribution).index,
                resolver.bracket(age, BracketPurpose::Allocation).index,
            );

            let pair = *allocations.entry(key).or_insert_with(|| {
                debug!("Computing allocation for brackets {:?} (age {})", key, age);
                AllocationPair {
                    with_bonus: allocator.monthly_allocation(inputs.monthly_salary, inputs.bonus, age),
                    without_bonus: allocator.monthly_allocation(inputs.monthly_salary, 0.0, age),
                }
            });

            let allocation = if month == inputs.bonus_month {
                pair.with_bonus
            } else {
                pair.without_bonus
            };
            balances.add(&allocation);

            if !cash_flows.is_empty() {
                let deltas = monthly_deltas(cash_flows, month);
                balances.add(&deltas);
                if balances.any_negative() {
                    warn!(
                        "Balance below zero after cash flows in {}: OA={:.2} SA={:.2} MA={:.2}",
                        as_of, balances.oa, balances.sa, balances.ma
                    );
                }
            }

            accrued.add(&interest_engine.monthly_interest(&balances));
        }

        debug!(
            "Interest in {}: OA={:.2} SA={:.2} MA={:.2}",
            inputs.start.year, accrued.oa, accrued.sa, accrued.ma
        );

        let interest = AccountSplit::new(accrued.oa, accrued.sa, accrued.ma);
        balances.add(&interest);

        AnnualResult {
            year: inputs.start.year,
            closing: balances,
            interest,
            age,
            monthly_salary: inputs.monthly_salary,
            bonus: inputs.bonus,
        }
    }
}
