//! Split of a monthly contribution into the three accounts
//!
//! SA and MA shares are truncated to cents and OA takes the remainder, so the
//! three allocations always sum back to the contribution.

use crate::age::AgeResolver;
use crate::contribution::ContributionCalculator;
use crate::money::truncate_cents;
use crate::rates::{AccountSplit, Entity, RateTables};

/// Annualised allocation with the rates that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationSummary {
    /// Monthly allocation multiplied by twelve
    pub annual: AccountSplit,
    pub pct_of_wage: AccountSplit,
    pub ratio: AccountSplit,
}

#[derive(Debug, Clone, Copy)]
pub struct AllocationCalculator<'a> {
    rates: &'a RateTables,
}

impl<'a> AllocationCalculator<'a> {
    pub fn new(rates: &'a RateTables) -> Self {
        Self { rates }
    }

    /// Split a monthly contribution by the age bracket's ratios
    pub fn allocate(&self, contribution: f64, age: u32) -> AccountSplit {
        let ratio = AgeResolver::new(self.rates).allocation_rates(age).ratio;
        let sa = truncate_cents(ratio.sa * contribution);
        let ma = truncate_cents(ratio.ma * contribution);

        AccountSplit {
            oa: contribution - sa - ma,
            sa,
            ma,
        }
    }

    /// Allocation of the combined contribution for a month's salary and bonus
    pub fn monthly_allocation(&self, monthly_salary: f64, bonus: f64, age: u32) -> AccountSplit {
        let contribution =
            ContributionCalculator::new(self.rates).monthly_contribution(monthly_salary, bonus, age, Entity::Combined);
        self.allocate(contribution, age)
    }

    /// Allocation for an annual salary, expressed per year
    pub fn summary(&self, annual_salary: f64, bonus: f64, age: u32) -> AllocationSummary {
        let monthly = self.monthly_allocation(annual_salary / 12.0, bonus, age);
        let bracket = AgeResolver::new(self.rates).allocation_rates(age);

        AllocationSummary {
            annual: AccountSplit::new(monthly.oa * 12.0, monthly.sa * 12.0, monthly.ma * 12.0),
            pct_of_wage: bracket.pct_of_wage,
            ratio: bracket.ratio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn test_allocation_below_35() {
        let rates = RateTables::statutory();
        let calc = AllocationCalculator::new(&rates);

        let alloc = calc.monthly_allocation(4000.0, 0.0, 25);
        assert_eq!(alloc.sa, 239.9);
        assert_eq!(alloc.ma, 319.97);
        assert_abs_diff_eq!(alloc.oa, 920.13, epsilon = 1e-9);

        let alloc = calc.monthly_allocation(4000.0, 10_000.0, 25);
        assert_eq!(alloc.sa, 839.67);
        assert_eq!(alloc.ma, 1119.91);
        assert_abs_diff_eq!(alloc.oa, 3220.42, epsilon = 1e-9);
    }

    #[test]
    fn test_allocation_by_age_bracket() {
        let rates = RateTables::statutory();
        let calc = AllocationCalculator::new(&rates);

        let expected = [
            (36, (840.21, 279.86, 359.93)),
            (46, (760.14, 319.97, 399.89)),
            (51, (600.15, 459.98, 419.87)),
        ];
        for (age, (oa, sa, ma)) in expected {
            let alloc = calc.monthly_allocation(4000.0, 0.0, age);
            assert_abs_diff_eq!(alloc.oa, oa, epsilon = 1e-9);
            assert_eq!(alloc.sa, sa);
            assert_eq!(alloc.ma, ma);
        }
    }

    #[test]
    fn test_summary_is_annualised() {
        let rates = RateTables::statutory();
        let summary = AllocationCalculator::new(&rates).summary(48_000.0, 0.0, 25);

        assert_abs_diff_eq!(summary.annual.sa, 239.9 * 12.0, epsilon = 1e-9);
        assert_abs_diff_eq!(summary.annual.oa, 920.13 * 12.0, epsilon = 1e-6);
        assert_eq!(summary.pct_of_wage, AccountSplit::new(0.23, 0.06, 0.08));
        assert_eq!(summary.ratio.oa, 0.6217);
    }

    #[test]
    fn test_zero_contribution() {
        let rates = RateTables::statutory();
        let alloc = AllocationCalculator::new(&rates).allocate(0.0, 40);
        assert_eq!(alloc, AccountSplit::new(0.0, 0.0, 0.0));
    }

    proptest! {
        #[test]
        fn prop_allocations_sum_to_contribution(contribution in 0u32..20_000, age in 16u32..100) {
            let rates = RateTables::statutory();
            let contribution = contribution as f64;
            let alloc = AllocationCalculator::new(&rates).allocate(contribution, age);

            prop_assert!(alloc.sa >= 0.0 && alloc.ma >= 0.0);
            prop_assert!(((alloc.oa + alloc.sa + alloc.ma) - contribution).abs() < 1e-9);
        }
    }
}
