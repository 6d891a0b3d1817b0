//! Projection output types

use serde::{Deserialize, Serialize};

use crate::rates::AccountSplit;
use super::state::AccountBalances;

/// Outcome of projecting one calendar year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualResult {
    /// Calendar year projected
    pub year: i32,

    /// Balances after the year's interest has been credited
    pub closing: AccountBalances,

    /// Interest credited to each account at year end
    pub interest: AccountSplit,

    /// Age resolved for the last projected month
    pub age: u32,

    /// Salary and bonus used for this year
    pub monthly_salary: f64,
    pub bonus: f64,
}

/// Year-by-year results of a multi-year projection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub years: Vec<AnnualResult>,
}

impl ProjectionResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_year(&mut self, result: AnnualResult) {
        self.years.push(result);
    }

    /// Result for a 1-based year index
    pub fn get(&self, year_index: usize) -> Option<&AnnualResult> {
        year_index.checked_sub(1).and_then(|i| self.years.get(i))
    }

    /// Result of the last projected year
    pub fn final_year(&self) -> Option<&AnnualResult> {
        self.years.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnnualResult> {
        self.years.iter()
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Interest credited over the whole projection
    pub fn total_interest(&self) -> AccountSplit {
        self.years.iter().fold(AccountSplit::default(), |acc, y| {
            AccountSplit::new(acc.oa + y.interest.oa, acc.sa + y.interest.sa, acc.ma + y.interest.ma)
        })
    }
}
