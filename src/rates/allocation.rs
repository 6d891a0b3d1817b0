//! Allocation rates into the three accounts by age bracket

use serde::{Deserialize, Serialize};

/// A value per account
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AccountSplit {
    pub oa: f64,
    pub sa: f64,
    pub ma: f64,
}

impl AccountSplit {
    pub fn new(oa: f64, sa: f64, ma: f64) -> Self {
        Self { oa, sa, ma }
    }
}

/// Allocation rates for one age bracket
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationBracket {
    /// Inclusive upper age bound
    pub max_age: u32,
    /// Allocation as a fraction of wages
    pub pct_of_wage: AccountSplit,
    /// Allocation as a fraction of the contribution amount (used for the split)
    pub ratio: AccountSplit,
}

pub fn statutory_brackets() -> Vec<AllocationBracket> {
    let bracket = |max_age, pct: (f64, f64, f64), ratio: (f64, f64, f64)| AllocationBracket {
        max_age,
        pct_of_wage: AccountSplit::new(pct.0, pct.1, pct.2),
        ratio: AccountSplit::new(ratio.0, ratio.1, ratio.2),
    };

    vec![
        bracket(35, (0.23, 0.06, 0.08), (0.6217, 0.1621, 0.2162)),
        bracket(45, (0.21, 0.07, 0.09), (0.5677, 0.1891, 0.2432)),
        bracket(50, (0.19, 0.08, 0.1), (0.5136, 0.2162, 0.2702)),
        bracket(55, (0.15, 0.115, 0.105), (0.4055, 0.3108, 0.2837)),
        bracket(60, (0.12, 0.035, 0.105), (0.4616, 0.1346, 0.4038)),
        bracket(65, (0.035, 0.025, 0.105), (0.2122, 0.1515, 0.6363)),
        bracket(150, (0.01, 0.01, 0.105), (0.08, 0.08, 0.84)),
    ]
}
