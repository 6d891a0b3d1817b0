//! Multi-year projection engine
//!
//! Chains annual projections: each year's closing balances, rounded to cents,
//! open the following year. The first year starts at the configured month and
//! every later year starts in January.

use log::{debug, info};

use crate::period::YearMonth;
use crate::rates::RateTables;
use super::annual::{AgeSource, AnnualProjector, YearInputs};
use super::cashflows::{decompress, events_in_year, CashFlowEvent};
use super::results::ProjectionResult;
use super::state::AccountBalances;

/// How far to project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizon {
    /// Number of calendar years, counting the start year
    Years(u32),
    /// Last calendar year to project, inclusive
    TargetYear(i32),
}

impl Horizon {
    /// Number of projected years for a projection starting in `start_year`
    pub fn n_years(&self, start_year: i32) -> u32 {
        match *self {
            Horizon::Years(n) => n,
            Horizon::TargetYear(target) => (target - start_year + 1).max(0) as u32,
        }
    }
}

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// First projected month
    pub start: YearMonth,

    pub horizon: Horizon,

    /// Year-over-year salary growth (0.03 = 3%)
    pub salary_growth: f64,

    /// Year-over-year bonus growth; follows salary growth when None
    pub bonus_growth: Option<f64>,

    /// Month (1-12) in which the bonus is paid
    pub bonus_month: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            start: YearMonth::current(),
            horizon: Horizon::Years(10),
            salary_growth: 0.0,
            bonus_growth: None,
            bonus_month: 12,
        }
    }
}

/// Member data for a projection
#[derive(Debug, Clone)]
pub struct ProjectionInputs {
    /// Salary in the first projected year
    pub monthly_salary: f64,

    /// Bonus in the first projected year
    pub bonus: f64,

    /// A fixed age applies to the first year and advances by one each year
    pub age: AgeSource,

    pub opening: AccountBalances,

    /// Top-ups and withdrawals, possibly recurring
    pub cash_flows: Vec<CashFlowEvent>,
}

/// Main projection engine
pub struct ProjectionEngine<'a> {
    rates: &'a RateTables,
    config: ProjectionConfig,
}

impl<'a> ProjectionEngine<'a> {
    pub fn new(rates: &'a RateTables, config: ProjectionConfig) -> Self {
        Self { rates, config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Number of years this engine will project
    pub fn n_years(&self) -> u32 {
        self.config.horizon.n_years(self.config.start.year)
    }

    /// Run the projection year by year
    pub fn project(&self, inputs: &ProjectionInputs) -> ProjectionResult {
        let config = &self.config;
        let n_years = self.n_years();
        let projector = AnnualProjector::new(self.rates);
        let events = decompress(&inputs.cash_flows);
        let bonus_growth = config.bonus_growth.unwrap_or(config.salary_growth);

        info!(
            "Projecting {} years from {} with {} cash-flow events",
            n_years,
            config.start,
            events.len()
        );

        let mut result = ProjectionResult::new();
        let mut balances = inputs.opening;

        for i in 0..n_years {
            let start = if i == 0 {
                config.start
            } else {
                YearMonth { year: config.start.year + i as i32, month: 1 }
            };

            let age = match inputs.age {
                AgeSource::Fixed(age) => AgeSource::Fixed(age + i),
                dob => dob,
            };

            let year_inputs = YearInputs {
                start,
                monthly_salary: inputs.monthly_salary * (1.0 + config.salary_growth).powi(i as i32),
                bonus: inputs.bonus * (1.0 + bonus_growth).powi(i as i32),
                bonus_month: config.bonus_month,
                age,
            };

            let year_events = events_in_year(&events, start.year);
            debug!("Year {} ({}): {} cash-flow events", i + 1, start.year, year_events.len());

            let mut annual = projector.project(&year_inputs, balances, Some(&year_events));
            annual.closing = annual.closing.rounded_to_cents();
            balances = annual.closing;

            result.add_year(annual);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::cashflows::{CashFlowKind, Frequency};
    use approx::assert_abs_diff_eq;

    fn config(horizon: Horizon) -> ProjectionConfig {
        ProjectionConfig {
            start: YearMonth { year: 2024, month: 1 },
            horizon,
            ..Default::default()
        }
    }

    fn inputs() -> ProjectionInputs {
        ProjectionInputs {
            monthly_salary: 4000.0,
            bonus: 10_000.0,
            age: AgeSource::Fixed(25),
            opening: AccountBalances::new(6000.0, 2000.0, 3000.0),
            cash_flows: Vec::new(),
        }
    }

    #[test]
    fn test_two_years_chained() {
        let rates = RateTables::statutory();
        let result = ProjectionEngine::new(&rates, config(Horizon::Years(2))).project(&inputs());

        assert_eq!(result.len(), 2);
        let first = result.get(1).unwrap();
        assert_eq!(first.closing, AccountBalances::new(19_646.16, 5780.76, 7896.9));

        let last = result.final_year().unwrap();
        assert_eq!(last.year, 2025);
        assert_eq!(last.age, 26);
        assert_abs_diff_eq!(last.closing.oa, 33_633.48, epsilon = 1e-6);
        assert_abs_diff_eq!(last.closing.sa, 9828.83, epsilon = 1e-6);
        assert_abs_diff_eq!(last.closing.ma, 13_038.65, epsilon = 1e-6);
    }

    #[test]
    fn test_target_year_counts_start_year() {
        let rates = RateTables::statutory();
        let config = ProjectionConfig {
            start: YearMonth { year: 2024, month: 3 },
            horizon: Horizon::TargetYear(2026),
            ..Default::default()
        };
        let result = ProjectionEngine::new(&rates, config).project(&inputs());

        let years: Vec<i32> = result.iter().map(|y| y.year).collect();
        assert_eq!(years, vec![2024, 2025, 2026]);
    }

    #[test]
    fn test_past_target_year_projects_nothing() {
        let rates = RateTables::statutory();
        let engine = ProjectionEngine::new(&rates, config(Horizon::TargetYear(2020)));

        assert_eq!(engine.n_years(), 0);
        assert!(engine.project(&inputs()).is_empty());
    }

    #[test]
    fn test_salary_and_bonus_growth() {
        let rates = RateTables::statutory();
        let config = ProjectionConfig {
            salary_growth: 0.03,
            bonus_growth: Some(0.10),
            ..config(Horizon::Years(3))
        };
        let result = ProjectionEngine::new(&rates, config).project(&inputs());

        let third = result.get(3).unwrap();
        assert_abs_diff_eq!(third.monthly_salary, 4000.0 * 1.03 * 1.03, epsilon = 1e-9);
        assert_abs_diff_eq!(third.bonus, 10_000.0 * 1.1 * 1.1, epsilon = 1e-9);
    }

    #[test]
    fn test_bonus_growth_defaults_to_salary_growth() {
        let rates = RateTables::statutory();
        let config = ProjectionConfig {
            salary_growth: 0.05,
            ..config(Horizon::Years(2))
        };
        let result = ProjectionEngine::new(&rates, config).project(&inputs());

        assert_abs_diff_eq!(result.get(2).unwrap().bonus, 10_500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cash_flows_only_touch_their_year() {
        let rates = RateTables::statutory();
        let baseline = ProjectionEngine::new(&rates, config(Horizon::Years(3))).project(&inputs());

        let mut with_topup = inputs();
        with_topup.cash_flows = vec![CashFlowEvent::new(CashFlowKind::OaTopup, "202506".parse().unwrap(), 1000.0)];
        let result = ProjectionEngine::new(&rates, config(Horizon::Years(3))).project(&with_topup);

        assert_eq!(result.get(1), baseline.get(1));
        let diff = result.get(2).unwrap().closing.oa - baseline.get(2).unwrap().closing.oa;
        assert!(diff > 1000.0 && diff < 1020.0);
    }

    #[test]
    fn test_recurring_cash_flows_span_years() {
        let rates = RateTables::statutory();
        let mut recurring = inputs();
        recurring.cash_flows = vec![CashFlowEvent::new(CashFlowKind::MaWithdrawal, "202411".parse().unwrap(), 100.0)
            .recurring(Frequency::Monthly, 4)];

        let mut expanded = inputs();
        expanded.cash_flows = decompress(&recurring.cash_flows);

        let engine = ProjectionEngine::new(&rates, config(Horizon::Years(2)));
        assert_eq!(engine.project(&recurring), engine.project(&expanded));
    }

    #[test]
    fn test_date_of_birth_age_is_resolved_monthly() {
        let rates = RateTables::statutory();
        let mut member = inputs();
        member.age = AgeSource::DateOfBirth(YearMonth { year: 1989, month: 6 });

        let result = ProjectionEngine::new(&rates, config(Horizon::Years(2))).project(&member);
        let ages: Vec<u32> = result.iter().map(|y| y.age).collect();
        assert_eq!(ages, vec![36, 37]);
    }
}
