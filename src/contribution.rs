//! Monthly statutory contribution calculation
//!
//! Contribution depends on the age bracket and on the income band of the
//! monthly salary. In the full band, ordinary wages are capped at the monthly
//! ceiling and additional wages (bonus) at what remains of the annual ceiling.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::age::AgeResolver;
use crate::money::round_half_up;
use crate::rates::{Entity, IncomeBand, RateTables};

/// Threshold above which the phased-in rate applies in the phased band
const PHASED_THRESHOLD: f64 = 500.0;

/// Time period a contribution summary covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionPeriod {
    Month,
    Year,
}

/// Wage base a published rate applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WageBase {
    /// Total wages
    TotalWage,
    /// Total wages above $500
    TotalWageAboveThreshold,
    /// Ordinary wages
    Ordinary,
    /// Additional wages
    Additional,
}

impl WageBase {
    pub fn label(&self) -> &'static str {
        match self {
            WageBase::TotalWage => "TW",
            WageBase::TotalWageAboveThreshold => "TW - $500",
            WageBase::Ordinary => "OW",
            WageBase::Additional => "AW",
        }
    }
}

/// Published rates for a monthly salary, split by who pays
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RateBreakdown {
    pub employee: Vec<(WageBase, f64)>,
    pub employer: Vec<(WageBase, f64)>,
}

/// Contribution amounts for a month or a year
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionSummary {
    pub employee: f64,
    /// Combined minus employee
    pub employer: f64,
    pub rates: RateBreakdown,
}

/// Computes statutory contributions against a set of rate tables
#[derive(Debug, Clone, Copy)]
pub struct ContributionCalculator<'a> {
    rates: &'a RateTables,
}

impl<'a> ContributionCalculator<'a> {
    pub fn new(rates: &'a RateTables) -> Self {
        Self { rates }
    }

    /// Contribution for one month
    ///
    /// `salary` is the monthly salary and `bonus` the additional wage paid in
    /// this month. The combined amount is rounded half-up to the dollar and the
    /// employee amount has its cents dropped (full band only).
    pub fn monthly_contribution(&self, salary: f64, bonus: f64, age: u32, entity: Entity) -> f64 {
        let bracket = AgeResolver::new(self.rates).contribution_rates(age);
        let band = self.rates.income_bands.band_for(salary);
        let total_wage = salary + bonus;

        let rates = match bracket.rates(band) {
            Some(rates) => rates,
            None => return 0.0,
        };
        let rate = rates.rate(entity);

        let contribution = match band {
            IncomeBand::Exempt => 0.0,
            IncomeBand::TotalWage => rate * total_wage,
            IncomeBand::Phased => rate * total_wage + rates.misc * (total_wage - PHASED_THRESHOLD),
            IncomeBand::Full => {
                let ceilings = &self.rates.ceilings;
                let ordinary = salary.min(ceilings.ordinary_monthly);
                let from_ordinary = rate * ordinary;

                let from_additional = if bonus > 0.0 {
                    let additional_ceiling = (ceilings.additional_annual - ordinary * 12.0).max(0.0);
                    rate * bonus.min(additional_ceiling)
                } else {
                    0.0
                };

                let total = from_ordinary + from_additional;
                match entity {
                    Entity::Combined => round_half_up(total),
                    Entity::Employee => total.floor(),
                }
            }
        };

        contribution.max(0.0)
    }

    /// Employee and employer contributions for a month or a year
    ///
    /// `annual_salary` is spread evenly over twelve months. For a year, the
    /// bonus is paid in December only.
    pub fn summary(&self, annual_salary: f64, bonus: f64, age: u32, period: ContributionPeriod) -> ContributionSummary {
        let monthly_salary = annual_salary / 12.0;
        let (mut combined, mut employee) = (0.0, 0.0);

        match period {
            ContributionPeriod::Month => {
                combined += self.monthly_contribution(monthly_salary, bonus, age, Entity::Combined);
                employee += self.monthly_contribution(monthly_salary, bonus, age, Entity::Employee);
            }
            ContributionPeriod::Year => {
                for month in 1..=12 {
                    let bonus_in_month = if month == 12 { bonus } else { 0.0 };
                    combined += self.monthly_contribution(monthly_salary, bonus_in_month, age, Entity::Combined);
                    employee += self.monthly_contribution(monthly_salary, bonus_in_month, age, Entity::Employee);
                }
            }
        }

        debug!(
            "Contribution for {:?}: combined {:.2}, employee {:.2}",
            period, combined, employee
        );

        ContributionSummary {
            employee,
            employer: combined - employee,
            rates: self.rate_breakdown(monthly_salary, age),
        }
    }

    /// Published rates applicable to a monthly salary
    pub fn rate_breakdown(&self, monthly_salary: f64, age: u32) -> RateBreakdown {
        let bracket = AgeResolver::new(self.rates).contribution_rates(age);

        match self.rates.income_bands.band_for(monthly_salary) {
            IncomeBand::Exempt => RateBreakdown::default(),
            IncomeBand::TotalWage => RateBreakdown {
                employee: Vec::new(),
                employer: vec![(WageBase::TotalWage, bracket.total_wage.combined)],
            },
            IncomeBand::Phased => RateBreakdown {
                employee: vec![(WageBase::TotalWageAboveThreshold, bracket.phased.misc)],
                employer: vec![(WageBase::TotalWage, bracket.phased.combined)],
            },
            IncomeBand::Full => {
                let employer = bracket.full.employer();
                RateBreakdown {
                    employee: vec![
                        (WageBase::Ordinary, bracket.full.employee),
                        (WageBase::Additional, bracket.full.employee),
                    ],
                    employer: vec![(WageBase::Ordinary, employer), (WageBase::Additional, employer)],
                }
            }
        }
    }
}
