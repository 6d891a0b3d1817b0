//! Contribution rates by age bracket and income band

use serde::{Deserialize, Serialize};

use crate::money::round_cents;

/// Who a contribution amount is computed for
///
/// The employer share is never computed directly: it is combined minus employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Combined,
    Employee,
}

/// Income band selected by monthly salary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncomeBand {
    /// Up to $50: no contribution
    Exempt,
    /// Above $50 up to $500: rate on total wages
    TotalWage,
    /// Above $500 up to $749: rate on total wages plus phased-in rate above $500
    Phased,
    /// $750 and above: ordinary and additional wages, subject to ceilings
    Full,
}

/// Inclusive upper bounds (monthly salary) of the lower income bands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncomeBands {
    pub exempt_max: f64,
    pub total_wage_max: f64,
    pub phased_max: f64,
}

impl Default for IncomeBands {
    fn default() -> Self {
        Self {
            exempt_max: 50.0,
            total_wage_max: 500.0,
            phased_max: 749.0,
        }
    }
}

impl IncomeBands {
    /// Band for a monthly salary; a salary exactly on a bound stays in the lower band
    pub fn band_for(&self, monthly_salary: f64) -> IncomeBand {
        if monthly_salary <= self.exempt_max {
            IncomeBand::Exempt
        } else if monthly_salary <= self.total_wage_max {
            IncomeBand::TotalWage
        } else if monthly_salary <= self.phased_max {
            IncomeBand::Phased
        } else {
            IncomeBand::Full
        }
    }
}

/// Statutory wage ceilings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WageCeilings {
    /// Ordinary wage subject to contribution per month
    pub ordinary_monthly: f64,
    /// Total (ordinary + additional) wage subject to contribution per year
    pub additional_annual: f64,
}

impl Default for WageCeilings {
    fn default() -> Self {
        Self {
            ordinary_monthly: 6_000.0,
            additional_annual: 102_000.0,
        }
    }
}

/// Rates for one income band
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EntityRates {
    pub combined: f64,
    pub employee: f64,
    /// Phased-in rate on wages above $500 (phased band only)
    pub misc: f64,
}

impl EntityRates {
    pub fn new(combined: f64, employee: f64) -> Self {
        Self { combined, employee, misc: 0.0 }
    }

    pub fn phased(combined: f64, employee: f64, misc: f64) -> Self {
        Self { combined, employee, misc }
    }

    pub fn rate(&self, entity: Entity) -> f64 {
        match entity {
            Entity::Combined => self.combined,
            Entity::Employee => self.employee,
        }
    }

    /// Employer rate as the difference of combined and employee, to 2 dp
    pub fn employer(&self) -> f64 {
        round_cents(self.combined - self.employee)
    }
}

/// All contribution rates for one age bracket
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionBracket {
    /// Inclusive upper age bound
    pub max_age: u32,
    pub total_wage: EntityRates,
    pub phased: EntityRates,
    pub full: EntityRates,
}

impl ContributionBracket {
    /// Rates for an income band (None for the exempt band)
    pub fn rates(&self, band: IncomeBand) -> Option<&EntityRates> {
        match band {
            IncomeBand::Exempt => None,
            IncomeBand::TotalWage => Some(&self.total_wage),
            IncomeBand::Phased => Some(&self.phased),
            IncomeBand::Full => Some(&self.full),
        }
    }
}

/// Contribution rates for the 2016 generation of the scheme
pub fn statutory_brackets() -> Vec<ContributionBracket> {
    vec![
        ContributionBracket {
            max_age: 55,
            total_wage: EntityRates::new(0.17, 0.0),
            phased: EntityRates::phased(0.17, 0.0, 0.6),
            full: EntityRates::new(0.37, 0.2),
        },
        ContributionBracket {
            max_age: 60,
            total_wage: EntityRates::new(0.13, 0.0),
            phased: EntityRates::phased(0.13, 0.0, 0.39),
            full: EntityRates::new(0.26, 0.13),
        },
        ContributionBracket {
            max_age: 65,
            total_wage: EntityRates::new(0.09, 0.0),
            phased: EntityRates::phased(0.09, 0.0, 0.225),
            full: EntityRates::new(0.165, 0.075),
        },
        ContributionBracket {
            max_age: 150,
            total_wage: EntityRates::new(0.075, 0.0),
            phased: EntityRates::phased(0.075, 0.0, 0.15),
            full: EntityRates::new(0.125, 0.05),
        },
    ]
}
