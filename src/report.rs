//! Wire-format reports
//!
//! Every report is `{values, rates}` (projections carry values only). Currency
//! figures are strings with two decimal places and rates are strings too, so
//! no binary floating point crosses the wire.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::allocation::AllocationSummary;
use crate::contribution::{ContributionSummary, RateBreakdown, WageBase};
use crate::money::format_cents;
use crate::projection::{AnnualResult, ProjectionResult};
use crate::rates::AccountSplit;

/// Key of the last projected year
pub const FINAL_KEY: &str = "final";

/// An OA/SA/MA triple of formatted figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountFigures {
    pub oa: String,
    pub sa: String,
    pub ma: String,
}

impl AccountFigures {
    pub fn currency(split: &AccountSplit) -> Self {
        Self {
            oa: format_cents(split.oa),
            sa: format_cents(split.sa),
            ma: format_cents(split.ma),
        }
    }

    pub fn rates(split: &AccountSplit) -> Self {
        Self {
            oa: split.oa.to_string(),
            sa: split.sa.to_string(),
            ma: split.ma.to_string(),
        }
    }
}

/// Rates keyed by wage base, serialized in insertion order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RateMap(pub Vec<(WageBase, f64)>);

impl Serialize for RateMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (base, rate) in &self.0 {
            map.serialize_entry(base.label(), &rate.to_string())?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributionValues {
    pub cont_employee: String,
    pub cont_employer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributionRates {
    pub employee: RateMap,
    pub employer: RateMap,
}

impl From<&RateBreakdown> for ContributionRates {
    fn from(breakdown: &RateBreakdown) -> Self {
        Self {
            employee: RateMap(breakdown.employee.clone()),
            employer: RateMap(breakdown.employer.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributionReport {
    pub values: ContributionValues,
    pub rates: ContributionRates,
}

impl From<&ContributionSummary> for ContributionReport {
    fn from(summary: &ContributionSummary) -> Self {
        Self {
            values: ContributionValues {
                cont_employee: format_cents(summary.employee),
                cont_employer: format_cents(summary.employer),
            },
            rates: ContributionRates::from(&summary.rates),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationRates {
    pub pct_of_salary: AccountFigures,
    pub ratio: AccountFigures,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationReport {
    pub values: AccountFigures,
    pub rates: AllocationRates,
}

impl From<&AllocationSummary> for AllocationReport {
    fn from(summary: &AllocationSummary) -> Self {
        Self {
            values: AccountFigures::currency(&summary.annual),
            rates: AllocationRates {
                pct_of_salary: AccountFigures::rates(&summary.pct_of_wage),
                ratio: AccountFigures::rates(&summary.ratio),
            },
        }
    }
}

/// Closing balances and credited interest of one projected year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearFigures {
    pub oa: String,
    pub sa: String,
    pub ma: String,
    pub oa_interest: String,
    pub sa_interest: String,
    pub ma_interest: String,
}

impl From<&AnnualResult> for YearFigures {
    fn from(year: &AnnualResult) -> Self {
        Self {
            oa: format_cents(year.closing.oa),
            sa: format_cents(year.closing.sa),
            ma: format_cents(year.closing.ma),
            oa_interest: format_cents(year.interest.oa),
            sa_interest: format_cents(year.interest.sa),
            ma_interest: format_cents(year.interest.ma),
        }
    }
}

/// Yearly figures keyed "1".."N", with the last year repeated under "final"
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectionValues(pub Vec<YearFigures>);

impl Serialize for ProjectionValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.0.len() + usize::from(!self.0.is_empty());
        let mut map = serializer.serialize_map(Some(len))?;
        for (i, year) in self.0.iter().enumerate() {
            map.serialize_entry(&(i + 1).to_string(), year)?;
        }
        if let Some(last) = self.0.last() {
            map.serialize_entry(FINAL_KEY, last)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionReport {
    pub values: ProjectionValues,
}

impl From<&ProjectionResult> for ProjectionReport {
    fn from(result: &ProjectionResult) -> Self {
        Self {
            values: ProjectionValues(result.iter().map(YearFigures::from).collect()),
        }
    }
}
