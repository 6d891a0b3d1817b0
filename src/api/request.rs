//! Request bodies and their validation
//!
//! Requests deserialize into plain typed structs. `validate` then checks ranges
//! and formats and produces the parameters the calculators take.

use serde::Deserialize;

use crate::contribution::ContributionPeriod;
use crate::error::{CpfError, Result};
use crate::period::{Period, YearMonth};
use crate::projection::{
    AccountBalances, AgeSource, CashFlowEvent, CashFlowKind, Horizon, ProjectionConfig, ProjectionInputs, Recurrence,
};

fn default_bonus_month() -> u32 {
    12
}

fn non_negative(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(CpfError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(CpfError::invalid(field, format!("{} must not be negative", value)));
    }
    Ok(value)
}

/// Explicit age if given, else a YYYYMM date of birth
fn resolve_age(dob: Option<&str>, age: Option<u32>) -> Result<AgeSource> {
    match (age, dob) {
        (Some(age), _) => Ok(AgeSource::Fixed(age)),
        (None, Some(dob)) => YearMonth::parse_yyyymm(dob)
            .map(AgeSource::DateOfBirth)
            .map_err(|_| CpfError::invalid("dob", format!("\"{}\" is not a YYYYMM date", dob))),
        (None, None) => Err(CpfError::MissingParameter("dob".to_string())),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContributionRequest {
    /// Annual salary
    pub salary: f64,
    pub bonus: f64,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    /// "year" or "month"
    pub period: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContributionParams {
    pub annual_salary: f64,
    pub bonus: f64,
    pub age: u32,
    pub period: ContributionPeriod,
}

impl ContributionRequest {
    pub fn validate(&self, as_of: YearMonth) -> Result<ContributionParams> {
        let period = match self.period.as_str() {
            "year" => ContributionPeriod::Year,
            "month" => ContributionPeriod::Month,
            other => return Err(CpfError::invalid("period", format!("\"{}\" is an invalid value", other))),
        };

        Ok(ContributionParams {
            annual_salary: non_negative("salary", self.salary)?,
            bonus: non_negative("bonus", self.bonus)?,
            age: resolve_age(self.dob.as_deref(), self.age)?.age_at(as_of),
            period,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AllocationRequest {
    /// Annual salary
    pub salary: f64,
    pub bonus: f64,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AllocationParams {
    pub annual_salary: f64,
    pub bonus: f64,
    pub age: u32,
}

impl AllocationRequest {
    pub fn validate(&self, as_of: YearMonth) -> Result<AllocationParams> {
        Ok(AllocationParams {
            annual_salary: non_negative("salary", self.salary)?,
            bonus: non_negative("bonus", self.bonus)?,
            age: resolve_age(self.dob.as_deref(), self.age)?.age_at(as_of),
        })
    }
}

/// Opening balances as sent by the client
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BaseBalances {
    pub oa: f64,
    pub sa: f64,
    pub ma: f64,
}

/// A top-up or withdrawal as sent by the client, before period parsing
#[derive(Debug, Clone, Deserialize)]
pub struct CashFlowInput {
    #[serde(alias = "type")]
    pub kind: CashFlowKind,
    /// "YYYY" or "YYYYMM"
    pub period: String,
    pub amount: f64,
    #[serde(default, alias = "is_sa_topup_from_oa")]
    pub is_from_oa: bool,
    #[serde(default)]
    pub recurrence: Option<Recurrence>,
}

impl CashFlowInput {
    pub fn to_event(&self) -> Result<CashFlowEvent> {
        let field = "account_deltas";
        let period: Period = self
            .period
            .parse()
            .map_err(|e: CpfError| CpfError::invalid(field, e.to_string()))?;
        let amount = non_negative(field, self.amount)?;

        if let Some(recurrence) = self.recurrence {
            if recurrence.duration == 0 {
                return Err(CpfError::invalid(field, "recurrence duration must be at least 1"));
            }
        }

        Ok(CashFlowEvent {
            kind: self.kind,
            period,
            amount,
            is_from_oa: self.is_from_oa,
            recurrence: self.recurrence,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectionRequest {
    /// Annual salary in the first year
    pub salary: f64,
    pub bonus: f64,
    pub yoy_increase_salary: f64,
    /// Defaults to the salary increase
    #[serde(default)]
    pub yoy_increase_bonus: Option<f64>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    pub base_cpf: BaseBalances,
    #[serde(default = "default_bonus_month")]
    pub bonus_month: u32,
    #[serde(default)]
    pub n_years: Option<u32>,
    #[serde(default)]
    pub target_year: Option<i32>,
    #[serde(default)]
    pub account_deltas: Vec<CashFlowInput>,
    /// First projected month as YYYYMM, defaults to the current month
    #[serde(default)]
    pub proj_start: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProjectionParams {
    pub config: ProjectionConfig,
    pub inputs: ProjectionInputs,
}

impl ProjectionRequest {
    pub fn validate(&self, as_of: YearMonth) -> Result<ProjectionParams> {
        let start = match &self.proj_start {
            Some(s) => YearMonth::parse_yyyymm(s)
                .map_err(|_| CpfError::invalid("proj_start", format!("\"{}\" is not a YYYYMM date", s)))?,
            None => as_of,
        };

        let horizon = match (self.n_years, self.target_year) {
            (Some(0), _) => return Err(CpfError::invalid("n_years", "must be at least 1")),
            (Some(n), _) => Horizon::Years(n),
            (None, Some(target)) if target < start.year => {
                return Err(CpfError::invalid(
                    "target_year",
                    format!("{} is before the projection start year {}", target, start.year),
                ))
            }
            (None, Some(target)) => Horizon::TargetYear(target),
            (None, None) => return Err(CpfError::MissingHorizon),
        };

        if !(1..=12).contains(&self.bonus_month) {
            return Err(CpfError::invalid(
                "bonus_month",
                format!("\"{}\" is an invalid value", self.bonus_month),
            ));
        }

        let opening = AccountBalances::new(
            non_negative("base_cpf", self.base_cpf.oa)?,
            non_negative("base_cpf", self.base_cpf.sa)?,
            non_negative("base_cpf", self.base_cpf.ma)?,
        );

        let cash_flows = self
            .account_deltas
            .iter()
            .map(CashFlowInput::to_event)
            .collect::<Result<Vec<_>>>()?;

        let config = ProjectionConfig {
            start,
            horizon,
            salary_growth: self.yoy_increase_salary,
            bonus_growth: self.yoy_increase_bonus,
            bonus_month: self.bonus_month,
        };

        let inputs = ProjectionInputs {
            monthly_salary: non_negative("salary", self.salary)? / 12.0,
            bonus: non_negative("bonus", self.bonus)?,
            age: resolve_age(self.dob.as_deref(), self.age)?,
            opening,
            cash_flows,
        };

        Ok(ProjectionParams { config, inputs })
    }
}
