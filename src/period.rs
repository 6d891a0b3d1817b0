//! Calendar year-month arithmetic for projections and cash-flow periods

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CpfError;

/// A calendar month (month is 1-12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Create a year-month, returning None if the month is outside 1-12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The current calendar month in local time
    pub fn current() -> Self {
        Self::from(Local::now().date_naive())
    }

    /// Advance by a number of months, carrying into the year
    pub fn add_months(self, months: u32) -> Self {
        let index = self.year as i64 * 12 + (self.month as i64 - 1) + months as i64;
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// Parse a date of birth in YYYYMM format
    pub fn parse_yyyymm(s: &str) -> Result<Self, CpfError> {
        match Period::from_str(s)? {
            Period { year, month: Some(month) } => Ok(Self { year, month }),
            _ => Err(CpfError::InvalidPeriod(s.to_string())),
        }
    }
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

/// Cash-flow period: a year with an optional month
///
/// A period without a month is applied in January of its year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    pub year: i32,
    pub month: Option<u32>,
}

impl Period {
    pub fn month_of(ym: YearMonth) -> Self {
        Self {
            year: ym.year,
            month: Some(ym.month),
        }
    }

    pub fn year_only(year: i32) -> Self {
        Self { year, month: None }
    }

    /// Same month (or lack of one) a number of years later
    pub fn add_years(self, years: u32) -> Self {
        Self {
            year: self.year + years as i32,
            ..self
        }
    }

    /// Month in which this period is applied (month-less periods fold into January)
    pub fn effective_month(&self) -> u32 {
        self.month.unwrap_or(1)
    }

    /// Whether an event in this period lands in the given month of its year
    pub fn falls_in_month(&self, month: u32) -> bool {
        self.effective_month() == month
    }
}

impl FromStr for Period {
    type Err = CpfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CpfError::InvalidPeriod(s.to_string());
        if !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        match s.len() {
            4 => Ok(Self::year_only(s.parse().map_err(|_| invalid())?)),
            6 => {
                let year: i32 = s[..4].parse().map_err(|_| invalid())?;
                let month: u32 = s[4..].parse().map_err(|_| invalid())?;
                if !(1..=12).contains(&month) {
                    return Err(CpfError::invalid(
                        "period",
                        format!("month {} of \"{}\" is outside 1-12", month, s),
                    ));
                }
                Ok(Self { year, month: Some(month) })
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Period {
    type Error = CpfError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Period> for String {
    fn from(p: Period) -> Self {
        p.to_string()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.month {
            Some(month) => write!(f, "{:04}{:02}", self.year, month),
            None => write!(f, "{:04}", self.year),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_months_carries_into_year() {
        let start = YearMonth::new(2020, 1).unwrap();

        assert_eq!(start.add_months(11), YearMonth::new(2020, 12).unwrap());
        assert_eq!(start.add_months(12), YearMonth::new(2021, 1).unwrap());
        assert_eq!(start.add_months(360), YearMonth::new(2050, 1).unwrap());
        assert_eq!(start.add_months(71), YearMonth::new(2025, 12).unwrap());
        assert_eq!(start.add_months(220), YearMonth::new(2038, 5).unwrap());
    }

    #[test]
    fn test_parse_period() {
        let p: Period = "202006".parse().unwrap();
        assert_eq!(p, Period { year: 2020, month: Some(6) });
        assert_eq!(p.to_string(), "202006");

        let p: Period = "2021".parse().unwrap();
        assert_eq!(p.month, None);
        assert_eq!(p.effective_month(), 1);
        assert!(p.falls_in_month(1));
        assert!(!p.falls_in_month(2));
    }

    #[test]
    fn test_period_add_years_keeps_month() {
        assert_eq!(Period::year_only(2024).add_years(3), Period::year_only(2027));
        let p: Period = "202406".parse().unwrap();
        assert_eq!(p.add_years(1).to_string(), "202506");
    }

    #[test]
    fn test_parse_period_rejects_bad_input() {
        assert!("202013".parse::<Period>().is_err());
        assert!("202000".parse::<Period>().is_err());
        assert!("20201".parse::<Period>().is_err());
        assert!("2020-1".parse::<Period>().is_err());
        assert!("".parse::<Period>().is_err());
    }

    #[test]
    fn test_period_serde_as_string() {
        let p: Period = serde_json::from_str("\"202203\"").unwrap();
        assert_eq!(p, Period { year: 2022, month: Some(3) });
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"202203\"");
        assert!(serde_json::from_str::<Period>("\"202214\"").is_err());
    }

    #[test]
    fn test_date_of_birth_requires_month() {
        assert_eq!(YearMonth::parse_yyyymm("198502").unwrap(), YearMonth::new(1985, 2).unwrap());
        assert!(YearMonth::parse_yyyymm("1985").is_err());
    }
}
