//! Age resolution and age-bracket lookup
//!
//! A member is considered to be N years old in the month of their Nth birthday,
//! and above N from the following month.

use crate::period::YearMonth;
use crate::rates::{AllocationBracket, ContributionBracket, RateTables};

/// Which rate table an age bracket is looked up in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BracketPurpose {
    Contribution,
    Allocation,
}

/// An age bracket within one of the rate tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AgeBracket {
    pub purpose: BracketPurpose,
    /// Position in the purpose's table
    pub index: usize,
    /// Inclusive upper age bound
    pub max_age: u32,
}

/// Resolves ages and maps them onto rate-table brackets
#[derive(Debug, Clone, Copy)]
pub struct AgeResolver<'a> {
    rates: &'a RateTables,
}

impl<'a> AgeResolver<'a> {
    pub fn new(rates: &'a RateTables) -> Self {
        Self { rates }
    }

    /// Age as of a month, given the birth month
    ///
    /// Equals the calendar-year difference up to and including the birth month,
    /// one more from the month after. Saturates at zero.
    pub fn age(date_of_birth: YearMonth, as_of: YearMonth) -> u32 {
        let year_diff = as_of.year - date_of_birth.year;
        let age = if as_of.month <= date_of_birth.month {
            year_diff
        } else {
            year_diff + 1
        };
        age.max(0) as u32
    }

    /// First bracket whose bound is >= age, else the top bracket
    pub fn bracket(&self, age: u32, purpose: BracketPurpose) -> AgeBracket {
        let (position, count) = match purpose {
            BracketPurpose::Contribution => (
                self.rates.contribution.iter().position(|b| age <= b.max_age),
                self.rates.contribution.len(),
            ),
            BracketPurpose::Allocation => (
                self.rates.allocation.iter().position(|b| age <= b.max_age),
                self.rates.allocation.len(),
            ),
        };
        let index = position.unwrap_or(count.saturating_sub(1));

        let max_age = match purpose {
            BracketPurpose::Contribution => self.rates.contribution.get(index).map(|b| b.max_age),
            BracketPurpose::Allocation => self.rates.allocation.get(index).map(|b| b.max_age),
        };

        AgeBracket {
            purpose,
            index,
            max_age: max_age.unwrap_or(u32::MAX),
        }
    }

    pub fn contribution_rates(&self, age: u32) -> &'a ContributionBracket {
        let bracket = self.bracket(age, BracketPurpose::Contribution);
        &self.rates.contribution[bracket.index]
    }

    pub fn allocation_rates(&self, age: u32) -> &'a AllocationBracket {
        let bracket = self.bracket(age, BracketPurpose::Allocation);
        &self.rates.allocation[bracket.index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_age_changes_the_month_after_birthday() {
        let dob = ym(1985, 2);

        assert_eq!(AgeResolver::age(dob, ym(2020, 1)), 35);
        assert_eq!(AgeResolver::age(dob, ym(2020, 2)), 35);
        assert_eq!(AgeResolver::age(dob, ym(2020, 3)), 36);
        assert_eq!(AgeResolver::age(dob, ym(2020, 12)), 36);
        assert_eq!(AgeResolver::age(dob, ym(2021, 2)), 36);
    }

    #[test]
    fn test_age_before_birth_saturates() {
        assert_eq!(AgeResolver::age(ym(2030, 6), ym(2020, 1)), 0);
    }

    #[test]
    fn test_contribution_brackets() {
        let rates = RateTables::statutory();
        let resolver = AgeResolver::new(&rates);

        assert_eq!(resolver.bracket(25, BracketPurpose::Contribution).max_age, 55);
        assert_eq!(resolver.bracket(55, BracketPurpose::Contribution).max_age, 55);
        assert_eq!(resolver.bracket(56, BracketPurpose::Contribution).max_age, 60);
        assert_eq!(resolver.bracket(66, BracketPurpose::Contribution).max_age, 150);
        // beyond the last bound falls back to the top bracket
        assert_eq!(resolver.bracket(200, BracketPurpose::Contribution).index, 3);
    }

    #[test]
    fn test_allocation_brackets() {
        let rates = RateTables::statutory();
        let resolver = AgeResolver::new(&rates);

        assert_eq!(resolver.bracket(35, BracketPurpose::Allocation).max_age, 35);
        assert_eq!(resolver.bracket(36, BracketPurpose::Allocation).max_age, 45);
        assert_eq!(resolver.bracket(46, BracketPurpose::Allocation).max_age, 50);
        assert_eq!(resolver.bracket(51, BracketPurpose::Allocation).max_age, 55);
        assert_eq!(resolver.bracket(61, BracketPurpose::Allocation).max_age, 65);
        assert_eq!(resolver.allocation_rates(70).ratio.ma, 0.84);
    }
}
