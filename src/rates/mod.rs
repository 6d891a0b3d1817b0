//! Statutory rate tables: contribution, allocation and interest
//!
//! A `RateTables` value is built once and shared read-only by every calculator.

mod allocation;
mod contribution;
mod interest;
pub mod loader;

pub use allocation::{AccountSplit, AllocationBracket};
pub use contribution::{ContributionBracket, Entity, EntityRates, IncomeBand, IncomeBands, WageCeilings};
pub use interest::InterestRates;

use std::path::Path;

use crate::error::Result;

/// Container for all statutory rates
#[derive(Debug, Clone, PartialEq)]
pub struct RateTables {
    pub income_bands: IncomeBands,
    pub ceilings: WageCeilings,
    /// Sorted by ascending `max_age`, never empty
    pub contribution: Vec<ContributionBracket>,
    /// Sorted by ascending `max_age`, never empty
    pub allocation: Vec<AllocationBracket>,
    pub interest: InterestRates,
}

impl RateTables {
    /// Rates for the single modeled generation of the scheme
    pub fn statutory() -> Self {
        Self {
            income_bands: IncomeBands::default(),
            ceilings: WageCeilings::default(),
            contribution: contribution::statutory_brackets(),
            allocation: allocation::statutory_brackets(),
            interest: InterestRates::default(),
        }
    }

    /// Load contribution and allocation matrices from the default location (data/rates/)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_RATES_PATH))
    }

    /// Load contribution and allocation matrices from a specific directory
    ///
    /// Bands, ceilings and interest rates keep their statutory values.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        Ok(Self {
            contribution: loader::load_contribution_rates(path)?,
            allocation: loader::load_allocation_rates(path)?,
            ..Self::statutory()
        })
    }
}

impl Default for RateTables {
    fn default() -> Self {
        Self::statutory()
    }
}
