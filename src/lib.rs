//! CPF Projection - contribution, allocation and balance projection engine
//!
//! This library provides:
//! - Monthly contributions by age bracket and income band, with wage ceilings
//! - Allocation of contributions into the Ordinary, Special and Medical accounts
//! - Monthly interest with the extra-interest waterfall
//! - Single-year and multi-year balance projections with top-ups and withdrawals
//! - Request validation and wire-format reports for the HTTP surface

pub mod error;
pub mod money;
pub mod period;
pub mod rates;
pub mod age;
pub mod contribution;
pub mod allocation;
pub mod projection;
pub mod report;
pub mod api;
pub mod scenario;

// Re-export commonly used types
pub use error::{CpfError, Result};
pub use period::{Period, YearMonth};
pub use rates::{AccountSplit, Entity, RateTables};
pub use age::AgeResolver;
pub use contribution::{ContributionCalculator, ContributionPeriod};
pub use allocation::AllocationCalculator;
pub use projection::{
    AccountBalances, AgeSource, AnnualProjector, CashFlowEvent, Horizon, InterestEngine, ProjectionConfig,
    ProjectionEngine, ProjectionInputs, ProjectionResult,
};
pub use scenario::ScenarioRunner;
