//! Balance projection: monthly interest, single years and multi-year runs

mod state;
mod interest;
mod annual;
mod engine;
mod results;
pub mod cashflows;

pub use state::AccountBalances;
pub use interest::InterestEngine;
pub use annual::{AgeSource, AnnualProjector, YearInputs};
pub use engine::{Horizon, ProjectionConfig, ProjectionEngine, ProjectionInputs};
pub use results::{AnnualResult, ProjectionResult};
pub use cashflows::{CashFlowEvent, CashFlowKind, Frequency, Recurrence};
