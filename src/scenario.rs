//! Scenario runner for batch projections
//!
//! Loads rate tables once, then runs many projections against them. Rate
//! tables are read-only, so projections run in parallel on the rayon pool.

use rayon::prelude::*;
use std::path::Path;

use crate::error::Result;
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionInputs, ProjectionResult};
use crate::rates::RateTables;

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
///
/// // Same member under different salary growth assumptions
/// let configs: Vec<ProjectionConfig> = [0.0, 0.02, 0.04]
///     .iter()
///     .map(|&g| ProjectionConfig { salary_growth: g, ..base.clone() })
///     .collect();
/// let results = runner.run_scenarios(&member, &configs);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    rates: RateTables,
}

impl ScenarioRunner {
    /// Runner on the built-in statutory rates
    pub fn new() -> Self {
        Self {
            rates: RateTables::statutory(),
        }
    }

    /// Runner on rate tables loaded from the default CSV directory
    pub fn from_csv() -> Result<Self> {
        Ok(Self {
            rates: RateTables::from_csv()?,
        })
    }

    pub fn from_csv_path(path: &Path) -> Result<Self> {
        Ok(Self {
            rates: RateTables::from_csv_path(path)?,
        })
    }

    /// Single projection
    pub fn run(&self, inputs: &ProjectionInputs, config: ProjectionConfig) -> ProjectionResult {
        ProjectionEngine::new(&self.rates, config).project(inputs)
    }

    /// Many members under the same config
    pub fn run_batch(&self, members: &[ProjectionInputs], config: ProjectionConfig) -> Vec<ProjectionResult> {
        let engine = ProjectionEngine::new(&self.rates, config);
        members.par_iter().map(|m| engine.project(m)).collect()
    }

    /// One member under many configs
    pub fn run_scenarios(&self, inputs: &ProjectionInputs, configs: &[ProjectionConfig]) -> Vec<ProjectionResult> {
        configs
            .par_iter()
            .map(|config| ProjectionEngine::new(&self.rates, config.clone()).project(inputs))
            .collect()
    }

    pub fn rates(&self) -> &RateTables {
        &self.rates
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
