//! Error types for rate-table loading and request validation
//!
//! The calculation engine itself has no recoverable error path; everything here
//! is raised before the engine is invoked.

use thiserror::Error;

/// Errors raised while loading rate tables or validating a request
#[derive(Debug, Error)]
pub enum CpfError {
    #[error("failed to read rate table: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed rate table: {0}")]
    Csv(#[from] csv::Error),

    #[error("rate table {table}: {reason}")]
    RateTable { table: &'static str, reason: String },

    #[error("parameter \"{field}\": {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("parameter \"{0}\" not found")]
    MissingParameter(String),

    #[error("invalid period \"{0}\", expected YYYY or YYYYMM")]
    InvalidPeriod(String),

    #[error("at least one of (n_years, target_year) must be present")]
    MissingHorizon,
}

impl CpfError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CpfError::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the request field at fault, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            CpfError::InvalidParameter { field, .. } => Some(field),
            CpfError::MissingParameter(field) => Some(field),
            CpfError::InvalidPeriod(_) => Some("period"),
            CpfError::MissingHorizon => Some("n_years"),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CpfError>;
