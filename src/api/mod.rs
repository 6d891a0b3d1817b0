//! Request handling for the HTTP surface
//!
//! Routes a path and JSON body to a calculator and wraps the report as
//! `{"results": ...}`, or `{"errors": {field: reason}}` on failure. Transport
//! details (headers, CORS) stay in the binary.

mod request;

pub use request::{
    AllocationParams, AllocationRequest, BaseBalances, CashFlowInput, ContributionParams, ContributionRequest,
    ProjectionParams, ProjectionRequest,
};

use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::allocation::AllocationCalculator;
use crate::contribution::ContributionCalculator;
use crate::error::CpfError;
use crate::period::YearMonth;
use crate::projection::ProjectionEngine;
use crate::rates::RateTables;
use crate::report::{AllocationReport, ContributionReport, ProjectionReport};

/// Routes served by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Contribution,
    Allocation,
    Projection,
}

impl Endpoint {
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "/cpf/contribution" => Some(Endpoint::Contribution),
            "/cpf/allocation" => Some(Endpoint::Allocation),
            "/cpf/projection" => Some(Endpoint::Projection),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Contribution => "/cpf/contribution",
            Endpoint::Allocation => "/cpf/allocation",
            Endpoint::Projection => "/cpf/projection",
        }
    }
}

/// Status code and JSON body of a handled request
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn ok<T: Serialize>(results: &T) -> Self {
        match serde_json::to_value(results) {
            Ok(value) => Self {
                status: 200,
                body: json!({ "results": value }),
            },
            Err(e) => Self::errors(500, json!({ "body": e.to_string() })),
        }
    }

    fn errors(status: u16, errors: Value) -> Self {
        Self {
            status,
            body: json!({ "errors": errors }),
        }
    }

    fn from_error(err: &CpfError) -> Self {
        match err {
            CpfError::MissingHorizon => {
                let reason = "At least one of (n_years, target_year) must be present";
                Self::errors(400, json!({ "n_years": reason, "target_year": reason }))
            }
            CpfError::MissingParameter(field) => Self::errors(400, field_error(field, "Parameter not found")),
            CpfError::InvalidParameter { field, reason } => Self::errors(422, field_error(field, reason.as_str())),
            CpfError::InvalidPeriod(_) => Self::errors(422, json!({ "period": err.to_string() })),
            _ => Self::errors(500, json!({ "body": err.to_string() })),
        }
    }
}

fn field_error(field: &str, reason: &str) -> Value {
    let mut errors = Map::new();
    errors.insert(field.to_string(), Value::String(reason.to_string()));
    Value::Object(errors)
}

pub fn contribution(rates: &RateTables, params: &ContributionParams) -> ContributionReport {
    let summary =
        ContributionCalculator::new(rates).summary(params.annual_salary, params.bonus, params.age, params.period);
    ContributionReport::from(&summary)
}

pub fn allocation(rates: &RateTables, params: &AllocationParams) -> AllocationReport {
    let summary = AllocationCalculator::new(rates).summary(params.annual_salary, params.bonus, params.age);
    AllocationReport::from(&summary)
}

pub fn projection(rates: &RateTables, params: &ProjectionParams) -> ProjectionReport {
    let result = ProjectionEngine::new(rates, params.config.clone()).project(&params.inputs);
    ProjectionReport::from(&result)
}

fn parse<T: DeserializeOwned>(body: &str) -> Result<T, ApiResponse> {
    let body = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(body).map_err(|e| {
        warn!("Rejected request body: {}", e);
        ApiResponse::errors(400, json!({ "body": e.to_string() }))
    })
}

/// Handle a request as of a given month (used to resolve ages and default starts)
pub fn handle_at(rates: &RateTables, path: &str, body: &str, as_of: YearMonth) -> ApiResponse {
    let endpoint = match Endpoint::from_path(path) {
        Some(endpoint) => endpoint,
        None => return ApiResponse::errors(404, json!({ "path": format!("{} not found", path) })),
    };
    info!("Calling endpoint {}", endpoint.path());

    let outcome = match endpoint {
        Endpoint::Contribution => parse::<ContributionRequest>(body).and_then(|req| {
            req.validate(as_of)
                .map(|params| ApiResponse::ok(&contribution(rates, &params)))
                .map_err(|e| ApiResponse::from_error(&e))
        }),
        Endpoint::Allocation => parse::<AllocationRequest>(body).and_then(|req| {
            req.validate(as_of)
                .map(|params| ApiResponse::ok(&allocation(rates, &params)))
                .map_err(|e| ApiResponse::from_error(&e))
        }),
        Endpoint::Projection => parse::<ProjectionRequest>(body).and_then(|req| {
            req.validate(as_of)
                .map(|params| ApiResponse::ok(&projection(rates, &params)))
                .map_err(|e| ApiResponse::from_error(&e))
        }),
    };

    match outcome {
        Ok(response) => response,
        Err(response) => {
            warn!("{} failed with status {}", endpoint.path(), response.status);
            response
        }
    }
}

/// Handle a request as of the current month
pub fn handle(rates: &RateTables, path: &str, body: &str) -> ApiResponse {
    handle_at(rates, path, body, YearMonth::current())
}
