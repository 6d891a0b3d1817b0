//! AWS Lambda handler for the CPF endpoints
//!
//! Routes POST /cpf/contribution, /cpf/allocation and /cpf/projection to the
//! calculators and returns `{"results": ...}` or `{"errors": {...}}`.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use cpf_projection::api::{self, ApiResponse};
use cpf_projection::RateTables;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use std::sync::OnceLock;

static RATES: OnceLock<RateTables> = OnceLock::new();

fn rates() -> &'static RateTables {
    RATES.get_or_init(RateTables::statutory)
}

fn cors(builder: lambda_http::http::response::Builder) -> lambda_http::http::response::Builder {
    builder
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

fn json_response(response: &ApiResponse) -> Result<Response<Body>, Error> {
    let body = serde_json::to_string(&response.body)?;
    Ok(cors(Response::builder())
        .status(response.status)
        .header("Content-Type", "application/json")
        .body(Body::Text(body))?)
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(cors(Response::builder()).status(200).body(Body::Empty)?);
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => String::new(),
    };

    let path = event.uri().path().to_string();
    let response = api::handle(rates(), &path, &body_str);

    log::info!(
        "{} {} -> {} in {}ms",
        event.method(),
        path,
        response.status,
        start.elapsed().as_millis()
    );

    json_response(&response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
