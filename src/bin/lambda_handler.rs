//! AWS Lambda handler for financing calculations
//!
//! Accepts a `FinancingRequest` as JSON through a Lambda Function URL and
//! returns the schedule, summary and optional payoff projection.
//! Every invocation builds its own engine.

use aws_lambda_events::event::lambda_function_urls::LambdaFunctionUrlRequest;
use financing_calculator::service::handle_json;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{info, warn};
use serde_json::{json, Value};

fn response(status: u16, body: String) -> Value {
    json!({
        "statusCode": status,
        "headers": {
            "Content-Type": "application/json",
            "Access-Control-Allow-Origin": "*",
            "Access-Control-Allow-Methods": "POST, OPTIONS",
            "Access-Control-Allow-Headers": "Content-Type"
        },
        "body": body,
    })
}

fn error_response(status: u16, message: &str) -> Value {
    response(status, json!({ "error": message }).to_string())
}

/// Turn a request into a Function URL response document
fn process(request: &LambdaFunctionUrlRequest) -> Value {
    let method = request
        .request_context
        .http
        .method
        .as_deref()
        .unwrap_or("POST");

    // CORS preflight
    if method == "OPTIONS" {
        return response(200, String::new());
    }

    if request.is_base64_encoded {
        return error_response(400, "Binary request bodies are not supported");
    }

    let body = request.body.as_deref().unwrap_or("{}");
    match handle_json(body) {
        Ok(result) => match serde_json::to_string(&result) {
            Ok(text) => response(200, text),
            Err(e) => error_response(500, &format!("Failed to encode response: {}", e)),
        },
        Err(e) => {
            warn!("Rejected request: {}", e);
            error_response(400, &e.to_string())
        }
    }
}

/// Lambda handler function
async fn handler(event: LambdaEvent<LambdaFunctionUrlRequest>) -> Result<Value, Error> {
    let start = std::time::Instant::now();
    let result = process(&event.payload);
    info!("Request {} handled in {:?}", event.context.request_id, start.elapsed());
    Ok(result)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
