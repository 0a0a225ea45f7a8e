//! Arithmetic service
//!
//! `POST /api/calculate` computes one binary operation, `GET /api/health`
//! reports liveness. This is the counterpart of [`crate::remote::HttpArithmetic`].

use axum::{
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};

use crate::core::{CalcError, Operation};
use crate::remote::{CalculateResponse, ErrorBody};

/// Builds the service router
#[must_use]
pub fn router(cors: bool) -> Router {
    let app = Router::new()
        .route("/api/calculate", post(calculate))
        .route("/api/health", get(health));

    if cors {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        app
    }
}

/// Serves the router on an already bound listener until the task is dropped
pub async fn serve(listener: TcpListener, cors: bool) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, cors, "arithmetic service listening");
    }
    axum::serve(listener, router(cors)).await
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn calculate(body: Bytes) -> Response {
    match evaluate_body(&body) {
        Ok(response) => {
            debug!(
                operation = response.operation.wire_name(),
                a = response.a,
                b = response.b,
                result = response.result,
                "calculated"
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(message) => {
            debug!(%message, "rejected calculation");
            (StatusCode::BAD_REQUEST, Json(ErrorBody::new(message))).into_response()
        }
    }
}

/// Validates a request body and computes the answer, or the error message
fn evaluate_body(body: &[u8]) -> Result<CalculateResponse, String> {
    let data = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) if !map.is_empty() => map,
        _ => return Err("No data provided".to_string()),
    };

    let field = |name: &str| data.get(name).filter(|v| !v.is_null());
    let (Some(operation), Some(a), Some(b)) = (field("operation"), field("a"), field("b")) else {
        return Err("Missing required fields: operation, a, b".to_string());
    };

    let (Some(a), Some(b)) = (parse_operand(a), parse_operand(b)) else {
        return Err("Invalid number format".to_string());
    };

    let op = operation
        .as_str()
        .and_then(Operation::from_wire_name)
        .ok_or_else(|| {
            let shown = operation
                .as_str()
                .map_or_else(|| operation.to_string(), str::to_string);
            format!("Invalid operation: {shown}")
        })?;

    let result = op.apply(a, b).map_err(|e| match e {
        CalcError::DivisionByZero => "Cannot divide by zero".to_string(),
        other => other.to_string(),
    })?;

    Ok(CalculateResponse {
        result,
        operation: op,
        a,
        b,
    })
}

/// Accepts JSON numbers and numeric strings
fn parse_operand(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn eval(body: &str) -> Result<CalculateResponse, String> {
        evaluate_body(body.as_bytes())
    }

    // ===== Body validation =====

    #[test]
    fn test_valid_request() {
        let resp = eval(r#"{"operation":"add","a":2,"b":3}"#).unwrap();
        assert_eq!(resp.result, 5.0);
        assert_eq!(resp.operation, Operation::Add);
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let resp = eval(r#"{"operation":"multiply","a":"2.5","b":" 4 "}"#).unwrap();
        assert_eq!(resp.result, 10.0);
    }

    #[test]
    fn test_no_data() {
        assert_eq!(eval("").unwrap_err(), "No data provided");
        assert_eq!(eval("{}").unwrap_err(), "No data provided");
        assert_eq!(eval("[1,2]").unwrap_err(), "No data provided");
        assert_eq!(eval("not json").unwrap_err(), "No data provided");
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            eval(r#"{"operation":"add","a":1}"#).unwrap_err(),
            "Missing required fields: operation, a, b"
        );
        assert_eq!(
            eval(r#"{"operation":"add","a":1,"b":null}"#).unwrap_err(),
            "Missing required fields: operation, a, b"
        );
    }

    #[test]
    fn test_invalid_number() {
        assert_eq!(
            eval(r#"{"operation":"add","a":"x","b":1}"#).unwrap_err(),
            "Invalid number format"
        );
        assert_eq!(
            eval(r#"{"operation":"add","a":[1],"b":1}"#).unwrap_err(),
            "Invalid number format"
        );
    }

    #[test]
    fn test_invalid_operation() {
        assert_eq!(
            eval(r#"{"operation":"power","a":1,"b":1}"#).unwrap_err(),
            "Invalid operation: power"
        );
        assert_eq!(
            eval(r#"{"operation":7,"a":1,"b":1}"#).unwrap_err(),
            "Invalid operation: 7"
        );
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(
            eval(r#"{"operation":"divide","a":10,"b":0}"#).unwrap_err(),
            "Cannot divide by zero"
        );
    }

    // ===== Router =====

    #[tokio::test]
    async fn test_health_route() {
        let response = router(false)
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_calculate_route_bad_request() {
        let request = Request::post("/api/calculate")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"operation":"divide","a":1,"b":0}"#))
            .unwrap();
        let response = router(true).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_calculate_route_ok() {
        let request = Request::post("/api/calculate")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"operation":"subtract","a":8,"b":3}"#))
            .unwrap();
        let response = router(false).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({ "result": 5.0, "operation": "subtract", "a": 8.0, "b": 3.0 })
        );
    }
}
