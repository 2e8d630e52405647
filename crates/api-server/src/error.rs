//! Mapping from the gateway error taxonomy to transport responses.

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use supacheck_core::GatewayError;

/// Every failure body carries at least `error`; `details` and `message`
/// appear only for the variants that define them.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn unauthorized() -> Self {
        Self {
            error: "Missing or invalid authorization token".to_string(),
            details: None,
            message: None,
        }
    }
}

/// Deterministic variant-to-status mapping. Upstream statuses are mirrored;
/// out-of-range codes fall back to 500.
pub fn gateway_error_response(err: GatewayError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        GatewayError::Upstream { status, body } => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(ErrorResponse {
                error: "Error from Supabase API".to_string(),
                details: Some(body),
                message: None,
            }),
        ),
        GatewayError::Unreachable => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "No response from Supabase API".to_string(),
                details: Some(serde_json::Value::String(
                    "The service might be unavailable".to_string(),
                )),
                message: None,
            }),
        ),
        GatewayError::Fault(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Internal server error".to_string(),
                details: None,
                message: Some(message),
            }),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn upstream_status_is_mirrored() {
        let (status, Json(body)) = gateway_error_response(GatewayError::Upstream {
            status: 429,
            body: json!({"message": "rate limited"}),
        });
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body.error, "Error from Supabase API");
        assert_eq!(body.details, Some(json!({"message": "rate limited"})));
        assert!(body.message.is_none());
    }

    #[test]
    fn out_of_range_upstream_status_falls_back_to_500() {
        let (status, _) = gateway_error_response(GatewayError::Upstream {
            status: 42,
            body: json!(null),
        });
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unreachable_maps_to_503() {
        let (status, Json(body)) = gateway_error_response(GatewayError::Unreachable);
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.error, "No response from Supabase API");
        assert_eq!(body.details, Some(json!("The service might be unavailable")));
    }

    #[test]
    fn fault_maps_to_500_with_message() {
        let (status, Json(body)) =
            gateway_error_response(GatewayError::Fault("boom".to_string()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Internal server error");
        assert_eq!(body.message.as_deref(), Some("boom"));
    }
}
