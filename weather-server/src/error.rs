//! API error handling
//!
//! Every gateway failure is rendered as `{ "message", "code", "details"? }`.
//! `details` is only filled in development mode so upstream and internal
//! detail never reaches production clients.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use weather_core::GatewayError;

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable human-readable message
    pub message: String,
    /// Machine-readable error code
    pub code: String,
    /// Internal detail, development mode only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// A gateway failure bound to the request's detail-exposure policy.
#[derive(Debug)]
pub struct ApiError {
    error: GatewayError,
    expose_details: bool,
}

impl ApiError {
    pub fn new(error: GatewayError, expose_details: bool) -> Self {
        Self { error, expose_details }
    }

    /// Status code and public message for the wrapped error.
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match &self.error {
            GatewayError::InvalidQuery(_) => (StatusCode::BAD_REQUEST, "city is required"),
            GatewayError::CityNotFound(_) => (StatusCode::NOT_FOUND, "City not found"),
            GatewayError::UpstreamUnavailable { status, .. } => {
                let status = StatusCode::from_u16(*status)
                    .ok()
                    .filter(StatusCode::is_server_error)
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                (status, "Weather service unavailable")
            },
            GatewayError::UpstreamUnreachable(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch weather data")
            },
            GatewayError::ConfigurationMissing(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Server is not configured")
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let code = self.error.code();

        if status.is_server_error() {
            tracing::error!(code, status = %status, error = %self.error, "weather query failed");
        } else {
            tracing::debug!(code, status = %status, error = %self.error, "weather query rejected");
        }

        let body = ErrorResponse {
            message: message.to_string(),
            code: code.to_string(),
            details: self.expose_details.then(|| self.error.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(error: GatewayError) -> StatusCode {
        ApiError::new(error, false).into_response().status()
    }

    #[test]
    fn invalid_query_is_bad_request() {
        assert_eq!(status_of(GatewayError::InvalidQuery(None)), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn city_not_found_is_not_found() {
        assert_eq!(status_of(GatewayError::CityNotFound(None)), StatusCode::NOT_FOUND);
    }

    #[test]
    fn upstream_server_errors_pass_through() {
        let err = GatewayError::UpstreamUnavailable { status: 503, message: None };
        assert_eq!(status_of(err), StatusCode::SERVICE_UNAVAILABLE);

        let err = GatewayError::UpstreamUnavailable { status: 500, message: None };
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn upstream_client_errors_become_bad_gateway() {
        for status in [400, 401, 429] {
            let err = GatewayError::UpstreamUnavailable { status, message: None };
            assert_eq!(status_of(err), StatusCode::BAD_GATEWAY);
        }
    }

    #[test]
    fn unreachable_and_missing_config_are_internal() {
        assert_eq!(
            status_of(GatewayError::UpstreamUnreachable(None)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(GatewayError::ConfigurationMissing(None)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_response_omits_details_by_default() {
        let resp = ErrorResponse {
            message: "City not found".to_string(),
            code: "city_not_found".to_string(),
            details: None,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("message"));
        assert!(json.contains("code"));
        assert!(!json.contains("details"));
    }
}
