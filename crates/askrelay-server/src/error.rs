//! Application error types and Axum response conversion.

use askrelay_core::RelayError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application-level errors with HTTP status code mapping.
#[derive(Debug)]
pub enum AppError {
    /// The upstream could not be reached or answered unusably.
    BadGateway(String),
    /// The upstream did not answer in time.
    GatewayTimeout(String),
    /// The relay task itself failed.
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::Timeout(_) => AppError::GatewayTimeout(err.to_string()),
            other => AppError::BadGateway(other.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("Relay task failed: {}", err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::GatewayTimeout(msg) => (StatusCode::GATEWAY_TIMEOUT, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relay_errors_map_to_gateway_statuses() {
        let res = AppError::from(RelayError::Transport("connection refused".into())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

        let res = AppError::from(RelayError::UpstreamStatus { status: 500, body: "{}".into() }).into_response();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

        let res = AppError::from(RelayError::Timeout(60_000)).into_response();
        assert_eq!(res.status(), StatusCode::GATEWAY_TIMEOUT);
    }
}
