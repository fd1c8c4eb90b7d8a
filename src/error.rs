//! Error handling module
//!
//! Application-level error type and HTTP response conversion. Domain errors
//! (the operation is invalid) map to 4xx; store and configuration errors
//! (the system cannot serve it right now) map to 5xx.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::config::ConfigError;
use crate::domain::DomainError;
use crate::store::StoreError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Check if this is a client error (the request itself was invalid)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = match &self {
            AppError::Domain(domain_err) => match domain_err {
                DomainError::InvalidMoney(e) => {
                    (StatusCode::BAD_REQUEST, "invalid_money", Some(e.to_string()))
                }
                DomainError::MixedCurrency { .. } => {
                    (StatusCode::BAD_REQUEST, "mixed_currency", Some(domain_err.to_string()))
                }
                DomainError::InvalidTransition { .. } => {
                    (StatusCode::CONFLICT, "invalid_transition", Some(domain_err.to_string()))
                }
                DomainError::InactiveMerchant(id) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "inactive_merchant", Some(id.to_string()))
                }
            },

            // Already logged by the store client
            AppError::Store(StoreError::Timeout(_)) => {
                (StatusCode::GATEWAY_TIMEOUT, "store_timeout", None)
            }
            AppError::Store(StoreError::Connection(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", None)
            }
            AppError::Store(StoreError::Response { .. }) => {
                (StatusCode::BAD_GATEWAY, "store_response_error", None)
            }
            AppError::Store(StoreError::Client(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "store_client_error", None)
            }

            AppError::Config(e) => {
                tracing::error!("Config error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "config_error", None)
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
