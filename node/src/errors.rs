// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use axiom_kernel::error::KernelError;

use crate::store::StoreError;

/// Failure of one audit tick.
#[derive(Error, Debug)]
pub enum AuditError {
    /// Missing or malformed local configuration or deployment settings. Never retried.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// Ledger read failed on every attempt.
    #[error("Network error: anchor read failed after {attempts} attempts: {message}")]
    Network { attempts: u32, message: String },
    /// Any document-store read or write failure.
    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AuditError {
    pub fn kind(&self) -> &'static str {
        match self {
            AuditError::Configuration(_) => "ConfigurationError",
            AuditError::Network { .. } => "NetworkError",
            AuditError::Persistence(_) => "PersistenceError",
            AuditError::Unexpected(_) => "UnexpectedError",
        }
    }
}

impl From<KernelError> for AuditError {
    fn from(e: KernelError) -> Self {
        match e {
            KernelError::InvalidConfiguration(_)
            | KernelError::NonFiniteWeight { .. }
            | KernelError::InvalidAddress(_) => AuditError::Configuration(e.to_string()),
            KernelError::InvalidHash(_) | KernelError::InvalidCallResult(_) => AuditError::Unexpected(e.to_string()),
        }
    }
}

impl IntoResponse for AuditError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuditError::Configuration(_) => StatusCode::BAD_REQUEST,
            AuditError::Network { .. } => StatusCode::BAD_GATEWAY,
            AuditError::Persistence(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AuditError::Persistence(_) | AuditError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
            "kind": self.kind(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_errors_map_to_taxonomy() {
        let e: AuditError = KernelError::InvalidConfiguration("weights field is missing".into()).into();
        assert_eq!(e.kind(), "ConfigurationError");
        let e: AuditError = KernelError::InvalidCallResult("0x".into()).into();
        assert_eq!(e.kind(), "UnexpectedError");
    }

    #[test]
    fn test_response_status() {
        let resp = AuditError::Network { attempts: 3, message: "timeout".into() }.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let resp = AuditError::Configuration("RPC_URL is not set".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
