//! API error handling
//!
//! Every failure leaves the API as `{"error": <kind>, "message": <text>}`.
//! Store failures are logged where they happen; the response only carries
//! a generic message naming the operation that failed.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain_billing::{BillingError, StoreOperation};

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ApiError {
    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_type, message) = match self {
            ApiError::BadRequest(msg) => ("bad_request", msg),
            ApiError::Storage(msg) => ("storage_error", msg),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

/// Client-facing message for a failed store operation
pub fn storage_message(operation: StoreOperation) -> &'static str {
    match operation {
        StoreOperation::Retrieve => "Error retrieving bills",
        StoreOperation::Save => "Error saving bill",
        StoreOperation::Analyze => "Error performing comparison",
    }
}

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        match err {
            BillingError::MissingField(_)
            | BillingError::MissingParameter(_)
            | BillingError::UnsupportedText(_) => ApiError::BadRequest(err.to_string()),
            BillingError::Storage { operation, .. } => {
                ApiError::Storage(storage_message(operation).to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
