// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::StoreError;
use crate::validation::ValidationError;

pub const NOT_FOUND_MESSAGE: &str = "The Product not found.";
pub const CREATE_FAILED_MESSAGE: &str = "Unable to create the Product.";
pub const UNAUTHENTICATED_MESSAGE: &str = "Unauthenticated.";

/// Every non-success outcome of the product endpoints
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    CreateFailed,

    // 401 Unauthorized
    Unauthorized(String),

    // 422 Unprocessable Entity (bad identifier, field rules, and absent products)
    Validation(ValidationError),
    NotFound,

    // 200 OK with the raw fault text; storage faults never leak as 5xx
    StorageFault(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::CreateFailed => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Validation(_) => 422,
            ApiError::NotFound => 422,
            ApiError::StorageFault(_) => 200,
        }
    }

    /// Get client-facing message
    pub fn message(&self) -> String {
        match self {
            ApiError::CreateFailed => CREATE_FAILED_MESSAGE.to_string(),
            ApiError::Unauthorized(_) => UNAUTHENTICATED_MESSAGE.to_string(),
            ApiError::Validation(err) => err.message(),
            ApiError::NotFound => NOT_FOUND_MESSAGE.to_string(),
            ApiError::StorageFault(msg) => msg.clone(),
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::Validation(err) => err.to_json(),
            ApiError::StorageFault(msg) => json!([msg]),
            _ => json!({ "message": self.message() }),
        }
    }
}

impl ApiError {
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        ApiError::Unauthorized(reason.into())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!("Product store fault: {}", err);
        ApiError::StorageFault(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Unauthorized(reason) => write!(f, "{}: {}", UNAUTHENTICATED_MESSAGE, reason),
            _ => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}
