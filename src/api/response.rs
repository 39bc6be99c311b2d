use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::database::Product;
use crate::error::ApiError;

pub const CREATED_MESSAGE: &str = "Product created successfully.";
pub const UPDATED_MESSAGE: &str = "The product updated successfully.";

/// Successful outcomes of the product endpoints and their wire shapes
#[derive(Debug)]
pub enum ProductResponse {
    /// 200, bare array
    Listed(Vec<Product>),
    /// 200, bare entity
    Shown(Product),
    /// 200, `{message, payload}`
    Created(Product),
    /// 200, `{message, payload}`
    Updated(Product),
    /// 204, empty body
    Deleted,
}

impl ProductResponse {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProductResponse::Deleted => StatusCode::NO_CONTENT,
            _ => StatusCode::OK,
        }
    }
}

impl IntoResponse for ProductResponse {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            ProductResponse::Listed(products) => render(status, &products),
            ProductResponse::Shown(product) => render(status, &product),
            ProductResponse::Created(product) => render(
                status,
                &json!({ "message": CREATED_MESSAGE, "payload": product }),
            ),
            ProductResponse::Updated(product) => render(
                status,
                &json!({ "message": UPDATED_MESSAGE, "payload": product }),
            ),
            ProductResponse::Deleted => status.into_response(),
        }
    }
}

fn render<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_value(body) {
        Ok(value) => (status, Json(value)).into_response(),
        Err(e) => {
            tracing::error!("Failed to serialize response data: {}", e);
            ApiError::StorageFault(e.to_string()).into_response()
        }
    }
}

// Convenience type alias
pub type ProductResult = Result<ProductResponse, ApiError>;
