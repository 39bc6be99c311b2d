use axum::extract::State;

use crate::api::{ProductResponse, ProductResult};
use crate::database::ListScope;
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::ProductRules;

use super::payload::ProductPayload;

/// GET /api/products - every stored product, unpaginated
pub async fn list(State(state): State<AppState>) -> ProductResult {
    let products = state.store.list(ListScope::All).await?;
    tracing::debug!("Listed {} products", products.len());
    Ok(ProductResponse::Listed(products))
}

/// POST /api/products - validate and persist a new product
pub async fn create(State(state): State<AppState>, ProductPayload(input): ProductPayload) -> ProductResult {
    let fields = ProductRules::validate_create(&input)?;

    match state.store.create(fields).await? {
        Some(product) => {
            tracing::info!("Created product {}", product.id);
            Ok(ProductResponse::Created(product))
        }
        None => {
            tracing::warn!("Product store declined the insert");
            Err(ApiError::CreateFailed)
        }
    }
}
