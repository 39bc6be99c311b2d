use axum::extract::{rejection::PathRejection, Path, State};

use crate::api::{ProductResponse, ProductResult};
use crate::database::{Product, ProductStore};
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::{ProductId, ProductRules, ValidationError};

use super::payload::ProductPayload;

/// Resolve a checked identifier to a stored product, or the not-found outcome
async fn locate(store: &dyn ProductStore, id: ProductId) -> Result<Product, ApiError> {
    let Some(key) = id.key() else {
        tracing::debug!("Identifier cannot address a product row");
        return Err(ApiError::NotFound);
    };

    match store.find_by_id(key).await? {
        Some(product) => Ok(product),
        None => {
            tracing::debug!("Product {} not found", key);
            Err(ApiError::NotFound)
        }
    }
}

/// Check the raw path segment. A segment axum cannot decode (invalid UTF-8)
/// is as non-numeric as any other.
fn parse_id(path: Result<Path<String>, PathRejection>) -> Result<ProductId, ApiError> {
    match path {
        Ok(Path(raw)) => Ok(ProductId::parse(&raw)?),
        Err(rejection) => {
            tracing::debug!("Undecodable product identifier: {}", rejection);
            Err(ValidationError::InvalidIdentifier.into())
        }
    }
}

/// GET /api/products/:id - a single product
pub async fn show(State(state): State<AppState>, path: Result<Path<String>, PathRejection>) -> ProductResult {
    let id = parse_id(path)?;
    let product = locate(state.store.as_ref(), id).await?;
    Ok(ProductResponse::Shown(product))
}

/// PUT /api/products/:id - merge the supplied fields into a product.
///
/// The body is checked before the identifier, so a request that is wrong on
/// both counts reports the field error.
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    ProductPayload(input): ProductPayload,
) -> ProductResult {
    let changes = ProductRules::validate_update(&input)?;
    let id = parse_id(path)?;
    let product = locate(state.store.as_ref(), id).await?;

    let updated = state.store.update(product, changes).await?;
    tracing::info!("Updated product {}", updated.id);
    Ok(ProductResponse::Updated(updated))
}

/// DELETE /api/products/:id - hard delete
pub async fn delete(State(state): State<AppState>, path: Result<Path<String>, PathRejection>) -> ProductResult {
    let id = parse_id(path)?;
    let product = locate(state.store.as_ref(), id).await?;

    state.store.delete(&product).await?;
    tracing::info!("Deleted product {}", product.id);
    Ok(ProductResponse::Deleted)
}
