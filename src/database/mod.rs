pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;

use async_trait::async_trait;
use thiserror::Error;

pub use manager::DatabaseManager;
pub use memory::MemoryProductStore;
pub use models::product::{NewProduct, Product, ProductChanges};
pub use repository::PgProductStore;

/// Faults raised by a product store. `Display` is the raw driver text,
/// which the handlers echo back to the client.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("{0}")]
    Unavailable(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Which rows a listing covers. Only the full table exists today; a paging
/// cursor becomes a new variant without changing `All` callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum ListScope {
    #[default]
    All,
}

/// Persistence collaborator behind the product endpoints
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn list(&self, scope: ListScope) -> Result<Vec<Product>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, StoreError>;

    /// `Ok(None)` means the store declined the insert without a fault
    async fn create(&self, fields: NewProduct) -> Result<Option<Product>, StoreError>;

    async fn update(&self, product: Product, changes: ProductChanges) -> Result<Product, StoreError>;

    async fn delete(&self, product: &Product) -> Result<(), StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
