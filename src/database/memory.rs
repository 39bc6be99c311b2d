use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::database::models::product::normalize_price;
use crate::database::{ListScope, NewProduct, Product, ProductChanges, ProductStore, StoreError};

/// Process-local `ProductStore`. Identifiers come from a counter that never
/// goes backwards, so a deleted id is not handed out again.
pub struct MemoryProductStore {
    state: RwLock<MemoryState>,
    capacity: Option<usize>,
}

struct MemoryState {
    rows: BTreeMap<i64, Product>,
    next_id: i64,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
            capacity: None,
        }
    }

    /// A store that declines inserts once it holds `capacity` rows
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::new()
        }
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list(&self, scope: ListScope) -> Result<Vec<Product>, StoreError> {
        let state = self.state.read().await;
        match scope {
            ListScope::All => Ok(state.rows.values().cloned().collect()),
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, StoreError> {
        Ok(self.state.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, fields: NewProduct) -> Result<Option<Product>, StoreError> {
        let mut state = self.state.write().await;
        if let Some(capacity) = self.capacity {
            if state.rows.len() >= capacity {
                tracing::debug!("Memory store at capacity ({}), declining insert", capacity);
                return Ok(None);
            }
        }

        let id = state.next_id;
        state.next_id += 1;

        let now = Utc::now();
        let product = Product {
            id,
            name: fields.name,
            description: fields.description,
            price: normalize_price(fields.price),
            created_at: now,
            updated_at: now,
        };
        state.rows.insert(id, product.clone());
        Ok(Some(product))
    }

    async fn update(&self, product: Product, changes: ProductChanges) -> Result<Product, StoreError> {
        let mut state = self.state.write().await;
        let stored = state
            .rows
            .get_mut(&product.id)
            .ok_or_else(|| StoreError::Unavailable(format!("No query results for model [Product] {}", product.id)))?;

        if !changes.is_empty() {
            changes.apply_to(stored);
            stored.updated_at = Utc::now();
        }
        Ok(stored.clone())
    }

    async fn delete(&self, product: &Product) -> Result<(), StoreError> {
        self.state.write().await.rows.remove(&product.id);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
