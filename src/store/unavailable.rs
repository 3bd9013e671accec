//! A store whose backend is always down, for exercising failure paths.

use super::{Ordering, Product, ProductStore, ProductValues, StoreError};
use async_trait::async_trait;

pub(crate) struct UnavailableStore;

fn down() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl ProductStore for UnavailableStore {
    async fn create(&self, _: ProductValues) -> Result<Product, StoreError> {
        Err(down())
    }

    async fn find_all(&self, _: Ordering) -> Result<Vec<Product>, StoreError> {
        Err(down())
    }

    async fn find_by_id(&self, _: i64) -> Result<Option<Product>, StoreError> {
        Err(down())
    }

    async fn update(&self, _: i64, _: ProductValues) -> Result<Option<Product>, StoreError> {
        Err(down())
    }

    async fn delete(&self, _: i64) -> Result<bool, StoreError> {
        Err(down())
    }

    async fn reset(&self) -> Result<(), StoreError> {
        Err(down())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(down())
    }
}
