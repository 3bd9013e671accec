//! Persistence seam for products.
//!
//! Handlers only see [`ProductStore`]; the concrete backend is picked at
//! startup and shared as [`SharedStore`]. Values are plain records: updates
//! build a new [`ProductValues`] and hand it to [`ProductStore::update`]
//! instead of mutating a row in place.

pub mod memory;
pub mod postgres;
#[cfg(test)]
pub(crate) mod unavailable;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

pub use memory::MemoryProductStore;
pub use postgres::PgProductStore;

/// A stored product, including the bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The writable part of a product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductValues {
    pub name: String,
    pub price: f64,
    pub availability: bool,
}

impl ProductValues {
    /// Values for a brand new product; availability starts as `true`.
    #[must_use]
    pub fn new(name: String, price: f64) -> Self {
        Self {
            name,
            price,
            availability: true,
        }
    }
}

impl From<&Product> for ProductValues {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price,
            availability: product.availability,
        }
    }
}

/// Columns a listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Price,
}

impl SortField {
    /// Column name used in SQL `ORDER BY` clauses.
    pub(crate) fn as_column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Price => "price",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Ordering applied by [`ProductStore::find_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordering {
    pub field: SortField,
    pub direction: Direction,
}

impl Ordering {
    #[must_use]
    pub const fn new(field: SortField, direction: Direction) -> Self {
        Self { field, direction }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Persist a new product and return it with its assigned id.
    async fn create(&self, values: ProductValues) -> Result<Product, StoreError>;

    /// Every product, sorted by `ordering`.
    async fn find_all(&self, ordering: Ordering) -> Result<Vec<Product>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, StoreError>;

    /// Replace the writable fields of `id`. Returns `None` when the row is gone.
    async fn update(&self, id: i64, values: ProductValues) -> Result<Option<Product>, StoreError>;

    /// Hard delete. Returns `false` when nothing was removed.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    /// Remove every product and restart id assignment.
    async fn reset(&self) -> Result<(), StoreError>;

    /// Cheap connectivity probe.
    async fn ping(&self) -> Result<(), StoreError>;
}

pub type SharedStore = Arc<dyn ProductStore>;
