//! In-process [`ProductStore`] used by tests and `--dsn memory://`.

use super::{Direction, Ordering, Product, ProductStore, ProductValues, SortField, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use std::{cmp, collections::BTreeMap};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Product>,
}

#[derive(Debug, Default)]
pub struct MemoryProductStore {
    table: RwLock<Table>,
}

impl MemoryProductStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare(a: &Product, b: &Product, field: SortField) -> cmp::Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Name => a.name.cmp(&b.name),
        SortField::Price => a.price.total_cmp(&b.price),
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn create(&self, values: ProductValues) -> Result<Product, StoreError> {
        let mut table = self.table.write().await;
        table.next_id += 1;
        let now = Utc::now();
        let product = Product {
            id: table.next_id,
            name: values.name,
            price: values.price,
            availability: values.availability,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(product.id, product.clone());
        Ok(product)
    }

    async fn find_all(&self, ordering: Ordering) -> Result<Vec<Product>, StoreError> {
        let table = self.table.read().await;
        let mut products: Vec<Product> = table.rows.values().cloned().collect();
        products.sort_by(|a, b| {
            let order = compare(a, b, ordering.field);
            let order = match ordering.direction {
                Direction::Asc => order,
                Direction::Desc => order.reverse(),
            };
            order.then(a.id.cmp(&b.id))
        });
        Ok(products)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, StoreError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn update(&self, id: i64, values: ProductValues) -> Result<Option<Product>, StoreError> {
        let mut table = self.table.write().await;
        let Some(row) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        row.name = values.name;
        row.price = values.price;
        row.availability = values.availability;
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn reset(&self) -> Result<(), StoreError> {
        *self.table.write().await = Table::default();
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
