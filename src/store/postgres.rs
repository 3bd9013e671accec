use super::{Ordering, Product, ProductStore, ProductValues, StoreError};
use async_trait::async_trait;
use sqlx::{Connection, FromRow, PgPool, Row, postgres::PgRow};
use tracing::{Instrument, info_span, instrument};

/// Table definition applied by the connection bootstrap.
pub const SCHEMA_SQL: &str = r"
CREATE TABLE IF NOT EXISTS products (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL CHECK (name <> ''),
    price DOUBLE PRECISION NOT NULL CHECK (price > 0),
    availability BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const PRODUCT_COLUMNS: &str = "id, name, price, availability, created_at, updated_at";

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            availability: row.try_get("availability")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// `PostgreSQL` backed [`ProductStore`].
#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `products` table when it does not exist yet.
    ///
    /// # Errors
    /// Returns an error if the statement cannot be executed.
    pub async fn sync_schema(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    #[instrument(skip(self))]
    async fn create(&self, values: ProductValues) -> Result<Product, StoreError> {
        let query = format!(
            "INSERT INTO products (name, price, availability) VALUES ($1, $2, $3) RETURNING {PRODUCT_COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(&values.name)
            .bind(values.price)
            .bind(values.availability)
            .fetch_one(&self.pool)
            .await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find_all(&self, ordering: Ordering) -> Result<Vec<Product>, StoreError> {
        // Both fragments come from closed enums, never from request input.
        let query = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY {} {}, id ASC",
            ordering.field.as_column(),
            ordering.direction.as_sql()
        );
        let products = sqlx::query_as::<_, Product>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn update(&self, id: i64, values: ProductValues) -> Result<Option<Product>, StoreError> {
        let query = format!(
            r"
            UPDATE products
            SET name = $2, price = $3, availability = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "
        );
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&values.name)
            .bind(values.price)
            .bind(values.availability)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn reset(&self) -> Result<(), StoreError> {
        sqlx::query("TRUNCATE TABLE products RESTART IDENTITY")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let acquire_span = info_span!(
            "db.acquire",
            db.system = "postgresql",
            db.operation = "ACQUIRE"
        );
        let mut conn = self.pool.acquire().instrument(acquire_span).await?;
        let ping_span = info_span!("db.ping", db.system = "postgresql", db.operation = "PING");
        conn.ping().instrument(ping_span).await?;
        Ok(())
    }
}
