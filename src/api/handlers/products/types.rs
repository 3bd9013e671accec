//! Request/response payloads for the product API.
//!
//! These payloads are shared between handlers and `OpenAPI` generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::Product;

/// Envelope used by every successful response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Data<T> {
    pub data: T,
}

impl<T> Data<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Body of `404` responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Documented shape of a create body; handlers read the raw JSON.
#[allow(dead_code)]
#[derive(Debug, ToSchema)]
pub struct CreateProductRequest {
    #[schema(example = "Notebook")]
    pub name: String,
    #[schema(example = 3000)]
    pub price: f64,
}

#[allow(dead_code)]
#[derive(Debug, ToSchema)]
pub struct UpdateProductRequest {
    #[schema(example = "Notebook")]
    pub name: String,
    #[schema(example = 3000)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: bool,
}

/// A product as returned by read endpoints; bookkeeping timestamps are left out.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ProductResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Laptop")]
    pub name: String,
    #[schema(example = 3000)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: bool,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            availability: product.availability,
        }
    }
}

/// A product as returned by write endpoints, timestamps included.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductRecord {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            availability: product.availability,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
