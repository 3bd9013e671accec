//! `/api/products`: create and list.

use axum::{Json, body::Bytes, extract::Extension, http::StatusCode};
use tracing::{debug, instrument};

use super::{
    error::ProductError,
    rules,
    types::{CreateProductRequest, Data, ProductRecord, ProductResponse},
};
use crate::{
    api::validation::{ValidationErrors, parse_body},
    store::{Direction, Ordering, SharedStore, SortField},
};

/// Listings are always sorted by price, most expensive first.
const LIST_ORDER: Ordering = Ordering::new(SortField::Price, Direction::Desc);

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created successfully.", body = Data<ProductRecord>),
        (status = 400, description = "Bad Request - invalid input data.", body = ValidationErrors),
    ),
    tag = "products"
)]
/// Creates a product from `name` and `price`; availability starts as `true`.
/// All field rules run and every failure is returned in one `400` response.
#[instrument(skip(store, body))]
pub async fn create_product(
    store: Extension<SharedStore>,
    body: Bytes,
) -> Result<(StatusCode, Json<Data<ProductRecord>>), ProductError> {
    let values = rules::new_product(parse_body(&body))?;

    let product = store.create(values).await?;
    debug!("created product {}", product.id);

    Ok((
        StatusCode::CREATED,
        Json(Data::new(ProductRecord::from(product))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "Products sorted by price, highest first.", body = Data<Vec<ProductResponse>>),
    ),
    tag = "products"
)]
/// Lists every product, most expensive first, without bookkeeping timestamps.
#[instrument(skip(store))]
pub async fn list_products(
    store: Extension<SharedStore>,
) -> Result<Json<Data<Vec<ProductResponse>>>, ProductError> {
    let products = store.find_all(LIST_ORDER).await?;

    Ok(Json(Data::new(
        products.into_iter().map(ProductResponse::from).collect(),
    )))
}
