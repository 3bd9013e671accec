//! `/api/products/{id}`: fetch, replace, toggle availability and delete.

use axum::{
    Json,
    body::Bytes,
    extract::{Extension, Path},
};
use tracing::{debug, instrument};

use super::{
    PRODUCT_DELETED,
    error::ProductError,
    rules,
    types::{Data, ErrorBody, ProductRecord, ProductResponse, UpdateProductRequest},
};
use crate::{
    api::validation::{ValidationErrors, parse_body},
    store::{Product, ProductValues, SharedStore},
};

/// Resolve a validated id or fail with `404`.
async fn find_product(store: &SharedStore, id: i64) -> Result<Product, ProductError> {
    store.find_by_id(id).await?.ok_or(ProductError::NotFound)
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "The ID of the product to retrieve")),
    responses(
        (status = 200, description = "Successful response.", body = Data<ProductResponse>),
        (status = 400, description = "Bad Request - invalid id.", body = ValidationErrors),
        (status = 404, description = "Product not found.", body = ErrorBody),
    ),
    tag = "products"
)]
/// Returns one product without bookkeeping timestamps.
#[instrument(skip(store))]
pub async fn get_product(
    store: Extension<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Data<ProductResponse>>, ProductError> {
    let id = rules::product_id(&id)?;
    let product = find_product(&store, id).await?;

    Ok(Json(Data::new(ProductResponse::from(product))))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "The ID of the product to update")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated.", body = Data<ProductRecord>),
        (status = 400, description = "Bad Request - invalid id or invalid input data.", body = ValidationErrors),
        (status = 404, description = "Product not found.", body = ErrorBody),
    ),
    tag = "products"
)]
/// Replaces `name`, `price` and `availability` of an existing product.
/// The id and body rules run together, so a bad id and bad fields are reported at once.
#[instrument(skip(store, body))]
pub async fn update_product(
    store: Extension<SharedStore>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Data<ProductRecord>>, ProductError> {
    let (id, values) = rules::product_update(&id, parse_body(&body))?;

    find_product(&store, id).await?;
    let product = store
        .update(id, values)
        .await?
        .ok_or(ProductError::NotFound)?;
    debug!("updated product {}", product.id);

    Ok(Json(Data::new(ProductRecord::from(product))))
}

#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "The ID of the product to toggle")),
    responses(
        (status = 200, description = "Availability flipped.", body = Data<ProductRecord>),
        (status = 400, description = "Bad Request - invalid id.", body = ValidationErrors),
        (status = 404, description = "Product not found.", body = ErrorBody),
    ),
    tag = "products"
)]
/// Flips the stored availability. Calling it twice restores the original value.
#[instrument(skip(store))]
pub async fn toggle_availability(
    store: Extension<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Data<ProductRecord>>, ProductError> {
    let id = rules::product_id(&id)?;
    let current = find_product(&store, id).await?;

    let values = ProductValues {
        availability: !current.availability,
        ..ProductValues::from(&current)
    };
    let product = store
        .update(id, values)
        .await?
        .ok_or(ProductError::NotFound)?;
    debug!(
        "product {} availability is now {}",
        product.id, product.availability
    );

    Ok(Json(Data::new(ProductRecord::from(product))))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "The ID of the product to delete")),
    responses(
        (status = 200, description = "Product deleted.", body = Data<String>, example = json!({"data": "Producto eliminado"})),
        (status = 400, description = "Bad Request - invalid id.", body = ValidationErrors),
        (status = 404, description = "Product not found.", body = ErrorBody),
    ),
    tag = "products"
)]
/// Removes the product permanently.
#[instrument(skip(store))]
pub async fn delete_product(
    store: Extension<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Data<String>>, ProductError> {
    let id = rules::product_id(&id)?;
    find_product(&store, id).await?;

    if !store.delete(id).await? {
        return Err(ProductError::NotFound);
    }
    debug!("deleted product {id}");

    Ok(Json(Data::new(PRODUCT_DELETED.to_string())))
}
