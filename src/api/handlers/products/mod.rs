//! Product endpoints.
//!
//! Every route runs its rule chain from `rules` first; any failure answers
//! `400 {"errors": [...]}` and the store is never touched. Handlers then run a
//! single store operation. Lookups that find nothing answer
//! `404 {"error": "Producto no encontrado"}`.
//!
//! Flow Overview:
//! 1) Validate path id and body against the route's rules.
//! 2) Convert the accepted values into typed `ProductValues`.
//! 3) Resolve the product (routes with an id) or list all of them.
//! 4) Persist the change and wrap the result in `{"data": ...}`.

pub(crate) mod collection;
pub(crate) mod error;
pub(crate) mod item;
mod rules;
pub(crate) mod types;

const PRODUCT_NOT_FOUND: &str = "Producto no encontrado";
const PRODUCT_DELETED: &str = "Producto eliminado";
