//! Route handlers for the products service.

pub mod health;
pub mod products;
