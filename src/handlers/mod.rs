//! HTTP handlers for product CRUD and search.

pub mod products;
pub use products::*;
