//! Router construction: product CRUD/search routes and common service routes.

mod common;
mod products;
pub use common::common_routes;
pub use products::product_routes;
