//! Product catalog REST service: CRUD and criteria search over PostgreSQL.

pub mod error;
pub mod filter;
pub mod product;
pub mod sql;
pub mod state;
pub mod store;
pub mod service;
pub mod handlers;
pub mod routes;

pub use error::AppError;
pub use filter::ProductFilter;
pub use product::{Product, ProductDraft};
pub use routes::{common_routes, product_routes};
pub use service::{DraftValidator, ProductService};
pub use state::AppState;
pub use store::{
    ensure_database_exists, ensure_products_table, MemoryProductStore, PgProductStore,
    ProductStore,
};
