//! ProductService: CRUD and search orchestration over the store, plus
//! boundary validation of incoming drafts.

mod products;
mod validation;
pub use products::ProductService;
pub use validation::DraftValidator;
