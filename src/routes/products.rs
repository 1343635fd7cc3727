//! Product routes under /products. The search route is registered as a static
//! segment so it never collides with the :id matcher.

use crate::handlers::products::{create, delete as delete_handler, list, read, search, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn product_routes(state: AppState) -> Router {
    Router::new()
        .route("/products", get(list).post(create))
        .route("/products/search", get(search))
        .route(
            "/products/:id",
            get(read).put(update).delete(delete_handler),
        )
        .with_state(state)
}
