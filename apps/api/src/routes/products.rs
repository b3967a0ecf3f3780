//! Route definitions for products, mounted at `/api/clients/{client_id}/products`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// ```text
/// GET    /                -> list_products
/// POST   /                -> create_product
/// PUT    /{product_id}    -> update_product
/// DELETE /{product_id}    -> delete_product
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list_products).post(products::create_product))
        .route(
            "/{product_id}",
            put(products::update_product).delete(products::delete_product),
        )
}
