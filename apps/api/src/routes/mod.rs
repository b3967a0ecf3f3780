pub mod clients;
pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /clients                                         list, create
/// /clients/{client_id}                             get, patch, delete
/// /clients/{client_id}/products                    list, create
/// /clients/{client_id}/products/{product_id}       replace, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/clients", clients::router())
        .nest("/clients/{client_id}/products", products::router())
}
