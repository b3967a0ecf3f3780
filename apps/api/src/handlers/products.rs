//! Handlers for a client's products.
//!
//! All routes are nested under `/api/clients/{client_id}`. The owning client
//! is looked up first; a missing client is `404 client not found` no matter
//! what the body holds.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use invoice_core::{validate_product, ProductInput};

use crate::decode::JsonBody;
use crate::error::{ApiError, AppResult};
use crate::params::{ClientId, ProductId};
use crate::state::AppState;

async fn ensure_client(state: &AppState, client_id: i64) -> AppResult<()> {
    if state.db.clients().exists(client_id).await? {
        Ok(())
    } else {
        Err(ApiError::not_found("client"))
    }
}

/// GET /api/clients/{client_id}/products
pub async fn list_products(
    State(state): State<AppState>,
    ClientId(client_id): ClientId,
) -> AppResult<impl IntoResponse> {
    ensure_client(&state, client_id).await?;
    let products = state.db.products().list_for_client(client_id).await?;

    Ok(Json(products))
}

/// POST /api/clients/{client_id}/products
///
/// The client id comes from the route, never from the body.
pub async fn create_product(
    State(state): State<AppState>,
    ClientId(client_id): ClientId,
    body: JsonBody,
) -> AppResult<impl IntoResponse> {
    ensure_client(&state, client_id).await?;

    let input: ProductInput = body.decode()?;
    let product = validate_product(input, client_id)?;
    let created = state.db.products().insert(&product).await?;

    tracing::info!(client_id, product_id = created.id, "Product created");

    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/clients/{client_id}/products/{product_id}
///
/// Full replacement: the body is validated exactly like a create.
pub async fn update_product(
    State(state): State<AppState>,
    ClientId(client_id): ClientId,
    ProductId(product_id): ProductId,
    body: JsonBody,
) -> AppResult<impl IntoResponse> {
    ensure_client(&state, client_id).await?;

    let input: ProductInput = body.decode()?;
    let product = validate_product(input, client_id)?;
    let updated = state.db.products().update(product_id, &product).await?;

    tracing::info!(client_id, product_id, "Product updated");

    Ok(Json(updated))
}

/// DELETE /api/clients/{client_id}/products/{product_id}
pub async fn delete_product(
    State(state): State<AppState>,
    ClientId(client_id): ClientId,
    ProductId(product_id): ProductId,
) -> AppResult<impl IntoResponse> {
    ensure_client(&state, client_id).await?;
    state.db.products().delete(product_id, client_id).await?;

    tracing::info!(client_id, product_id, "Product deleted");

    Ok(StatusCode::NO_CONTENT)
}
