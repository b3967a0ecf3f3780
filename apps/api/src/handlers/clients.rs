//! Handlers for clients.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use invoice_core::{validate_client_create, validate_client_patch, ClientCreateInput, ClientPatchInput};

use crate::decode::StrictJson;
use crate::error::{ApiError, AppResult};
use crate::params::ClientId;
use crate::state::AppState;

/// POST /api/clients
///
/// Validates and stores a client; responds 201 with the stored row.
pub async fn create_client(
    State(state): State<AppState>,
    StrictJson(input): StrictJson<ClientCreateInput>,
) -> AppResult<impl IntoResponse> {
    let client = validate_client_create(input)?;
    let created = state.db.clients().insert(&client).await?;

    tracing::info!(client_id = created.id, "Client created");

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/clients
///
/// Every client, newest first.
pub async fn list_clients(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let clients = state.db.clients().list().await?;

    Ok(Json(clients))
}

/// GET /api/clients/{client_id}
pub async fn get_client(
    State(state): State<AppState>,
    ClientId(client_id): ClientId,
) -> AppResult<impl IntoResponse> {
    let client = state
        .db
        .clients()
        .get_by_id(client_id)
        .await?
        .ok_or_else(|| ApiError::not_found("client"))?;

    Ok(Json(client))
}

/// PATCH /api/clients/{client_id}
///
/// Only the keys present in the body are validated and written. An empty
/// string clears an optional field.
pub async fn patch_client(
    State(state): State<AppState>,
    ClientId(client_id): ClientId,
    StrictJson(input): StrictJson<ClientPatchInput>,
) -> AppResult<impl IntoResponse> {
    let patch = validate_client_patch(input)?;
    state.db.clients().patch(client_id, &patch).await?;

    tracing::info!(client_id, "Client updated");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/clients/{client_id}
///
/// Products are removed with the client. A client referenced by invoices
/// can't be deleted; that surfaces as `DATABASE_ERROR`.
pub async fn delete_client(
    State(state): State<AppState>,
    ClientId(client_id): ClientId,
) -> AppResult<impl IntoResponse> {
    state.db.clients().delete(client_id).await?;

    tracing::info!(client_id, "Client deleted");

    Ok(StatusCode::NO_CONTENT)
}
