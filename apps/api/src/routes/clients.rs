//! Route definitions for clients, mounted at `/api/clients`.

use axum::routing::get;
use axum::Router;

use crate::handlers::clients;
use crate::state::AppState;

/// ```text
/// GET    /               -> list_clients
/// POST   /               -> create_client
/// GET    /{client_id}    -> get_client
/// PATCH  /{client_id}    -> patch_client
/// DELETE /{client_id}    -> delete_client
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(clients::list_clients).post(clients::create_client))
        .route(
            "/{client_id}",
            get(clients::get_client)
                .patch(clients::patch_client)
                .delete(clients::delete_client),
        )
}
