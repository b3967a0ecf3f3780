//! # invoice-api: HTTP API for Stitchbook Invoicing
//!
//! Exposes the building blocks (config, state, error envelope, decoding,
//! routes) so the binary entrypoint and integration tests share them.
//!
//! ## Request Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /api/clients/7/products                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  router.rs   cors ─► request id ─► trace ─► timeout ─► catch panic     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  params.rs   ClientId(7)            (else 400 INVALID_ID)               │
//! │  handlers    client exists?         (else 404 client not found)         │
//! │  decode.rs   ProductInput           (else 400 INVALID_JSON / 413)       │
//! │  invoice-core validate_product      (else 400 VALIDATION_FAILED)        │
//! │  invoice-db  ProductRepository      (else 500 DATABASE_ERROR)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  201 Product JSON                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod decode;
pub mod error;
pub mod handlers;
pub mod params;
pub mod router;
pub mod routes;
pub mod state;
pub mod telemetry;
