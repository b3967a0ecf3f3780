//! # invoice-core: Pure Business Logic for Stitchbook Invoicing
//!
//! This crate is the **heart** of Stitchbook. It owns the input-validation
//! and money-normalization layer as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Stitchbook Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (Vite SPA)                          │   │
//! │  │    Clients ──► Products ──► Invoices                           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │    strict decode, route ids, error envelope                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ invoice-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │validation │  │  client / │  │   │
//! │  │   │  Client   │  │   Money   │  │ text, int │  │  product  │  │   │
//! │  │   │  Product  │  │  parser   │  │ email, £  │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    invoice-db (Database Layer)                  │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types and request DTOs
//! - [`money`] - Money type and exact decimal parser
//! - [`error`] - Field error model
//! - [`validation`] - Field validators (text, email, int, money)
//! - [`client`] - Client create/patch rules
//! - [`product`] - Product pricing rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output, safe from any thread
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: amounts are pence (i64), parsed from text, never floats
//! 4. **Collected Errors**: validators return every field error, never panic
//!
//! ## Example Usage
//!
//! ```rust
//! use invoice_core::product::validate_product;
//! use invoice_core::types::ProductInput;
//!
//! let input = ProductInput {
//!     product_type: Some("sample".into()),
//!     pricing_mode: Some("hourly".into()),
//!     product_name: Some("Pattern Adjustment".into()),
//!     hourly_rate: Some("30".into()),
//!     minutes_worked: Some("90".into()),
//!     ..Default::default()
//! };
//!
//! let product = validate_product(input, 1).unwrap();
//! assert_eq!(product.hourly_rate_minor, Some(3000));
//! assert_eq!(product.minutes_worked, Some(90));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod error;
pub mod money;
pub mod product;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use invoice_core::Money` instead of
// `use invoice_core::money::Money`

pub use client::{validate_client_create, validate_client_patch};
pub use error::{FieldCode, FieldError, ValidationErrors};
pub use money::Money;
pub use product::validate_product;
pub use types::*;
