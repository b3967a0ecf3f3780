//! # Repository Module
//!
//! Database repository implementations for Stitchbook.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  axum handler                                                          │
//! │       │                                                                 │
//! │       │  db.products().list_for_client(7)                              │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── list_for_client(&self, client_id)                                 │
//! │  ├── insert(&self, product)                                            │
//! │  ├── update(&self, product_id, product)                                │
//! │  └── delete(&self, product_id, client_id)                              │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Repositories take validated values only (NewClient, NewProduct, ...). │
//! │  Nothing here re-validates input.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ClientRepository`](client::ClientRepository) - Client CRUD and existence checks
//! - [`ProductRepository`](product::ProductRepository) - Products scoped by owning client

pub mod client;
pub mod product;
