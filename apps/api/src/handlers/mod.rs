//! Request handlers, grouped by resource.
//!
//! Every handler follows the same shape: route ids, then body, then
//! validation, then storage. Validation never touches the database.

pub mod clients;
pub mod products;
