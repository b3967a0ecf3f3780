//! Route id parameters.
//!
//! Ids are extracted before the body, so a bad id is reported as
//! `INVALID_ID` even when the body is also broken.
//!
//! ```text
//! /api/clients/{client_id}/products/{product_id}
//!               │                    │
//!               ▼                    ▼
//!          ClientId(i64)       ProductId(i64)     (positive, else 400 INVALID_ID)
//! ```

use std::collections::HashMap;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::error::ApiError;

/// Parses a route id: a base-10 `i64` greater than zero.
///
/// `field` names the parameter in the resulting field error.
pub fn parse_id(raw: &str, field: &str) -> Result<i64, ApiError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::invalid_id(field)),
    }
}

async fn path_id<S>(parts: &mut Parts, state: &S, param: &str, field: &str) -> Result<i64, ApiError>
where
    S: Send + Sync,
{
    let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
        .await
        .map_err(|_| ApiError::invalid_id(field))?;

    let raw = params
        .get(param)
        .ok_or_else(|| ApiError::internal(format!("route has no `{param}` segment")))?;

    parse_id(raw, field)
}

/// The `{client_id}` route segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientId(pub i64);

impl<S> FromRequestParts<S> for ClientId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        path_id(parts, state, "client_id", "clientId").await.map(ClientId)
    }
}

/// The `{product_id}` route segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductId(pub i64);

impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        path_id(parts, state, "product_id", "productId").await.map(ProductId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoice_core::FieldCode;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("1", "clientId").unwrap(), 1);
        assert_eq!(parse_id("9223372036854775807", "clientId").unwrap(), i64::MAX);

        for raw in ["0", "-4", "abc", "", "1.5", " 7", "99999999999999999999"] {
            let err = parse_id(raw, "clientId").unwrap_err();
            assert_eq!(err.fields[0].field, "clientId", "input {raw:?}");
            assert_eq!(err.fields[0].code, FieldCode::InvalidId);
        }
    }
}
