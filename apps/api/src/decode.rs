//! Strict JSON request bodies.
//!
//! ```text
//! body bytes ──► exactly one JSON value? ──► known keys only? ──► T
//!                       │ no                       │ no
//!                       ▼                          ▼
//!                 INVALID_JSON (400)         INVALID_JSON (400)
//! ```
//!
//! Unknown keys are rejected by `#[serde(deny_unknown_fields)]` on the input
//! types; trailing content after the first value is rejected here. Bodies
//! over the router's `DefaultBodyLimit` become `PAYLOAD_TOO_LARGE`.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::error::ApiError;

/// Decodes exactly one JSON value of type `T` from `bytes`.
///
/// Whitespace after the value is allowed; anything else is not.
pub fn decode_strict<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    let mut de = serde_json::Deserializer::from_slice(bytes);

    let value = T::deserialize(&mut de).map_err(|e| match e.classify() {
        Category::Data => ApiError::invalid_json(format!("invalid body: {e}")),
        Category::Eof if bytes.iter().all(u8::is_ascii_whitespace) => {
            ApiError::invalid_json("request body is empty")
        }
        _ => ApiError::invalid_json("malformed JSON"),
    })?;

    de.end()
        .map_err(|_| ApiError::invalid_json("body must contain a single JSON value"))?;

    Ok(value)
}

/// Raw request body with the API's rejection envelope.
///
/// Handlers that must check something before decoding (product routes look
/// up the client first) take this and call [`JsonBody::decode`] themselves.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Bytes);

impl JsonBody {
    /// Strictly decodes the buffered body.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        decode_strict(&self.0)
    }
}

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::payload_too_large()
            } else {
                ApiError::invalid_json("could not read request body")
            }
        })?;

        Ok(JsonBody(bytes))
    }
}

/// Drop-in replacement for `axum::Json<T>` that decodes strictly and
/// rejects with the standard envelope.
///
/// ```rust,ignore
/// async fn create_client(
///     State(state): State<AppState>,
///     StrictJson(input): StrictJson<ClientCreateInput>,
/// ) -> Result<impl IntoResponse, ApiError> { ... }
/// ```
#[derive(Debug, Clone)]
pub struct StrictJson<T>(pub T);

impl<S, T> FromRequest<S> for StrictJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = JsonBody::from_request(req, state).await?;
        body.decode().map(StrictJson)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use invoice_core::{ClientCreateInput, ProductInput};

    #[test]
    fn test_decodes_single_object() {
        let input: ClientCreateInput =
            decode_strict(br#"{"name":"Ada","email":"ada@example.com"}"#).unwrap();
        assert_eq!(input.name.as_deref(), Some("Ada"));
        assert_eq!(input.address, None);
    }

    #[test]
    fn test_trailing_whitespace_allowed() {
        let input: ClientCreateInput = decode_strict(b"{\"name\":\"Ada\"}\n  \n").unwrap();
        assert_eq!(input.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_rejects_unknown_key() {
        let err = decode_strict::<ClientCreateInput>(br#"{"name":"Ada","nickname":"A"}"#)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidJson);
        assert!(err.message.contains("nickname"));
    }

    #[test]
    fn test_rejects_second_value() {
        let err =
            decode_strict::<ClientCreateInput>(br#"{"name":"Ada"}{"name":"Bob"}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidJson);
        assert_eq!(err.message, "body must contain a single JSON value");
    }

    #[test]
    fn test_rejects_malformed_and_empty() {
        let err = decode_strict::<ClientCreateInput>(br#"{"name":"#).unwrap_err();
        assert_eq!(err.message, "malformed JSON");

        let err = decode_strict::<ClientCreateInput>(b"  ").unwrap_err();
        assert_eq!(err.message, "request body is empty");
    }

    #[test]
    fn test_numeric_fields_accept_string_or_number() {
        let input: ProductInput =
            decode_strict(br#"{"flatPrice":12.50,"hourlyRate":"30","minutesWorked":90}"#)
                .unwrap();
        assert_eq!(input.flat_price.unwrap().as_str(), "12.50");
        assert_eq!(input.hourly_rate.unwrap().as_str(), "30");
        assert_eq!(input.minutes_worked.unwrap().as_str(), "90");
    }
}
