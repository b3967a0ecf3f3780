//! # API Error Type
//!
//! Unified error type for HTTP handlers, rendered as the standard envelope.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stitchbook                             │
//! │                                                                         │
//! │  Handler: Result<T, ApiError>                                           │
//! │       │                                                                 │
//! │       ├── bad route id ──────► VALIDATION_FAILED (400) + INVALID_ID     │
//! │       ├── bad body ──────────► INVALID_JSON (400) / PAYLOAD_TOO_LARGE   │
//! │       ├── ValidationErrors ──► VALIDATION_FAILED (400) + fields         │
//! │       ├── DbError::NotFound ─► NOT_FOUND (404)                          │
//! │       ├── other DbError ─────► DATABASE_ERROR (500), cause logged       │
//! │       └── panic / unknown ───► INTERNAL_ERROR (500), cause logged       │
//! │                                                                         │
//! │  Every envelope carries a 16-hex-char correlation id. Server-side       │
//! │  causes are logged under that id and never sent to the caller.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Envelope
//! ```json
//! {
//!   "error": {
//!     "id": "a1b2c3d4e5f6a7b8",
//!     "code": "VALIDATION_FAILED",
//!     "message": "Validation failed",
//!     "fields": [{ "field": "name", "code": "REQUIRED", "message": "is required" }]
//!   }
//! }
//! ```

use std::fmt::Display;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use ts_rs::TS;

use invoice_core::{FieldError, ValidationErrors};
use invoice_db::DbError;

/// Result type for handlers.
pub type AppResult<T> = Result<T, ApiError>;

// =============================================================================
// Error Codes
// =============================================================================

/// Top-level error codes.
///
/// ## Usage in Frontend
/// ```typescript
/// const res = await fetch(`/api/clients/${id}`, { method: 'PATCH', body });
/// if (!res.ok) {
///   const { error } = await res.json();
///   switch (error.code) {
///     case 'VALIDATION_FAILED':
///       showFieldErrors(error.fields);
///       break;
///     case 'NOT_FOUND':
///       showNotification(error.message);
///       break;
///     default:
///       showError(`Something went wrong (ref ${error.id})`);
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed (400)
    ValidationFailed,

    /// Body is not a single JSON object of the expected shape (400)
    InvalidJson,

    /// Body exceeds the configured limit (413)
    PayloadTooLarge,

    /// Resource not found (404)
    NotFound,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    InternalError,
}

impl ErrorCode {
    /// HTTP status sent with this code.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::ValidationFailed | ErrorCode::InvalidJson => StatusCode::BAD_REQUEST,
            ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message used when the caller supplies none.
    pub fn default_message(self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidJson => "Invalid JSON body",
            ErrorCode::PayloadTooLarge => "Request body too large",
            ErrorCode::NotFound => "Not found",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::InternalError => "Internal server error",
        }
    }
}

// =============================================================================
// ApiError
// =============================================================================

/// API error returned from handlers.
///
/// The HTTP status is a transport detail and is not serialized.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct ApiError {
    /// Correlation id, also written to the server log
    pub id: String,

    #[serde(skip)]
    #[ts(skip)]
    pub status: StatusCode,

    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable summary
    pub message: String,

    /// Per-field validation errors
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[ts(as = "Option<Vec<FieldError>>", optional)]
    pub fields: Vec<FieldError>,
}

/// Wire shape of every error response.
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct ErrorEnvelope {
    pub error: ApiError,
}

impl ApiError {
    /// Creates an error with a fresh correlation id.
    ///
    /// An empty message falls back to the code's default.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        ApiError {
            id: new_error_id(),
            status: code.status(),
            message: if message.is_empty() {
                code.default_message().to_string()
            } else {
                message
            },
            code,
            fields: Vec::new(),
        }
    }

    /// 400 `VALIDATION_FAILED` carrying field errors.
    pub fn validation(fields: Vec<FieldError>) -> Self {
        ApiError {
            fields,
            ..ApiError::new(ErrorCode::ValidationFailed, "")
        }
    }

    /// 400 `VALIDATION_FAILED` for a route parameter that isn't a positive id.
    pub fn invalid_id(param: &str) -> Self {
        ApiError::validation(vec![FieldError::invalid_id(param)])
    }

    /// 400 `INVALID_JSON`.
    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidJson, message)
    }

    /// 413 `PAYLOAD_TOO_LARGE`.
    pub fn payload_too_large() -> Self {
        ApiError::new(ErrorCode::PayloadTooLarge, "")
    }

    /// 404 `NOT_FOUND` with a resource-specific message (`"client not found"`).
    pub fn not_found(resource: &str) -> Self {
        let message = if resource.is_empty() {
            String::new()
        } else {
            format!("{} not found", resource.to_lowercase())
        };
        ApiError::new(ErrorCode::NotFound, message)
    }

    /// 500 `DATABASE_ERROR`; the cause is logged, never returned.
    pub fn database(cause: impl Display) -> Self {
        let err = ApiError::new(ErrorCode::DatabaseError, "");
        tracing::error!(error_id = %err.id, error = %cause, "Database operation failed");
        err
    }

    /// 500 `INTERNAL_ERROR`; the cause is logged, never returned.
    pub fn internal(cause: impl Display) -> Self {
        let err = ApiError::new(ErrorCode::InternalError, "");
        tracing::error!(error_id = %err.id, error = %cause, "Internal error");
        err
    }
}

/// 8 random bytes as 16 lowercase hex characters.
fn new_error_id() -> String {
    hex::encode(rand::random::<[u8; 8]>())
}

// =============================================================================
// Conversions
// =============================================================================

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, .. } => ApiError::not_found(&entity),
            other => ApiError::database(other),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::validation(errors.into_errors())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_client_error() {
            tracing::debug!(error_id = %self.id, code = ?self.code, "Request rejected");
        }
        (self.status, Json(ErrorEnvelope { error: self })).into_response()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
