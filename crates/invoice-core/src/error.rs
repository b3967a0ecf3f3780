//! # Error Types
//!
//! The field-error model shared by every validator in invoice-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  invoice-core errors (this file)                                       │
//! │  ├── FieldError       - One rejected input value                       │
//! │  └── ValidationErrors - Ordered set of FieldErrors for one request     │
//! │                                                                         │
//! │  invoice-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  HTTP errors (in apps/api)                                             │
//! │  └── ApiError         - What the frontend sees (serialized envelope)   │
//! │                                                                         │
//! │  Flow: FieldError → ValidationErrors → ApiError → Frontend             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every field error names its field and carries a stable code
//! 3. Several errors may target the same field; order is preserved
//! 4. Bounds travel in `meta`, never baked into the message

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Field Codes
// =============================================================================

/// Stable, machine-readable code attached to a [`FieldError`].
///
/// Serialized in SCREAMING_SNAKE_CASE so the frontend can switch on it:
/// `REQUIRED`, `MIN_LENGTH`, `MAX_LENGTH`, `INVALID`, `INVALID_ID`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldCode {
    /// Value missing or empty after trimming.
    Required,
    /// Fewer runes than allowed (`meta.min`).
    MinLength,
    /// More runes than allowed (`meta.max`).
    MaxLength,
    /// Value present but unacceptable; the message says why.
    Invalid,
    /// Route parameter is not a positive integer id.
    InvalidId,
}

// =============================================================================
// Field Error
// =============================================================================

/// One rejected input value.
///
/// ## Serialization
/// ```json
/// { "field": "email", "code": "MAX_LENGTH", "message": "too long", "meta": { "max": 50 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldError {
    /// Name of the offending field as the client sent it (camelCase).
    pub field: String,

    /// Stable machine-readable code.
    pub code: FieldCode,

    /// Human-readable explanation.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    #[ts(as = "Option<String>", optional)]
    pub message: String,

    /// Extra detail such as the violated bound.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    #[ts(as = "Option<BTreeMap<String, f64>>", optional)]
    pub meta: BTreeMap<String, serde_json::Value>,
}

impl FieldError {
    fn new(field: impl Into<String>, code: FieldCode, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            code,
            message: message.into(),
            meta: BTreeMap::new(),
        }
    }

    fn with_meta(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.meta.insert(key.to_string(), value.into());
        self
    }

    /// `field` is required.
    pub fn required(field: impl Into<String>) -> Self {
        FieldError::new(field, FieldCode::Required, "is required")
    }

    /// `field` is shorter than `min` runes.
    pub fn min_length(field: impl Into<String>, min: usize) -> Self {
        FieldError::new(field, FieldCode::MinLength, "too short").with_meta("min", min)
    }

    /// `field` is longer than `max` runes.
    pub fn max_length(field: impl Into<String>, max: usize) -> Self {
        FieldError::new(field, FieldCode::MaxLength, "too long").with_meta("max", max)
    }

    /// `field` is invalid; an empty message falls back to `"invalid"`.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.is_empty() {
            "invalid".to_string()
        } else {
            message
        };
        FieldError::new(field, FieldCode::Invalid, message)
    }

    /// Numeric value below the inclusive lower bound.
    pub fn below_minimum(field: impl Into<String>, min: i64) -> Self {
        FieldError::invalid(field, "value below minimum").with_meta("min", min)
    }

    /// Numeric value above the inclusive upper bound.
    pub fn above_maximum(field: impl Into<String>, max: i64) -> Self {
        FieldError::invalid(field, "value above maximum").with_meta("max", max)
    }

    /// Route parameter that is not a positive id.
    pub fn invalid_id(field: impl Into<String>) -> Self {
        FieldError::new(field, FieldCode::InvalidId, "must be a positive integer id")
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Every field error raised while validating one request, in order.
///
/// An entity validator returns this only when at least one error exists;
/// an empty set is never constructed by the rules in this crate.
#[derive(Debug, Clone, PartialEq, Default, Error)]
#[error("validation failed: {} field error(s)", .0.len())]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Wraps a list of field errors.
    pub fn new(errors: Vec<FieldError>) -> Self {
        ValidationErrors(errors)
    }

    /// Borrow the individual errors.
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Take ownership of the individual errors.
    pub fn into_errors(self) -> Vec<FieldError> {
        self.0
    }

    /// Returns true when no errors were collected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true when some error targets `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Returns true when `field` carries an error with `code`.
    pub fn has(&self, field: &str, code: FieldCode) -> bool {
        self.0.iter().any(|e| e.field == field && e.code == code)
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(err: FieldError) -> Self {
        ValidationErrors(vec![err])
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
