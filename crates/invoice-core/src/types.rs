//! # Domain Types
//!
//! Core domain types used throughout Stitchbook.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌───────────────────────────┐                   │
//! │  │     Client      │   │          Product          │                   │
//! │  │  ─────────────  │ 1 │  ───────────────────────  │                   │
//! │  │  id (INTEGER)   │───│  client_id (FK, cascade)  │                   │
//! │  │  name           │ * │  product_type  style|sample                  │
//! │  │  company_name   │   │  pricing_mode  flat|hourly                   │
//! │  │  address        │   │  flat_price_minor?        │                   │
//! │  │  email          │   │  hourly_rate_minor?       │                   │
//! │  └─────────────────┘   │  minutes_worked?          │                   │
//! │                        └───────────────────────────┘                   │
//! │                                                                         │
//! │  Request side (untrusted)        Validated side (safe to store)        │
//! │  ClientCreateInput ──────────►   NewClient                             │
//! │  ClientPatchInput  ──────────►   ClientPatch                           │
//! │  ProductInput      ──────────►   NewProduct                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Absent vs Empty
//! Request DTOs use `Option` for every field. `None` means the key was not
//! sent (or was `null`); `Some("")` means it was sent empty. Patch semantics
//! and the extraneous-price checks depend on keeping the two apart.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use ts_rs::TS;


// =============================================================================
// Client
// =============================================================================

/// A customer that invoices are raised against.
///
/// Optional text columns are stored as NULL and surfaced as `""`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,

    /// Contact name, 2-50 runes.
    pub name: String,

    pub company_name: String,

    pub address: String,

    pub email: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Set on every successful patch.
    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A validated client, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewClient {
    pub name: String,
    pub company_name: String,
    pub address: String,
    pub email: String,
}

/// A validated partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
}

impl ClientPatch {
    /// Returns true when no column would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.company_name.is_none()
            && self.address.is_none()
            && self.email.is_none()
    }
}

// =============================================================================
// Product Type / Pricing Mode
// =============================================================================

/// What kind of work a product represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    /// A finished garment style; always flat priced.
    Style,
    /// Sampling work; flat or hourly.
    Sample,
}

impl ProductType {
    /// Exact, case-sensitive match on the wire name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "style" => Some(ProductType::Style),
            "sample" => Some(ProductType::Sample),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Style => "style",
            ProductType::Sample => "sample",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a product's price is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PricingMode {
    /// A single fixed amount.
    Flat,
    /// Hourly rate × minutes worked.
    Hourly,
}

impl PricingMode {
    /// Exact, case-sensitive match on the wire name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "flat" => Some(PricingMode::Flat),
            "hourly" => Some(PricingMode::Hourly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PricingMode::Flat => "flat",
            PricingMode::Hourly => "hourly",
        }
    }
}

impl fmt::Display for PricingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A billable product owned by one client.
///
/// ## Pricing Invariants
/// ```text
/// flat   ⟺ flat_price_minor set,  hourly_rate_minor/minutes_worked unset
/// hourly ⟺ hourly_rate_minor and minutes_worked set, flat_price_minor unset
/// style  ⟹ flat
/// ```
/// Mirrored by CHECK constraints on the `products` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,

    pub product_type: ProductType,

    pub pricing_mode: PricingMode,

    pub product_name: String,

    /// Price in pence (flat products only).
    pub flat_price_minor: Option<i64>,

    /// Rate per hour in pence (hourly products only).
    pub hourly_rate_minor: Option<i64>,

    /// Default minutes billed (hourly products only).
    pub minutes_worked: Option<i64>,

    pub client_id: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A validated product, used for both insert and full replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    /// Owning client, taken from the route.
    pub client_id: i64,
    pub product_type: ProductType,
    pub pricing_mode: PricingMode,
    pub product_name: String,
    pub flat_price_minor: Option<i64>,
    pub hourly_rate_minor: Option<i64>,
    pub minutes_worked: Option<i64>,
}

// =============================================================================
// Numeric Text
// =============================================================================

/// A numeric request field kept as text.
///
/// Accepts either a JSON string (`"12.50"`) or a JSON number literal
/// (`12.50`). A number literal is captured as its raw token so it never
/// passes through `f64`. The money and integer validators parse the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NumericText(String);

impl NumericText {
    pub fn new(text: impl Into<String>) -> Self {
        NumericText(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NumericText {
    fn from(s: &str) -> Self {
        NumericText(s.to_string())
    }
}

impl<'de> Deserialize<'de> for NumericText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Box<RawValue> = Box::deserialize(deserializer)?;
        let token = raw.get();

        if token.starts_with('"') {
            let text: String = serde_json::from_str(token).map_err(de::Error::custom)?;
            return Ok(NumericText(text));
        }

        if token.starts_with(|c: char| c == '-' || c.is_ascii_digit()) {
            return Ok(NumericText(token.to_string()));
        }

        Err(de::Error::custom("expected a number or a numeric string"))
    }
}

// =============================================================================
// Request DTOs
// =============================================================================

/// Body of `POST /api/clients`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClientCreateInput {
    pub name: Option<String>,
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
}

/// Body of `PATCH /api/clients/{id}`. Absent keys are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClientPatchInput {
    pub name: Option<String>,
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
}

/// Body of product create and update.
///
/// Prices are decimal strings in major units (`"12.50"`); minutes are a
/// whole number.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductInput {
    pub product_type: Option<String>,
    pub pricing_mode: Option<String>,
    pub product_name: Option<String>,
    #[ts(type = "string | number | null")]
    pub flat_price: Option<NumericText>,
    #[ts(type = "string | number | null")]
    pub hourly_rate: Option<NumericText>,
    #[ts(type = "string | number | null")]
    pub minutes_worked: Option<NumericText>,
}

// =============================================================================
// Unit Tests
// =============================================================================
