//! # Product Rules
//!
//! Validates product create/update bodies. This is where the pricing
//! business rules live.
//!
//! ## Decision Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  productType  ── text 4-20 ──► "style" | "sample"  else INVALID         │
//! │  pricingMode  ── text 3-20 ──► "flat"  | "hourly"  else INVALID         │
//! │  productName  ── text 2-80                                              │
//! │                                                                         │
//! │  style + hourly ──► pricingMode INVALID "must be 'flat' for style"      │
//! │                                                                         │
//! │  pricingMode = flat                                                     │
//! │  ├── flatPrice      required, money ≥ 0                                 │
//! │  ├── hourlyRate     present → INVALID "not allowed for flat pricing"    │
//! │  └── minutesWorked  present → INVALID "not allowed for flat pricing"    │
//! │                                                                         │
//! │  pricingMode = hourly                                                   │
//! │  ├── hourlyRate     required, money ≥ 0                                 │
//! │  ├── minutesWorked  required, integer ≥ 0                               │
//! │  └── flatPrice      present → INVALID "not allowed for hourly pricing"  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An unrecognised pricing mode skips the price checks entirely; the mode
//! error is already reported.

use crate::error::{FieldError, ValidationErrors};
use crate::types::{NewProduct, NumericText, PricingMode, ProductInput, ProductType};
use crate::validation::{
    validate_int64, validate_money_minor, validate_text, IntRules, MoneyRules, TextRules,
};

pub const PRODUCT_NAME_MIN_RUNES: usize = 2;
pub const PRODUCT_NAME_MAX_RUNES: usize = 80;

/// Validates a product body for the client named in the route.
///
/// `client_id` is trusted here; the caller checks the client exists before
/// writing. Create and update share these rules.
///
/// ## Example
/// ```rust
/// use invoice_core::product::validate_product;
/// use invoice_core::types::ProductInput;
///
/// let input = ProductInput {
///     product_type: Some("style".into()),
///     pricing_mode: Some("flat".into()),
///     product_name: Some("Blue Jeans".into()),
///     flat_price: Some("12.50".into()),
///     ..Default::default()
/// };
/// let product = validate_product(input, 1).unwrap();
/// assert_eq!(product.flat_price_minor, Some(1250));
/// ```
pub fn validate_product(input: ProductInput, client_id: i64) -> Result<NewProduct, ValidationErrors> {
    let mut errors = Vec::new();

    let product_type = validate_text(
        input.product_type.as_deref().unwrap_or_default(),
        &TextRules::new("productType").required().runes(4, 20).single_line(),
    )
    .accept_into(&mut errors)
    .and_then(|s| parse_or_invalid("productType", &s, ProductType::parse, &mut errors));

    let pricing_mode = validate_text(
        input.pricing_mode.as_deref().unwrap_or_default(),
        &TextRules::new("pricingMode").required().runes(3, 20).single_line(),
    )
    .accept_into(&mut errors)
    .and_then(|s| parse_or_invalid("pricingMode", &s, PricingMode::parse, &mut errors));

    let product_name = validate_text(
        input.product_name.as_deref().unwrap_or_default(),
        &TextRules::new("productName")
            .required()
            .runes(PRODUCT_NAME_MIN_RUNES, PRODUCT_NAME_MAX_RUNES)
            .single_line(),
    )
    .accept_into(&mut errors);

    if product_type == Some(ProductType::Style) && pricing_mode == Some(PricingMode::Hourly) {
        errors.push(FieldError::invalid("pricingMode", "must be 'flat' for style"));
    }

    let mut flat_price_minor = None;
    let mut hourly_rate_minor = None;
    let mut minutes_worked = None;

    match pricing_mode {
        Some(PricingMode::Flat) => {
            flat_price_minor = required_money("flatPrice", input.flat_price.as_ref(), &mut errors);

            if input.hourly_rate.is_some() {
                errors.push(FieldError::invalid("hourlyRate", "not allowed for flat pricing"));
            }
            if input.minutes_worked.is_some() {
                errors.push(FieldError::invalid("minutesWorked", "not allowed for flat pricing"));
            }
        }
        Some(PricingMode::Hourly) => {
            hourly_rate_minor =
                required_money("hourlyRate", input.hourly_rate.as_ref(), &mut errors);
            minutes_worked =
                required_int("minutesWorked", input.minutes_worked.as_ref(), &mut errors);

            if input.flat_price.is_some() {
                errors.push(FieldError::invalid("flatPrice", "not allowed for hourly pricing"));
            }
        }
        None => {}
    }

    match (product_type, pricing_mode, product_name) {
        (Some(product_type), Some(pricing_mode), Some(product_name)) if errors.is_empty() => {
            Ok(NewProduct {
                client_id,
                product_type,
                pricing_mode,
                product_name,
                flat_price_minor,
                hourly_rate_minor,
                minutes_worked,
            })
        }
        _ => Err(ValidationErrors::new(errors)),
    }
}

fn parse_or_invalid<T>(
    field: &str,
    value: &str,
    parse: fn(&str) -> Option<T>,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    let parsed = parse(value);
    if parsed.is_none() {
        errors.push(FieldError::invalid(field, "invalid value"));
    }
    parsed
}

fn required_money(field: &str, value: Option<&NumericText>, errors: &mut Vec<FieldError>) -> Option<i64> {
    let Some(value) = value else {
        errors.push(FieldError::required(field));
        return None;
    };
    validate_money_minor(value.as_str(), &MoneyRules::new(field).required().min_minor(0))
        .accept_into(errors)
}

fn required_int(field: &str, value: Option<&NumericText>, errors: &mut Vec<FieldError>) -> Option<i64> {
    let Some(value) = value else {
        errors.push(FieldError::required(field));
        return None;
    };
    validate_int64(value.as_str(), &IntRules::new(field).required().min(0)).accept_into(errors)
}

// =============================================================================
// Unit Tests
// =============================================================================
