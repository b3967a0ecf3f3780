//! # Validation Module
//!
//! Field-level validators: one value in, a sanitized value plus any
//! [`FieldError`]s out. Entity rules in [`crate::client`] and
//! [`crate::product`] are built from these.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Strict JSON decode (apps/api)                                │
//! │  ├── Unknown keys rejected                                             │
//! │  └── Trailing values rejected                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE + entity rules                                   │
//! │  ├── Trim, rune length, control characters                             │
//! │  ├── Email syntax, integers, decimal money → minor units               │
//! │  └── Cross-field business rules                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints mirror the product rules             │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use invoice_core::validation::{validate_money_minor, MoneyRules};
//!
//! let price = validate_money_minor("12.50", &MoneyRules::new("flatPrice").required());
//! assert!(price.is_valid());
//! assert_eq!(price.value, 1250);
//! ```

use validator::ValidateIp;

use crate::error::FieldError;
use crate::money::Money;

// =============================================================================
// Outcome
// =============================================================================

/// Result of validating a single field.
///
/// Unlike `Result`, the sanitized value is always present, so a caller can
/// keep the cleaned text even when another rule on the same field failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Checked<T> {
    /// Sanitized value (trimmed text, parsed number, or zero on parse failure).
    pub value: T,
    /// Errors for this field, in the order they were detected.
    pub errors: Vec<FieldError>,
}

impl<T> Checked<T> {
    fn ok(value: T) -> Self {
        Checked {
            value,
            errors: Vec::new(),
        }
    }

    fn fail(value: T, error: FieldError) -> Self {
        Checked {
            value,
            errors: vec![error],
        }
    }

    /// Returns true when no errors were raised.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Moves the errors into `sink` and returns the value.
    pub fn collect_into(self, sink: &mut Vec<FieldError>) -> T {
        sink.extend(self.errors);
        self.value
    }

    /// Returns the value only when valid, moving any errors into `sink`.
    pub fn accept_into(self, sink: &mut Vec<FieldError>) -> Option<T> {
        if self.errors.is_empty() {
            Some(self.value)
        } else {
            sink.extend(self.errors);
            None
        }
    }
}

// =============================================================================
// Rules
// =============================================================================

/// How to validate a free-text field.
///
/// Rune bounds are inclusive and count Unicode scalar values, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRules {
    pub field: String,
    pub required: bool,
    pub min_runes: Option<usize>,
    pub max_runes: Option<usize>,
    /// Reject `\n`, `\r` and `\t`.
    pub single_line: bool,
    pub trim: bool,
}

impl TextRules {
    /// Optional, unbounded, multi-line, trimmed.
    pub fn new(field: impl Into<String>) -> Self {
        TextRules {
            field: field.into(),
            required: false,
            min_runes: None,
            max_runes: None,
            single_line: false,
            trim: true,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn runes(mut self, min: usize, max: usize) -> Self {
        self.min_runes = Some(min);
        self.max_runes = Some(max);
        self
    }

    pub fn max_runes(mut self, max: usize) -> Self {
        self.max_runes = Some(max);
        self
    }

    pub fn single_line(mut self) -> Self {
        self.single_line = true;
        self
    }

    pub fn no_trim(mut self) -> Self {
        self.trim = false;
        self
    }
}

/// How to validate a base-10 integer field. Bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntRules {
    pub field: String,
    pub required: bool,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub trim: bool,
}

impl IntRules {
    pub fn new(field: impl Into<String>) -> Self {
        IntRules {
            field: field.into(),
            required: false,
            min: None,
            max: None,
            trim: true,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }
}

/// How to validate a decimal currency field. Bounds are in minor units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyRules {
    pub field: String,
    pub required: bool,
    pub min_minor: Option<i64>,
    pub max_minor: Option<i64>,
    pub trim: bool,
}

impl MoneyRules {
    pub fn new(field: impl Into<String>) -> Self {
        MoneyRules {
            field: field.into(),
            required: false,
            min_minor: None,
            max_minor: None,
            trim: true,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_minor(mut self, min: i64) -> Self {
        self.min_minor = Some(min);
        self
    }

    pub fn max_minor(mut self, max: i64) -> Self {
        self.max_minor = Some(max);
        self
    }
}

// =============================================================================
// Character Checks
// =============================================================================

/// Counts Unicode scalar values.
pub fn rune_len(s: &str) -> usize {
    s.chars().count()
}

/// Control characters plus U+2028/U+2029, which break logs and UI lines.
pub fn has_invalid_chars(s: &str) -> bool {
    s.chars()
        .any(|c| c.is_control() || c == '\u{2028}' || c == '\u{2029}')
}

fn has_newline_or_tab(s: &str) -> bool {
    s.chars().any(|c| matches!(c, '\n' | '\r' | '\t'))
}

fn prepare(value: &str, trim: bool) -> &str {
    if trim {
        value.trim()
    } else {
        value
    }
}

// =============================================================================
// Text
// =============================================================================

/// Validates and sanitizes a text field.
///
/// ## Rules
/// - Trimmed first when `rules.trim`
/// - Empty: `REQUIRED` if required, otherwise valid (empty optional text is OK)
/// - Length bounds checked independently in runes
/// - Control characters and U+2028/U+2029 are always invalid
/// - `single_line` additionally rejects `\n`, `\r`, `\t`
///
/// The sanitized value is returned even when errors are present.
///
/// ## Example
/// ```rust
/// use invoice_core::validation::{validate_text, TextRules};
///
/// let rules = TextRules::new("name").required().runes(2, 50).single_line();
/// let name = validate_text("  Ada Lovelace ", &rules);
/// assert_eq!(name.value, "Ada Lovelace");
/// assert!(name.is_valid());
/// ```
pub fn validate_text(value: &str, rules: &TextRules) -> Checked<String> {
    let value = prepare(value, rules.trim);

    if value.is_empty() {
        return if rules.required {
            Checked::fail(String::new(), FieldError::required(&rules.field))
        } else {
            Checked::ok(String::new())
        };
    }

    let mut errors = Vec::new();

    let n = rune_len(value);
    if let Some(min) = rules.min_runes {
        if n < min {
            errors.push(FieldError::min_length(&rules.field, min));
        }
    }
    if let Some(max) = rules.max_runes {
        if n > max {
            errors.push(FieldError::max_length(&rules.field, max));
        }
    }

    if has_invalid_chars(value) {
        errors.push(FieldError::invalid(&rules.field, "contains invalid characters"));
    }

    if rules.single_line && has_newline_or_tab(value) {
        errors.push(FieldError::invalid(&rules.field, "must be single-line"));
    }

    Checked {
        value: value.to_string(),
        errors,
    }
}

// =============================================================================
// Email
// =============================================================================

/// Validates and sanitizes an email address.
///
/// ## Rules
/// - Always trimmed; empty is valid (required-ness is the caller's call)
/// - Over `max_runes` (when > 0): `MAX_LENGTH`, no further checks
/// - Invalid characters: `INVALID`, no further checks
/// - Must be a bare address: `"Name <a@b.com>"` is rejected
/// - Non-ASCII atoms are accepted; a domain literal must be an IP address
///
/// ## Example
/// ```rust
/// use invoice_core::validation::validate_email;
///
/// assert!(validate_email("email", "a@b.com", 50).is_valid());
/// assert!(!validate_email("email", "Name <a@b.com>", 50).is_valid());
/// ```
pub fn validate_email(field: &str, value: &str, max_runes: usize) -> Checked<String> {
    let value = value.trim();

    if value.is_empty() {
        return Checked::ok(String::new());
    }

    if max_runes > 0 && rune_len(value) > max_runes {
        return Checked::fail(value.to_string(), FieldError::max_length(field, max_runes));
    }

    if has_invalid_chars(value) {
        return Checked::fail(
            value.to_string(),
            FieldError::invalid(field, "contains invalid characters"),
        );
    }

    if !is_bare_address(value) {
        return Checked::fail(
            value.to_string(),
            FieldError::invalid(field, "email format is invalid"),
        );
    }

    Checked::ok(value.to_string())
}

/// Bare `addr-spec`: `dot-atom "@" (dot-atom / "[" ip "]")`.
///
/// Atoms take any non-ASCII character (RFC 6532), so `josé@example.com`
/// passes. Domain atoms follow the same grammar as the local part, without
/// hostname label rules.
fn is_bare_address(value: &str) -> bool {
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };
    if !is_dot_atom(local) {
        return false;
    }
    match domain.strip_prefix('[') {
        Some(literal) => literal.strip_suffix(']').is_some_and(|ip| ip.validate_ip()),
        None => is_dot_atom(domain),
    }
}

/// One or more atoms joined by single dots.
fn is_dot_atom(s: &str) -> bool {
    s.split('.')
        .all(|atom| !atom.is_empty() && atom.chars().all(is_atext))
}

/// RFC 5322 `atext`, widened to every non-ASCII character.
fn is_atext(c: char) -> bool {
    if !c.is_ascii() {
        return true;
    }
    c.is_ascii_graphic()
        && !matches!(
            c,
            '(' | ')' | '<' | '>' | '[' | ']' | ':' | ';' | '@' | '\\' | ',' | '"' | '.'
        )
}

// =============================================================================
// Integers
// =============================================================================

/// Validates a base-10 signed 64-bit integer.
///
/// ## Rules
/// - Trimmed when requested; empty is `REQUIRED` or `0`
/// - Invalid characters rejected before parsing
/// - Parse failure or overflow: `INVALID` "must be an integer", value `0`
/// - Bounds checked independently on success
pub fn validate_int64(value: &str, rules: &IntRules) -> Checked<i64> {
    let value = prepare(value, rules.trim);

    if value.is_empty() {
        return if rules.required {
            Checked::fail(0, FieldError::required(&rules.field))
        } else {
            Checked::ok(0)
        };
    }

    if has_invalid_chars(value) {
        return Checked::fail(0, FieldError::invalid(&rules.field, "contains invalid characters"));
    }

    let Ok(n) = value.parse::<i64>() else {
        return Checked::fail(0, FieldError::invalid(&rules.field, "must be an integer"));
    };

    Checked {
        value: n,
        errors: bound_errors(&rules.field, n, rules.min, rules.max),
    }
}

// =============================================================================
// Money
// =============================================================================

/// Validates a decimal currency amount and converts it to minor units.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product form: "Flat price" = " 12.50 "                                 │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_money_minor(" 12.50 ", rules) ← THIS FUNCTION                │
/// │       │                                                                 │
/// │       ├── trim → "12.50"                                                │
/// │       ├── control characters? → INVALID                                 │
/// │       ├── Money::parse_decimal → 1250 (or INVALID with the reason)      │
/// │       └── min/max bounds → INVALID "value below minimum" ...            │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  flat_price_minor = 1250 stored as INTEGER                              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Any parse failure returns value `0` with a single error.
pub fn validate_money_minor(value: &str, rules: &MoneyRules) -> Checked<i64> {
    let value = prepare(value, rules.trim);

    if value.is_empty() {
        return if rules.required {
            Checked::fail(0, FieldError::required(&rules.field))
        } else {
            Checked::ok(0)
        };
    }

    if has_invalid_chars(value) {
        return Checked::fail(0, FieldError::invalid(&rules.field, "contains invalid characters"));
    }

    match Money::parse_decimal(value) {
        Ok(money) => {
            let minor = money.minor();
            Checked {
                value: minor,
                errors: bound_errors(&rules.field, minor, rules.min_minor, rules.max_minor),
            }
        }
        Err(reason) => Checked::fail(0, FieldError::invalid(&rules.field, reason.to_string())),
    }
}

fn bound_errors(field: &str, n: i64, min: Option<i64>, max: Option<i64>) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if let Some(min) = min {
        if n < min {
            errors.push(FieldError::below_minimum(field, min));
        }
    }
    if let Some(max) = max {
        if n > max {
            errors.push(FieldError::above_maximum(field, max));
        }
    }
    errors
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldCode;

    fn codes<T>(checked: &Checked<T>) -> Vec<FieldCode> {
        checked.errors.iter().map(|e| e.code).collect()
    }

    #[test]
    fn test_text_empty_policy() {
        let optional = validate_text("", &TextRules::new("address"));
        assert_eq!(optional.value, "");
        assert!(optional.is_valid());

        let required = validate_text("   ", &TextRules::new("name").required());
        assert_eq!(required.value, "");
        assert_eq!(codes(&required), vec![FieldCode::Required]);
    }

    #[test]
    fn test_text_counts_runes_not_bytes() {
        let rules = TextRules::new("name").runes(2, 5);
        // 5 runes, 10 bytes
        assert!(validate_text("ééééé", &rules).is_valid());
        assert_eq!(
            codes(&validate_text("éééééé", &rules)),
            vec![FieldCode::MaxLength]
        );
        assert_eq!(codes(&validate_text("é", &rules)), vec![FieldCode::MinLength]);
    }

    #[test]
    fn test_text_length_meta() {
        let checked = validate_text("x", &TextRules::new("name").runes(2, 50));
        assert_eq!(checked.errors[0].meta["min"], 2);
    }

    #[test]
    fn test_text_control_characters() {
        let rules = TextRules::new("note");
        for bad in ["a\u{0007}b", "line\u{2028}sep", "para\u{2029}sep", "nul\0"] {
            let checked = validate_text(bad, &rules);
            assert_eq!(checked.errors.len(), 1, "input {bad:?}");
            assert_eq!(checked.errors[0].message, "contains invalid characters");
        }
    }

    #[test]
    fn test_text_single_line() {
        let multi = TextRules::new("address");
        let single = TextRules::new("address").single_line();

        // Newline is a control character, so it is rejected even when multi-line.
        let checked = validate_text("1 High St\nLeeds", &multi);
        assert_eq!(checked.errors.len(), 1);

        let checked = validate_text("1 High St\nLeeds", &single);
        let messages: Vec<_> = checked.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["contains invalid characters", "must be single-line"]
        );
    }

    #[test]
    fn test_text_returns_sanitized_even_on_error() {
        let rules = TextRules::new("name").required().runes(2, 3).single_line();
        let checked = validate_text("  far too long  ", &rules);
        assert_eq!(checked.value, "far too long");
        assert_eq!(codes(&checked), vec![FieldCode::MaxLength]);
    }

    #[test]
    fn test_text_no_trim() {
        let checked = validate_text("  ab  ", &TextRules::new("raw").no_trim());
        assert_eq!(checked.value, "  ab  ");
    }

    #[test]
    fn test_trim_is_idempotent() {
        let rules = TextRules::new("name").runes(2, 10).single_line();
        for input in ["  Blue Jeans  ", "\u{3000}wide\u{3000}", "", "\tx\t", "a\nb "] {
            let once = validate_text(input, &rules).value;
            let twice = validate_text(&once, &rules).value;
            assert_eq!(once, twice, "input {input:?}");
        }
    }

    #[test]
    fn test_email_accepts_bare_address() {
        let checked = validate_email("email", "  a@b.com ", 50);
        assert_eq!(checked.value, "a@b.com");
        assert!(checked.is_valid());
        assert!(validate_email("email", "first.last+tag@sub.example.co.uk", 50).is_valid());
    }

    #[test]
    fn test_email_rejects_display_names_and_junk() {
        for bad in [
            "Name <a@b.com>",
            "<a@b.com>",
            "a@b.com (comment)",
            "plainaddress",
            "@b.com",
            "a@",
            "a@@b.com",
            "a@b@c.com",
            ".a@b.com",
            "a..b@c.com",
        ] {
            let checked = validate_email("email", bad, 50);
            assert_eq!(checked.errors.len(), 1, "input {bad:?}");
            assert_eq!(checked.errors[0].message, "email format is invalid");
        }
    }

    #[test]
    fn test_email_accepts_rfc5322_atoms() {
        for good in [
            "josé@example.com",
            "a@bücher.example",
            "a@-x.com",
            "a@b",
            "user@[127.0.0.1]",
            "user@[::1]",
            "a'b@x.com",
            "a#b@x.com",
        ] {
            let checked = validate_email("email", good, 50);
            assert!(checked.is_valid(), "input {good:?}: {:?}", checked.errors);
            assert_eq!(checked.value, good);
        }
    }

    #[test]
    fn test_email_rejects_malformed_domains() {
        for bad in [
            "a@x..com",
            "a@x.com.",
            "a@.x.com",
            "a\\b@x.com",
            "user@[not-an-ip]",
            "user@[127.0.0.1",
            "a@x[1].com",
        ] {
            let checked = validate_email("email", bad, 50);
            assert_eq!(checked.errors.len(), 1, "input {bad:?}");
            assert_eq!(checked.errors[0].message, "email format is invalid");
        }
    }

    #[test]
    fn test_email_optional_when_empty() {
        assert!(validate_email("email", "   ", 50).is_valid());
    }

    #[test]
    fn test_email_length_stops_further_checks() {
        let long = format!("{}@b.com", "a".repeat(60));
        let checked = validate_email("email", &long, 50);
        assert_eq!(codes(&checked), vec![FieldCode::MaxLength]);

        // max 0 means unbounded
        assert!(validate_email("email", &long, 0).is_valid());
    }

    #[test]
    fn test_email_control_characters_stop_further_checks() {
        let checked = validate_email("email", "a\u{0001}@b.com", 50);
        assert_eq!(checked.errors.len(), 1);
        assert_eq!(checked.errors[0].message, "contains invalid characters");
    }

    #[test]
    fn test_int64() {
        let rules = IntRules::new("minutesWorked").required().min(0);

        assert_eq!(validate_int64(" 90 ", &rules).value, 90);
        assert!(validate_int64("+5", &rules).is_valid());

        let empty = validate_int64("", &rules);
        assert_eq!((empty.value, codes(&empty)), (0, vec![FieldCode::Required]));

        let optional = validate_int64("", &IntRules::new("qty"));
        assert_eq!((optional.value, optional.is_valid()), (0, true));

        for bad in ["1.5", "abc", "9223372036854775808", "1e3", "--1"] {
            let checked = validate_int64(bad, &rules);
            assert_eq!(checked.value, 0, "input {bad:?}");
            assert_eq!(checked.errors[0].message, "must be an integer");
        }

        let negative = validate_int64("-1", &rules);
        assert_eq!(negative.value, -1);
        assert_eq!(negative.errors[0].message, "value below minimum");
    }

    #[test]
    fn test_int64_bounds_independent() {
        let rules = IntRules::new("n").min(10).max(5);
        assert_eq!(validate_int64("7", &rules).errors.len(), 2);
        assert_eq!(validate_int64("3", &rules).errors.len(), 1);
    }

    #[test]
    fn test_money_round_trip_examples() {
        let rules = MoneyRules::new("flatPrice").required();
        for (input, expected) in [("12.50", 1250), ("10", 1000), (".5", 50), ("-3.20", -320)] {
            let checked = validate_money_minor(input, &rules);
            assert!(checked.is_valid(), "input {input:?}");
            assert_eq!(checked.value, expected, "input {input:?}");
        }
    }

    #[test]
    fn test_money_over_precision_rejected() {
        let checked = validate_money_minor("12.345", &MoneyRules::new("flatPrice").required());
        assert_eq!(checked.value, 0);
        assert_eq!(checked.errors.len(), 1);
        assert_eq!(checked.errors[0].field, "flatPrice");
        assert_eq!(checked.errors[0].message, "must have at most 2 decimal places");
    }

    #[test]
    fn test_money_empty_policy() {
        let required = validate_money_minor(" ", &MoneyRules::new("hourlyRate").required());
        assert_eq!(codes(&required), vec![FieldCode::Required]);

        let optional = validate_money_minor("", &MoneyRules::new("hourlyRate"));
        assert_eq!((optional.value, optional.is_valid()), (0, true));
    }

    #[test]
    fn test_money_bounds_on_signed_value() {
        let rules = MoneyRules::new("flatPrice").min_minor(0).max_minor(100_000);
        let negative = validate_money_minor("-0.01", &rules);
        assert_eq!(negative.value, -1);
        assert_eq!(negative.errors[0].message, "value below minimum");

        let huge = validate_money_minor("1000.01", &rules);
        assert_eq!(huge.errors[0].message, "value above maximum");
        assert_eq!(huge.errors[0].meta["max"], 100_000);
    }

    #[test]
    fn test_money_rejects_control_characters() {
        let checked = validate_money_minor("12\u{0000}", &MoneyRules::new("flatPrice"));
        assert_eq!(checked.errors[0].message, "contains invalid characters");
    }

    #[test]
    fn test_checked_helpers() {
        let mut sink = Vec::new();
        let ok = validate_int64("3", &IntRules::new("n")).accept_into(&mut sink);
        assert_eq!(ok, Some(3));
        let bad = validate_int64("x", &IntRules::new("n")).accept_into(&mut sink);
        assert_eq!(bad, None);
        assert_eq!(sink.len(), 1);
    }
}
