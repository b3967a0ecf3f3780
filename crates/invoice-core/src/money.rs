//! # Money Module
//!
//! Provides the `Money` type and the exact decimal parser that turns
//! user-entered amounts like `"12.50"` into integer minor units (pence).
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: parse the decimal TEXT, never a float                    │
//! │    "12.50" → integer "12", fraction "50" → 12 × 100 + 50 = 1250        │
//! │    "12.345"  → rejected (no silent rounding)                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use invoice_core::money::Money;
//!
//! let price = Money::parse_decimal("12.50").unwrap();
//! assert_eq!(price.minor(), 1250);
//!
//! assert!(Money::parse_decimal("12.345").is_err());
//! ```

use thiserror::Error;

/// Number of minor units in one major unit (pence per pound).
pub const MINOR_PER_MAJOR: i64 = 100;

/// Maximum number of fractional digits accepted by [`Money::parse_decimal`].
pub const MAX_FRACTION_DIGITS: usize = 2;

// =============================================================================
// Parse Errors
// =============================================================================

/// Why a decimal string could not be turned into minor units.
///
/// The `Display` text is the user-facing message placed in a field error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    /// Empty after the sign, or contains something other than ASCII digits.
    #[error("must be a number")]
    NotANumber,

    /// More than one decimal point.
    #[error("must be a valid decimal")]
    InvalidDecimal,

    /// More than two digits after the decimal point.
    #[error("must have at most 2 decimal places")]
    TooManyDecimals,

    /// Does not fit in i64 minor units.
    #[error("number out of range")]
    OutOfRange,
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in minor units (pence for GBP).
///
/// ## Design Decisions
/// - **i64 (signed)**: the parser accepts a leading `-`; entity rules decide
///   whether negatives are allowed
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Storage is the bare integer**: rows hold `*_minor` columns, never `Money`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Parses a decimal string into minor units without touching floats.
    ///
    /// ## Accepted Forms
    /// ```text
    /// "10"     → 1000        "+10"   → 1000
    /// "12.5"   → 1250        "-3.20" → -320
    /// ".5"     → 50          "7."    → 700
    /// ```
    ///
    /// ## Rejected Forms
    /// ```text
    /// "1,000"  "1e3"  "12.345"  "1.2.3"  "-"  " 1"
    /// ```
    ///
    /// The input must already be trimmed; whitespace is not a digit.
    pub fn parse_decimal(text: &str) -> Result<Money, MoneyParseError> {
        let (negative, unsigned) = match text.as_bytes().first() {
            Some(b'+') => (false, &text[1..]),
            Some(b'-') => (true, &text[1..]),
            _ => (false, text),
        };

        if unsigned.is_empty() {
            return Err(MoneyParseError::NotANumber);
        }

        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((int_part, frac_part)) => {
                if frac_part.contains('.') {
                    return Err(MoneyParseError::InvalidDecimal);
                }
                (int_part, frac_part)
            }
            None => (unsigned, ""),
        };

        let int_part = if int_part.is_empty() { "0" } else { int_part };

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(int_part) || !all_digits(frac_part) {
            return Err(MoneyParseError::NotANumber);
        }

        if frac_part.len() > MAX_FRACTION_DIGITS {
            return Err(MoneyParseError::TooManyDecimals);
        }

        let whole: i64 = int_part
            .parse()
            .map_err(|_| MoneyParseError::OutOfRange)?;

        // Pad to exactly two digits: "" → 0, "5" → 50, "05" → 5
        let fraction: i64 = match frac_part.len() {
            0 => 0,
            1 => frac_part.parse::<i64>().map_err(|_| MoneyParseError::NotANumber)? * 10,
            _ => frac_part.parse().map_err(|_| MoneyParseError::NotANumber)?,
        };

        // Reject before wraparound: whole * 100 + fraction must fit in i64
        if whole > (i64::MAX - fraction) / MINOR_PER_MAJOR {
            return Err(MoneyParseError::OutOfRange);
        }

        let minor = whole * MINOR_PER_MAJOR + fraction;
        Ok(Money(if negative { -minor } else { minor }))
    }
}

/// Renders the amount as a plain decimal with two places, e.g. `-3.20`.
///
/// Currency symbols and grouping are the frontend's job.
// =============================================================================
// Unit Tests
// =============================================================================
