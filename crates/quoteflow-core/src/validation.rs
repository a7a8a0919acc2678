//! # Validation Module
//!
//! Boundary normalization for the quoting flow.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Two Kinds of Bad Input                             │
//! │                                                                         │
//! │  SILENT (this module's parse_* functions)                               │
//! │  ├── quantity: absent / NaN / non-positive  → 1                         │
//! │  ├── discount %: non-numeric / negative     → cleared                   │
//! │  └── discount %: > 100                      → clamped to 100            │
//! │      The user keeps typing; totals stay sensible. No exceptions.        │
//! │                                                                         │
//! │  LOUD (validate_* functions returning ValidationError)                  │
//! │  └── free-text terms over the length limit  → user-facing message       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Rate;
use crate::MAX_TERMS_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Silent Numeric Normalization
// =============================================================================

/// Coerces a raw inbound quantity into a positive integer.
///
/// ## Rules
/// - absent, non-finite, or < 1 ⇒ 1
/// - fractional values round to the nearest integer
///
/// ## Example
/// ```rust
/// use quoteflow_core::validation::parse_quantity;
///
/// assert_eq!(parse_quantity(Some(3.0)), 3);
/// assert_eq!(parse_quantity(Some(0.0)), 1);
/// assert_eq!(parse_quantity(Some(-2.0)), 1);
/// assert_eq!(parse_quantity(Some(f64::NAN)), 1);
/// assert_eq!(parse_quantity(None), 1);
/// ```
pub fn parse_quantity(raw: Option<f64>) -> i64 {
    match raw {
        Some(v) if v.is_finite() => {
            let qty = v.round() as i64;
            if qty >= 1 {
                qty
            } else {
                1
            }
        }
        _ => 1,
    }
}

/// Parses the order-level discount input field.
///
/// ## Rules (mirror the input widget, not a form validator)
/// - empty / whitespace ⇒ `None` (cleared)
/// - non-numeric or negative ⇒ `None` (reset, previous value discarded)
/// - over 100 ⇒ `Some(100%)` (clamped)
/// - otherwise ⇒ the typed percentage at basis-point precision
///
/// ## Example
/// ```rust
/// use quoteflow_core::money::Rate;
/// use quoteflow_core::validation::parse_percent_input;
///
/// assert_eq!(parse_percent_input("20"), Some(Rate::from_bps(2000)));
/// assert_eq!(parse_percent_input("8.25"), Some(Rate::from_bps(825)));
/// assert_eq!(parse_percent_input("150"), Some(Rate::from_bps(10_000)));
/// assert_eq!(parse_percent_input("-5"), None);
/// assert_eq!(parse_percent_input("abc"), None);
/// assert_eq!(parse_percent_input(""), None);
/// ```
pub fn parse_percent_input(input: &str) -> Option<Rate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let value: f64 = trimmed.parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    if value > 100.0 {
        return Some(Rate::from_bps(Rate::FULL_BPS));
    }
    Some(Rate::from_percent(value))
}

// =============================================================================
// Loud Validators
// =============================================================================

/// Validates the free-text terms attached to a printed quote.
///
/// The renderer embeds this text in the document; an unbounded blob is a
/// support ticket waiting to happen.
pub fn validate_terms(terms: &str) -> ValidationResult<()> {
    if terms.chars().count() > MAX_TERMS_LEN {
        return Err(ValidationError::TooLong {
            field: "terms".to_string(),
            max: MAX_TERMS_LEN,
        });
    }
    Ok(())
}

/// Validates a configured page size.
pub fn validate_page_size(page_size: usize) -> ValidationResult<()> {
    if page_size == 0 {
        return Err(ValidationError::MustBePositive {
            field: "pageSize".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// HTML Escaping
// =============================================================================

/// Escapes `&`, `<` and `>` for text that ends up inside rendered HTML.
///
/// The document renderer builds markup server-side from the cached payload;
/// free text must never be able to break out of its element.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity_defaults() {
        assert_eq!(parse_quantity(None), 1);
        assert_eq!(parse_quantity(Some(f64::NAN)), 1);
        assert_eq!(parse_quantity(Some(f64::INFINITY)), 1);
        assert_eq!(parse_quantity(Some(0.0)), 1);
        assert_eq!(parse_quantity(Some(-7.0)), 1);
    }

    #[test]
    fn test_parse_quantity_rounds() {
        assert_eq!(parse_quantity(Some(2.0)), 2);
        assert_eq!(parse_quantity(Some(2.6)), 3);
        assert_eq!(parse_quantity(Some(1.4)), 1);
    }

    #[test]
    fn test_parse_percent_input_valid() {
        assert_eq!(parse_percent_input("0"), Some(Rate::zero()));
        assert_eq!(parse_percent_input(" 12.5 "), Some(Rate::from_bps(1250)));
        assert_eq!(parse_percent_input("100"), Some(Rate::from_bps(10_000)));
    }

    #[test]
    fn test_parse_percent_input_clamps_over_100() {
        assert_eq!(parse_percent_input("100.01"), Some(Rate::from_bps(10_000)));
        assert_eq!(parse_percent_input("999"), Some(Rate::from_bps(10_000)));
    }

    #[test]
    fn test_parse_percent_input_rejects() {
        assert_eq!(parse_percent_input(""), None);
        assert_eq!(parse_percent_input("   "), None);
        assert_eq!(parse_percent_input("ten"), None);
        assert_eq!(parse_percent_input("-0.5"), None);
        assert_eq!(parse_percent_input("NaN"), None);
    }

    #[test]
    fn test_validate_terms() {
        assert!(validate_terms("Net 30. FOB destination.").is_ok());
        let long = "x".repeat(MAX_TERMS_LEN + 1);
        assert!(validate_terms(&long).is_err());
    }

    #[test]
    fn test_validate_page_size() {
        assert!(validate_page_size(10).is_ok());
        assert!(validate_page_size(0).is_err());
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("Net 30 & <b>no returns</b>"),
            "Net 30 &amp; &lt;b&gt;no returns&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }
}
