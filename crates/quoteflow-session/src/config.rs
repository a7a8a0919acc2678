//! # Session Configuration
//!
//! Knobs for the search and cart sessions, read-only after construction.
//! If hot-reloading is ever needed, the sessions would take `&SessionConfig`
//! per call instead of owning a copy.

use serde::{Deserialize, Serialize};

use quoteflow_core::cart::PricingTerms;
use quoteflow_core::validation::{validate_page_size, ValidationResult};
use quoteflow_core::{DEFAULT_PAGE_SIZE, DEFAULT_TAX_RATE_BPS, SEARCH_DEBOUNCE_MS, SHIPPING_CENTS};

/// Session configuration.
///
/// Defaults reproduce the flow's fixed policy: 10% tax, $5.00 shipping,
/// 10 rows per page, 400 ms search debounce.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Rows per search result page.
    pub page_size: usize,

    /// Debounce window for rapid search triggers, in milliseconds.
    pub search_debounce_ms: u64,

    /// Tax rate in basis points, applied to the raw subtotal.
    pub tax_rate_bps: u32,

    /// Flat shipping charge in cents.
    pub shipping_cents: i64,

    /// Path of the server-rendered document page. The cache key is appended
    /// as `?k=<key>`.
    pub print_path: String,
}

impl SessionConfig {
    /// Rejects configurations no session can run with.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_page_size(self.page_size)
    }

    /// The pricing terms handed to `Cart::totals`.
    pub fn pricing_terms(&self) -> PricingTerms {
        PricingTerms {
            tax_rate_bps: self.tax_rate_bps,
            shipping_cents: self.shipping_cents,
        }
    }

    /// URL of the rendered document for a cache key.
    pub fn document_url(&self, cache_key: &str) -> String {
        format!("{}?k={}", self.print_path, cache_key)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce_ms: SEARCH_DEBOUNCE_MS,
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            shipping_cents: SHIPPING_CENTS,
            print_path: "/quote/print".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_flow_policy() {
        let config = SessionConfig::default();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.search_debounce_ms, 400);
        assert_eq!(config.tax_rate_bps, 1000);
        assert_eq!(config.shipping_cents, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let config = SessionConfig {
            page_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_document_url() {
        let config = SessionConfig::default();
        assert_eq!(config.document_url("abc123"), "/quote/print?k=abc123");
    }
}
