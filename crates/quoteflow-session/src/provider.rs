//! # Provider Traits
//!
//! The async boundaries of the quoting flow, expressed as traits.
//!
//! ## Boundary Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    External Collaborators                               │
//! │                                                                         │
//! │  ProductSearch    free-text key ──► product-like records                │
//! │                   (no key) ──► full catalog listing                     │
//! │  QuoteBackend     quote id ──► reference fields                         │
//! │                   opportunity id ──► bill-to/ship-to addresses          │
//! │                   opportunity id ──► new Quote record                   │
//! │  PrintCache       JSON payload ──► opaque short-lived key               │
//! │                                                                         │
//! │  The real implementations are server-side and out of scope; tests and   │
//! │  the demo run against `memory::InMemoryBackend`.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sessions take providers as generics, never as ambient singletons: the
//! caller owns the instance and its lifetime.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use quoteflow_core::types::{ProductHit, QuoteAddresses, QuoteFields};

// =============================================================================
// Backend Error
// =============================================================================

/// A failed request across an async boundary.
///
/// Sessions catch these at the call site, surface a notification, and reset
/// the affected state to a safe default. Nothing here is fatal.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request reached the other side and was rejected.
    #[error("request failed: {0}")]
    Request(String),

    /// The referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}

/// Convenience type alias for provider results.
pub type BackendResult<T> = Result<T, BackendError>;

// =============================================================================
// Provider Traits
// =============================================================================

/// Free-text product search and catalog listing.
#[allow(async_fn_in_trait)]
pub trait ProductSearch {
    /// Returns product-like records matching `search_key`.
    async fn search_products(&self, search_key: &str) -> BackendResult<Vec<ProductHit>>;

    /// Returns the full catalog, for the browse-without-a-key entry point.
    async fn list_products(&self) -> BackendResult<Vec<ProductHit>>;
}

/// Quote and opportunity record operations.
#[allow(async_fn_in_trait)]
pub trait QuoteBackend {
    /// Reference fields of an existing quote (number, status).
    async fn quote_fields(&self, quote_id: &str) -> BackendResult<QuoteFields>;

    /// Bill-to/ship-to addresses of an opportunity.
    async fn opportunity_addresses(&self, opportunity_id: &str)
        -> BackendResult<QuoteAddresses>;

    /// Creates a Quote record from an opportunity.
    async fn create_quote(&self, opportunity_id: &str) -> BackendResult<QuoteCreated>;
}

/// The cache-and-render document boundary.
#[allow(async_fn_in_trait)]
pub trait PrintCache {
    /// Stores a JSON payload and returns the opaque short-lived key the
    /// renderer uses to retrieve it.
    async fn cache_payload(&self, payload_json: &str) -> BackendResult<String>;
}

// =============================================================================
// Backend DTOs
// =============================================================================

/// Result of creating a quote from an opportunity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteCreated {
    pub quote_id: String,
    pub quote_number: String,
}
