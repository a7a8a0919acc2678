//! # quoteflow-core: Pure Business Logic for the Quoting Flow
//!
//! This crate is the **heart** of quoteflow. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Quoteflow Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Hosting Surface (platform UI)                  │   │
//! │  │   Search table ──► Cart panel ──► Quote button ──► Print        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 quoteflow-session                               │   │
//! │  │   SearchSession, CartSession, provider traits                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ quoteflow-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  paging   │   │   │
//! │  │   │  records  │  │   cents   │  │  totals   │  │ sort/page │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (payloads, discounts, addresses, print payload)
//! - [`money`] - Money/Rate types with integer arithmetic (no floating point!)
//! - [`cart`] - The cart aggregator and its totals pipeline
//! - [`paging`] - The result paginator/sorter
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary numeric normalization and loud validators
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every total is a deterministic function of state
//! 2. **No I/O**: network and platform access live in quoteflow-session
//! 3. **Integer Money**: cents (i64) and basis points (u32), never floats
//! 4. **Defaults at the Boundary**: duck-typed payloads are normalized once,
//!    in one place, with the documented fallback rules
//!
//! ## Example Usage
//!
//! ```rust
//! use quoteflow_core::cart::{Cart, PricingTerms};
//! use quoteflow_core::types::ProductPayload;
//!
//! let mut cart = Cart::new();
//! cart.add_item(ProductPayload {
//!     product_code: Some("GC1060".into()),
//!     unit_price_cents: Some(1000), // $10.00
//!     quantity: Some(2.0),
//!     discount_value: Some(10.0),   // Percent by default
//!     ..Default::default()
//! }).unwrap();
//!
//! let totals = cart.totals(&PricingTerms::default());
//! assert_eq!(totals.grand_total_cents, 2500); // net 18 + tax 2 + ship 5
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod paging;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use quoteflow_core::Money` instead of
// `use quoteflow_core::money::Money`

pub use cart::{Cart, CartTotals, LineItem, PricedLine, PricingTerms};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Rate};
pub use paging::{DraftPatch, ResultTable, SearchRow, SortDirection, SortKey};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fixed tax rate applied to the raw cart subtotal: 10%.
///
/// ## Why a constant?
/// The flow quotes one jurisdiction with a flat rate. The sessions thread it
/// through `PricingTerms`, so a per-tenant rate is a config change, not a
/// code change.
pub const DEFAULT_TAX_RATE_BPS: u32 = 1_000;

/// Flat shipping charge in cents: $5.00.
///
/// Charged on every quote, including an empty one. That is the documented
/// product behavior, preserved deliberately.
pub const SHIPPING_CENTS: i64 = 500;

/// Default number of rows per search result page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Debounce delay for rapid successive search triggers, in milliseconds.
/// All but the latest trigger inside this window are discarded.
pub const SEARCH_DEBOUNCE_MS: u64 = 400;

/// Maximum lines allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and keeps the rendered quote document reasonable.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Maximum unit price accepted from an inbound record: $10 billion in cents.
///
/// With at most [`MAX_CART_LINES`] lines of [`MAX_LINE_QUANTITY`] each, every
/// derived total stays comfortably inside `i64`. Inbound prices above the cap
/// clamp to it, the same way negative prices clamp to zero.
pub const MAX_UNIT_PRICE_CENTS: i64 = 1_000_000_000_000;

/// Maximum length of the free-text terms printed on a quote.
pub const MAX_TERMS_LEN: usize = 2_000;
