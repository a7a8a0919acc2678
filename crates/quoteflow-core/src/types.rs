//! # Domain Types
//!
//! Core domain types used throughout the quoting flow.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ ProductPayload  │   │   ProductHit    │   │   QuoteFields   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  duck-typed     │   │  search result  │   │  quote_number   │       │
//! │  │  inbound record │   │  from server    │   │  quote_status   │       │
//! │  │  (all optional) │   │                 │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Discount     │   │     Address     │   │  PrintPayload   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Percent (bps)  │   │  bill-to /      │   │  what the doc   │       │
//! │  │  Amount (cents) │   │  ship-to        │   │  renderer gets  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Boundary Rule
//! Server payloads are duck-typed on the wire. They enter this crate ONLY as
//! `ProductPayload`/`ProductHit` with named optional fields; every default
//! (quantity 1, price 0, discount Percent 0) is applied in exactly one place.

use serde::{Deserialize, Serialize};

use crate::money::{Money, Rate};

// =============================================================================
// Discount
// =============================================================================

/// A per-line discount.
///
/// ## Clamping Rules
/// - `Percent`: interpreted as `clamp(value, 0, 100)` percent of the gross
/// - `Amount`: interpreted as `clamp(value, 0, gross)`
///
/// Both rules are applied in [`Discount::amount_for`], so no caller can
/// produce a negative net price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Discount {
    /// Percentage of the line gross, in basis points (1000 = 10%).
    Percent(Rate),
    /// Absolute amount in cents.
    Amount(Money),
}

impl Discount {
    /// No discount at all.
    #[inline]
    pub const fn none() -> Self {
        Discount::Percent(Rate::zero())
    }

    /// Computes the discount amount for a given line gross.
    ///
    /// ## Example
    /// ```rust
    /// use quoteflow_core::money::{Money, Rate};
    /// use quoteflow_core::types::Discount;
    ///
    /// let gross = Money::from_cents(2000); // $20.00
    ///
    /// let pct = Discount::Percent(Rate::from_bps(1000)); // 10%
    /// assert_eq!(pct.amount_for(gross).cents(), 200);
    ///
    /// let amt = Discount::Amount(Money::from_cents(5000)); // > gross
    /// assert_eq!(amt.amount_for(gross).cents(), 2000); // clamped
    /// ```
    pub fn amount_for(&self, gross: Money) -> Money {
        match self {
            Discount::Percent(rate) => gross.percent_of(rate.clamp_to_full()),
            Discount::Amount(amount) => amount.clamp_between(Money::zero(), gross),
        }
    }

    /// Normalizes the duck-typed (type, value) pair from the wire.
    ///
    /// Anything that is not exactly "Amount" is treated as Percent, matching
    /// the hosting surface's picklist behavior. A missing value is 0.
    pub fn from_wire(discount_type: Option<&str>, value: Option<f64>) -> Self {
        let value = value.unwrap_or(0.0);
        match discount_type {
            Some("Amount") => {
                let cents = if value.is_finite() && value > 0.0 {
                    (value * 100.0).round() as i64
                } else {
                    0
                };
                Discount::Amount(Money::from_cents(cents))
            }
            _ => Discount::Percent(Rate::from_percent(value)),
        }
    }
}

impl Default for Discount {
    fn default() -> Self {
        Discount::none()
    }
}

// =============================================================================
// Inbound Product Records
// =============================================================================

/// A duck-typed product record arriving from the hosting surface.
///
/// ## Why All Fields Are Optional
/// The upstream event payload is whatever the search table (or a sibling
/// component) chose to send. Rather than trusting its shape, we name every
/// field we care about and let `Cart::add_item` apply the defaulting rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPayload {
    /// Server record ID, if the product exists server-side.
    pub id: Option<String>,

    /// Display name.
    pub name: Option<String>,

    /// Business key; doubles as the cart de-duplication key.
    pub product_code: Option<String>,

    /// Unit price in cents. Missing ⇒ 0.
    pub unit_price_cents: Option<i64>,

    /// Requested quantity as a raw number. Missing/invalid/non-positive ⇒ 1.
    pub quantity: Option<f64>,

    /// "Percent" or "Amount"; anything else ⇒ "Percent".
    pub discount_type: Option<String>,

    /// Discount value: percent for Percent, currency units for Amount.
    pub discount_value: Option<f64>,

    /// Opportunity the product was added from, when known. Triggers the
    /// bill-to/ship-to address fetch in the session layer.
    pub opportunity_id: Option<String>,
}

impl ProductPayload {
    /// The normalized per-line discount for this payload.
    pub fn discount(&self) -> Discount {
        Discount::from_wire(self.discount_type.as_deref(), self.discount_value)
    }
}

/// A product-like record returned by the search boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductHit {
    pub id: String,
    pub name: Option<String>,
    pub product_code: Option<String>,
    /// Unit price in cents; the server may omit pricing for some products.
    pub unit_price_cents: Option<i64>,
    /// Seed quantity; missing ⇒ 1 when the hit becomes a table row.
    pub quantity: Option<i64>,
}

// =============================================================================
// Quote Context
// =============================================================================

/// Reference fields of an existing Quote record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteFields {
    pub quote_number: Option<String>,
    pub quote_status: Option<String>,
}

/// A postal address. Every field is optional; upstream records are sparse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

/// Bill-to / ship-to address pair pulled from an opportunity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteAddresses {
    pub bill_to: Address,
    pub ship_to: Address,
}

// =============================================================================
// Print Payload
// =============================================================================

/// One priced line as the document renderer expects it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintItem {
    pub product_code: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub discount: Discount,
    /// Net price after the line discount, in cents.
    pub net_price_cents: i64,
}

/// The structured payload cached server-side and rendered into a document.
///
/// Serialized with `serde_json` before it crosses the cache boundary; the
/// short-lived key that comes back is all the caller needs to open the
/// rendered document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintPayload {
    pub quote_id: Option<String>,
    pub quote_number: Option<String>,
    pub bill_to: Address,
    pub ship_to: Address,
    pub items: Vec<PrintItem>,
    /// Free-text terms, HTML-escaped by the session before it lands here.
    pub terms: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_percent_clamps_to_100() {
        let gross = Money::from_cents(2000);
        let d = Discount::Percent(Rate::from_percent(250.0));
        assert_eq!(d.amount_for(gross).cents(), 2000);
    }

    #[test]
    fn test_discount_amount_clamps_to_gross() {
        let gross = Money::from_cents(2000);
        let d = Discount::Amount(Money::from_cents(9999));
        assert_eq!(d.amount_for(gross).cents(), 2000);

        let small = Discount::Amount(Money::from_cents(300));
        assert_eq!(small.amount_for(gross).cents(), 300);
    }

    #[test]
    fn test_discount_from_wire_defaults_to_percent() {
        assert_eq!(
            Discount::from_wire(None, Some(10.0)),
            Discount::Percent(Rate::from_bps(1000))
        );
        assert_eq!(
            Discount::from_wire(Some("Banana"), Some(5.0)),
            Discount::Percent(Rate::from_bps(500))
        );
        assert_eq!(
            Discount::from_wire(Some("Amount"), Some(2.5)),
            Discount::Amount(Money::from_cents(250))
        );
        assert_eq!(Discount::from_wire(None, None), Discount::none());
    }

    #[test]
    fn test_discount_from_wire_rejects_garbage_amounts() {
        assert_eq!(
            Discount::from_wire(Some("Amount"), Some(-4.0)),
            Discount::Amount(Money::zero())
        );
        assert_eq!(
            Discount::from_wire(Some("Amount"), Some(f64::INFINITY)),
            Discount::Amount(Money::zero())
        );
    }

    #[test]
    fn test_payload_deserializes_sparse_json() {
        let payload: ProductPayload =
            serde_json::from_str(r#"{"productCode":"GC1060","unitPriceCents":1000}"#).unwrap();
        assert_eq!(payload.product_code.as_deref(), Some("GC1060"));
        assert_eq!(payload.unit_price_cents, Some(1000));
        assert!(payload.quantity.is_none());
        assert_eq!(payload.discount(), Discount::none());
    }
}
