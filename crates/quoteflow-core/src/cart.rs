//! # Cart Aggregator
//!
//! Holds the ordered list of quote lines and derives every total on demand.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Hosting Surface Action      Cart Change                                │
//! │  ──────────────────────      ───────────                                │
//! │                                                                         │
//! │  Add from search ──────────► add_item(payload)                          │
//! │                              ├── same product code? quantity += n       │
//! │                              └── else append line (defaults applied)    │
//! │                                                                         │
//! │  Click remove ─────────────► remove_item(key)                           │
//! │                                                                         │
//! │  Type order discount ──────► set_order_discount("20")                   │
//! │                                                                         │
//! │  Render totals ────────────► totals(&terms)   (pure, no side effects)   │
//! │                                                                         │
//! │  Totals pipeline:                                                       │
//! │    subtotal  = Σ gross              (RAW prices, not discounted)        │
//! │    per line: discount clamped, net = max(gross − discount, 0)           │
//! │    tax       = subtotal × rate      (on the RAW subtotal, by design)    │
//! │    shipping  = fixed                (charged even on an empty cart)     │
//! │    grand     = net + tax + shipping, then × (1 − order discount)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two of those rules look odd on first read and are intentional product
//! decisions, not bugs: tax is computed on the undiscounted subtotal, and an
//! empty cart still quotes the shipping charge.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, Rate};
use crate::types::{Discount, PrintItem, ProductPayload};
use crate::validation::parse_quantity;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY, MAX_UNIT_PRICE_CENTS};

// =============================================================================
// Pricing Terms
// =============================================================================

/// The fixed pricing knobs applied by [`Cart::totals`].
///
/// Defaults match the flow's fixed policy: 10% tax, $5.00 shipping.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingTerms {
    /// Tax rate in basis points, applied to the raw subtotal.
    pub tax_rate_bps: u32,
    /// Flat shipping charge in cents.
    pub shipping_cents: i64,
}

impl PricingTerms {
    fn tax_rate(&self) -> Rate {
        Rate::from_bps(self.tax_rate_bps)
    }

    fn shipping(&self) -> Money {
        Money::from_cents(self.shipping_cents)
    }
}

impl Default for PricingTerms {
    fn default() -> Self {
        PricingTerms {
            tax_rate_bps: crate::DEFAULT_TAX_RATE_BPS,
            shipping_cents: crate::SHIPPING_CENTS,
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// De-duplication key. The product code when the inbound record has one,
    /// otherwise a synthesized UUID so the line is still addressable.
    pub product_code: String,

    /// Server record ID, when the product exists server-side.
    pub product_id: Option<String>,

    /// Display name.
    pub name: Option<String>,

    /// Unit price, frozen at the moment the line was added.
    pub unit_price: Money,

    /// Quantity. Invariant: >= 1.
    pub quantity: i64,

    /// Per-line discount.
    pub discount: Discount,

    /// When this line was added.
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    /// Line gross: unit price × quantity, before any discount.
    #[inline]
    pub fn gross(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Discount amount for this line, clamped per the discount rules.
    #[inline]
    pub fn discount_amount(&self) -> Money {
        self.discount.amount_for(self.gross())
    }

    /// Net price: gross minus discount, never below zero.
    #[inline]
    pub fn net(&self) -> Money {
        (self.gross() - self.discount_amount()).at_least(Money::zero())
    }
}

/// A line together with its derived amounts, ready for display or print.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedLine {
    pub product_code: String,
    pub name: Option<String>,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub discount: Discount,
    pub line_total_cents: i64,
    pub discount_amount_cents: i64,
    pub net_price_cents: i64,
}

impl From<&LineItem> for PricedLine {
    fn from(line: &LineItem) -> Self {
        PricedLine {
            product_code: line.product_code.clone(),
            name: line.name.clone(),
            quantity: line.quantity,
            unit_price_cents: line.unit_price.cents(),
            discount: line.discount,
            line_total_cents: line.gross().cents(),
            discount_amount_cents: line.discount_amount().cents(),
            net_price_cents: line.net().cents(),
        }
    }
}

impl From<&PricedLine> for PrintItem {
    fn from(line: &PricedLine) -> Self {
        PrintItem {
            product_code: line.product_code.clone(),
            quantity: line.quantity,
            unit_price_cents: line.unit_price_cents,
            discount: line.discount,
            net_price_cents: line.net_price_cents,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The quote cart.
///
/// ## Invariants
/// - Lines are unique by `product_code` (adding the same code increments
///   quantity)
/// - Quantity on every line >= 1
/// - `order_discount`, when present, is a valid percentage <= 100
/// - Derived totals are never negative, except that `grand_total` always
///   includes the flat shipping charge (so an empty cart quotes shipping)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in insertion order.
    pub lines: Vec<LineItem>,

    /// Order-level percentage discount applied to the grand total.
    pub order_discount: Option<Rate>,

    /// When the cart was created/last cleared.
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            order_discount: None,
            created_at: Utc::now(),
        }
    }

    /// Adds a product to the cart or increments quantity if already present.
    ///
    /// ## Defaulting Rules (applied here, nowhere else)
    /// - de-dup key: product code, or a synthesized UUID when absent
    /// - quantity: numeric parse with fallback to 1
    /// - unit price: missing or negative ⇒ 0; above
    ///   [`MAX_UNIT_PRICE_CENTS`] ⇒ clamped, so totals cannot overflow
    /// - discount: anything not "Amount" is Percent; missing value is 0
    ///
    /// ## Errors
    /// Only the hard limits fail: too many lines, or a merged quantity over
    /// the per-line cap. Bad numeric input never errors.
    pub fn add_item(&mut self, payload: ProductPayload) -> CoreResult<&LineItem> {
        let quantity = parse_quantity(payload.quantity);
        let key = payload
            .product_code
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        if let Some(idx) = self.lines.iter().position(|l| l.product_code == key) {
            let new_qty = self.lines[idx].quantity + quantity;
            if new_qty > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_LINE_QUANTITY,
                });
            }
            self.lines[idx].quantity = new_qty;
            return Ok(&self.lines[idx]);
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        let discount = payload.discount();
        let unit_price = Money::from_cents(
            payload
                .unit_price_cents
                .unwrap_or(0)
                .clamp(0, MAX_UNIT_PRICE_CENTS),
        );
        self.lines.push(LineItem {
            product_code: key,
            product_id: payload.id,
            name: payload.name,
            unit_price,
            quantity,
            discount,
            added_at: Utc::now(),
        });
        Ok(self.lines.last().expect("just pushed"))
    }

    /// Removes the line matching `key`. Returns whether a line was removed;
    /// an unknown key is a no-op, not an error.
    pub fn remove_item(&mut self, key: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_code != key);
        self.lines.len() != before
    }

    /// Sets the order-level discount from the raw input string.
    ///
    /// Empty, non-numeric, or negative input clears the discount; values
    /// over 100 clamp to 100. See [`crate::validation::parse_percent_input`].
    pub fn set_order_discount(&mut self, input: &str) {
        self.order_discount = crate::validation::parse_percent_input(input);
    }

    /// Clears all lines and the order discount.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.order_discount = None;
        self.created_at = Utc::now();
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Every line with its derived amounts, in insertion order.
    pub fn priced_lines(&self) -> Vec<PricedLine> {
        self.lines.iter().map(PricedLine::from).collect()
    }

    /// Computes all aggregate totals. Pure: same cart + terms ⇒ same totals.
    pub fn totals(&self, terms: &PricingTerms) -> CartTotals {
        let subtotal: Money = self
            .lines
            .iter()
            .map(LineItem::gross)
            .fold(Money::zero(), |acc, m| acc + m);
        let discount_total: Money = self
            .lines
            .iter()
            .map(LineItem::discount_amount)
            .fold(Money::zero(), |acc, m| acc + m);
        let net_total: Money = self
            .lines
            .iter()
            .map(LineItem::net)
            .fold(Money::zero(), |acc, m| acc + m);

        // Tax on the raw subtotal, not net of discounts. Shipping is flat
        // and unconditional.
        let tax = subtotal.percent_of(terms.tax_rate());
        let shipping = terms.shipping();

        let mut grand_total = net_total + tax + shipping;
        if let Some(rate) = self.order_discount {
            if !rate.is_zero() {
                grand_total = grand_total.less_percent(rate.clamp_to_full());
            }
        }

        CartTotals {
            line_count: self.line_count(),
            total_quantity: self.total_quantity(),
            subtotal_cents: subtotal.cents(),
            discount_total_cents: discount_total.cents(),
            net_total_cents: net_total.cents(),
            tax_cents: tax.cents(),
            shipping_cents: shipping.cents(),
            grand_total_cents: grand_total.cents(),
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Aggregate totals summary for display and API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub subtotal_cents: i64,
    pub discount_total_cents: i64,
    pub net_total_cents: i64,
    pub tax_cents: i64,
    pub shipping_cents: i64,
    pub grand_total_cents: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(code: &str, unit_price_cents: i64, quantity: f64) -> ProductPayload {
        ProductPayload {
            id: Some(format!("01t-{code}")),
            name: Some(format!("Product {code}")),
            product_code: Some(code.to_string()),
            unit_price_cents: Some(unit_price_cents),
            quantity: Some(quantity),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_item_appends_line() {
        let mut cart = Cart::new();
        cart.add_item(payload("GC1060", 999, 2.0)).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.totals(&PricingTerms::default()).subtotal_cents, 1998);
    }

    #[test]
    fn test_add_same_code_increments_quantity() {
        let mut cart = Cart::new();
        cart.add_item(payload("GC1060", 999, 2.0)).unwrap();
        cart.add_item(payload("GC1060", 999, 3.0)).unwrap();

        assert_eq!(cart.line_count(), 1); // still one unique line
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_add_item_defaults() {
        let mut cart = Cart::new();
        // Nothing but a name: key synthesized, qty 1, price 0, Percent 0.
        let line = cart
            .add_item(ProductPayload {
                name: Some("Mystery".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert!(!line.product_code.is_empty());
        assert_eq!(line.quantity, 1);
        assert_eq!(line.unit_price, Money::zero());
        assert_eq!(line.discount, Discount::none());
    }

    #[test]
    fn test_add_item_bad_quantity_defaults_to_one() {
        let mut cart = Cart::new();
        cart.add_item(payload("A", 100, -5.0)).unwrap();
        cart.add_item(payload("B", 100, f64::NAN)).unwrap();

        assert!(cart.lines.iter().all(|l| l.quantity == 1));
    }

    #[test]
    fn test_add_item_negative_price_clamped_to_zero() {
        let mut cart = Cart::new();
        let line = cart.add_item(payload("A", -250, 1.0)).unwrap();
        assert_eq!(line.unit_price, Money::zero());
    }

    #[test]
    fn test_absurd_price_clamped_and_totals_stay_finite() {
        let mut cart = Cart::new();
        let line = cart.add_item(payload("A", i64::MAX, 999.0)).unwrap();
        assert_eq!(line.unit_price, Money::from_cents(MAX_UNIT_PRICE_CENTS));

        let totals = cart.totals(&PricingTerms::default());
        assert_eq!(totals.subtotal_cents, MAX_UNIT_PRICE_CENTS * 999);
        assert!(totals.grand_total_cents > totals.subtotal_cents);
    }

    #[test]
    fn test_quantity_cap_enforced_on_merge() {
        let mut cart = Cart::new();
        cart.add_item(payload("A", 100, 998.0)).unwrap();
        let err = cart.add_item(payload("A", 100, 2.0)).unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { .. }));
        // the failed merge leaves the original quantity untouched
        assert_eq!(cart.total_quantity(), 998);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(payload("A", 100, 1.0)).unwrap();

        assert!(cart.remove_item("A"));
        assert!(cart.is_empty());
        assert!(!cart.remove_item("A")); // no-op on missing key
    }

    #[test]
    fn test_single_line_scenario() {
        // {unitPrice=$10, qty=2, Percent 10} ⇒ gross 2000, discount 200,
        // net 1800, subtotal 2000, tax 200, shipping 500, grand 2500.
        let mut cart = Cart::new();
        cart.add_item(ProductPayload {
            product_code: Some("GC1060".to_string()),
            unit_price_cents: Some(1000),
            quantity: Some(2.0),
            discount_type: Some("Percent".to_string()),
            discount_value: Some(10.0),
            ..Default::default()
        })
        .unwrap();

        let lines = cart.priced_lines();
        assert_eq!(lines[0].line_total_cents, 2000);
        assert_eq!(lines[0].discount_amount_cents, 200);
        assert_eq!(lines[0].net_price_cents, 1800);

        let totals = cart.totals(&PricingTerms::default());
        assert_eq!(totals.subtotal_cents, 2000);
        assert_eq!(totals.discount_total_cents, 200);
        assert_eq!(totals.net_total_cents, 1800);
        assert_eq!(totals.tax_cents, 200);
        assert_eq!(totals.shipping_cents, 500);
        assert_eq!(totals.grand_total_cents, 2500);
    }

    #[test]
    fn test_empty_cart_still_quotes_shipping() {
        let cart = Cart::new();
        let totals = cart.totals(&PricingTerms::default());

        assert_eq!(totals.subtotal_cents, 0);
        assert_eq!(totals.tax_cents, 0);
        assert_eq!(totals.net_total_cents, 0);
        assert_eq!(totals.grand_total_cents, 500); // shipping only
    }

    #[test]
    fn test_order_discount_applies_to_grand_total() {
        let mut cart = Cart::new();
        cart.add_item(ProductPayload {
            product_code: Some("GC1060".to_string()),
            unit_price_cents: Some(1000),
            quantity: Some(2.0),
            discount_value: Some(10.0),
            ..Default::default()
        })
        .unwrap();

        cart.set_order_discount("20");
        let totals = cart.totals(&PricingTerms::default());
        // 2500 pre-discount × (1 − 0.20) = 2000
        assert_eq!(totals.grand_total_cents, 2000);
    }

    #[test]
    fn test_order_discount_input_semantics() {
        let mut cart = Cart::new();

        cart.set_order_discount("35.5");
        assert_eq!(cart.order_discount, Some(Rate::from_bps(3550)));

        cart.set_order_discount("250");
        assert_eq!(cart.order_discount, Some(Rate::from_bps(10_000)));

        cart.set_order_discount("oops");
        assert_eq!(cart.order_discount, None); // invalid input resets

        cart.set_order_discount("-1");
        assert_eq!(cart.order_discount, None);
    }

    #[test]
    fn test_amount_discount_never_exceeds_gross() {
        let mut cart = Cart::new();
        cart.add_item(ProductPayload {
            product_code: Some("A".to_string()),
            unit_price_cents: Some(500),
            quantity: Some(2.0),
            discount_type: Some("Amount".to_string()),
            discount_value: Some(99.0), // $99 against a $10 gross
            ..Default::default()
        })
        .unwrap();

        let line = &cart.priced_lines()[0];
        assert_eq!(line.discount_amount_cents, 1000);
        assert_eq!(line.net_price_cents, 0); // clamped, never negative
    }

    #[test]
    fn test_grand_total_monotone_in_price_and_quantity() {
        let terms = PricingTerms::default();

        let grand = |price: i64, qty: f64| {
            let mut cart = Cart::new();
            cart.add_item(payload("A", price, qty)).unwrap();
            cart.totals(&terms).grand_total_cents
        };

        assert!(grand(1000, 2.0) <= grand(1100, 2.0));
        assert!(grand(1000, 2.0) <= grand(1000, 3.0));
    }

    #[test]
    fn test_clear_resets_lines_and_discount() {
        let mut cart = Cart::new();
        cart.add_item(payload("A", 100, 1.0)).unwrap();
        cart.set_order_discount("10");

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.order_discount, None);
    }
}
