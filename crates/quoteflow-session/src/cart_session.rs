//! # Cart Session
//!
//! Owns a quote cart plus its server-side context, and drives the quote
//! lifecycle against the backend traits.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Session Lifecycle                               │
//! │                                                                         │
//! │  attach_quote(id) ────► fetch quote number/status (best effort)         │
//! │                                                                         │
//! │  add_item(payload) ───► first item carrying an opportunity id also      │
//! │                         fetches bill-to/ship-to (best effort)           │
//! │  remove_item(key)                                                       │
//! │  set_discount_input   set_terms                                         │
//! │                                                                         │
//! │  create_quote(opp) ───► backend creates the record; session adopts      │
//! │                         the new quote id and number                     │
//! │                                                                         │
//! │  generate_quote_document                                                │
//! │    ├── empty cart ────► NothingToPrint (warning, no request)            │
//! │    ├── cache ok ──────► Document { url }                                │
//! │    └── cache failed ──► BasicPrint { payload } (local fallback)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! "Best effort" means: a failed context fetch logs a warning and leaves the
//! default in place; it never blocks cart work. Failures the user must act
//! on come back as `ApiError` or as a notification.

use tracing::{debug, info, warn};

use quoteflow_core::cart::{Cart, CartTotals, PricedLine};
use quoteflow_core::types::{PrintItem, PrintPayload, ProductPayload, QuoteAddresses, QuoteFields};
use quoteflow_core::validation::{escape_html, validate_terms};

use crate::config::SessionConfig;
use crate::error::ApiError;
use crate::notify::Notification;
use crate::provider::{PrintCache, QuoteBackend, QuoteCreated};

// =============================================================================
// Print Outcome
// =============================================================================

/// Result of the print flow. Only one arm is a hard stop, and even that one
/// is just a warning - the print path degrades, it does not fail.
#[derive(Debug)]
pub enum PrintOutcome {
    /// Cart empty; nothing was sent anywhere.
    NothingToPrint,
    /// Payload cached; open this URL to view the rendered document.
    Document { url: String },
    /// Caching failed; render locally from the payload instead.
    BasicPrint {
        payload: PrintPayload,
        error: ApiError,
    },
}

impl PrintOutcome {
    /// The notification to show for this outcome, if any.
    pub fn notification(&self) -> Option<Notification> {
        match self {
            PrintOutcome::NothingToPrint => Some(Notification::warning(
                "Nothing to print",
                "Your cart is empty.",
            )),
            PrintOutcome::Document { .. } => None,
            PrintOutcome::BasicPrint { error, .. } => Some(Notification::error(
                "Print failed",
                format!("{} - using basic print instead.", error.message),
            )),
        }
    }
}

// =============================================================================
// Cart Session
// =============================================================================

/// One user's quoting session: the cart, its quote context, and the backend
/// it talks to.
#[derive(Debug)]
pub struct CartSession<B> {
    backend: B,
    config: SessionConfig,
    cart: Cart,
    quote_id: Option<String>,
    quote_fields: QuoteFields,
    addresses: QuoteAddresses,
    opportunity_id: Option<String>,
    terms: String,
}

impl<B: QuoteBackend + PrintCache> CartSession<B> {
    pub fn new(backend: B, config: SessionConfig) -> Result<Self, ApiError> {
        config.validate()?;
        Ok(CartSession {
            backend,
            config,
            cart: Cart::new(),
            quote_id: None,
            quote_fields: QuoteFields::default(),
            addresses: QuoteAddresses::default(),
            opportunity_id: None,
            terms: String::new(),
        })
    }

    /// Attaches an existing quote and fetches its reference fields.
    ///
    /// Best effort: a failed fetch logs a warning and leaves the defaults;
    /// the cart stays fully usable.
    pub async fn attach_quote(&mut self, quote_id: &str) {
        self.quote_id = Some(quote_id.to_string());
        match self.backend.quote_fields(quote_id).await {
            Ok(fields) => {
                debug!(quote_id, number = ?fields.quote_number, "quote fields loaded");
                self.quote_fields = fields;
            }
            Err(err) => {
                warn!(quote_id, error = %err, "quote fields fetch failed");
            }
        }
    }

    /// Adds a product to the cart (or increments its line) and returns the
    /// recomputed totals.
    ///
    /// The first payload carrying an opportunity id also triggers the
    /// address fetch, again best effort.
    pub async fn add_item(&mut self, payload: ProductPayload) -> Result<CartTotals, ApiError> {
        if self.opportunity_id.is_none() {
            if let Some(opportunity_id) = payload.opportunity_id.clone() {
                self.opportunity_id = Some(opportunity_id.clone());
                self.fetch_addresses(&opportunity_id).await;
            }
        }

        let line = self.cart.add_item(payload)?;
        debug!(
            product_code = %line.product_code,
            quantity = line.quantity,
            "item added to cart"
        );
        Ok(self.totals())
    }

    async fn fetch_addresses(&mut self, opportunity_id: &str) {
        match self.backend.opportunity_addresses(opportunity_id).await {
            Ok(addresses) => {
                debug!(opportunity_id, "addresses loaded");
                self.addresses = addresses;
            }
            Err(err) => {
                warn!(opportunity_id, error = %err, "address fetch failed");
            }
        }
    }

    /// Removes a line by its de-dup key. Unknown keys are a no-op.
    pub fn remove_item(&mut self, key: &str) -> bool {
        self.cart.remove_item(key)
    }

    /// Feeds the order-level discount input field through its clamp/reject
    /// rules.
    pub fn set_discount_input(&mut self, input: &str) {
        self.cart.set_order_discount(input);
    }

    /// Sets the free-text terms printed on the quote.
    pub fn set_terms(&mut self, terms: &str) -> Result<(), ApiError> {
        validate_terms(terms)?;
        self.terms = terms.to_string();
        Ok(())
    }

    /// Current aggregate totals under the configured pricing terms.
    pub fn totals(&self) -> CartTotals {
        self.cart.totals(&self.config.pricing_terms())
    }

    /// Every cart line with its derived amounts.
    pub fn priced_lines(&self) -> Vec<PricedLine> {
        self.cart.priced_lines()
    }

    /// Read access to the cart itself.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The attached quote's number, once known.
    pub fn quote_number(&self) -> Option<&str> {
        self.quote_fields.quote_number.as_deref()
    }

    /// The attached quote's status, once known.
    pub fn quote_status(&self) -> Option<&str> {
        self.quote_fields.quote_status.as_deref()
    }

    /// The bill-to/ship-to pair, once an opportunity is known.
    pub fn addresses(&self) -> &QuoteAddresses {
        &self.addresses
    }

    /// Creates a Quote record from an opportunity and adopts it as this
    /// session's quote.
    pub async fn create_quote(&mut self, opportunity_id: &str) -> Result<QuoteCreated, ApiError> {
        let created = self.backend.create_quote(opportunity_id).await?;
        info!(
            quote_id = %created.quote_id,
            quote_number = %created.quote_number,
            "quote created"
        );
        self.quote_id = Some(created.quote_id.clone());
        self.quote_fields = QuoteFields {
            quote_number: Some(created.quote_number.clone()),
            quote_status: Some("Draft".to_string()),
        };
        Ok(created)
    }

    /// Runs the print flow: build payload → cache → document URL, with the
    /// basic-print fallback when caching fails.
    pub async fn generate_quote_document(&self) -> PrintOutcome {
        if self.cart.is_empty() {
            return PrintOutcome::NothingToPrint;
        }

        let payload = self.print_payload();
        let payload_json = match serde_json::to_string(&payload) {
            Ok(json) => json,
            Err(err) => {
                // Serialization of our own types failing is effectively
                // unreachable, but the fallback path costs nothing.
                warn!(error = %err, "print payload serialization failed");
                return PrintOutcome::BasicPrint {
                    payload,
                    error: ApiError::new(
                        crate::error::ErrorCode::BackendError,
                        err.to_string(),
                    ),
                };
            }
        };

        match self.backend.cache_payload(&payload_json).await {
            Ok(key) => {
                let url = self.config.document_url(&key);
                info!(%url, "print payload cached");
                PrintOutcome::Document { url }
            }
            Err(err) => {
                warn!(error = %err, "print cache failed; falling back to basic print");
                PrintOutcome::BasicPrint {
                    payload,
                    error: err.into(),
                }
            }
        }
    }

    /// The structured payload the document renderer expects.
    pub fn print_payload(&self) -> PrintPayload {
        let items = self
            .cart
            .priced_lines()
            .iter()
            .map(PrintItem::from)
            .collect();
        PrintPayload {
            quote_id: self.quote_id.clone(),
            quote_number: self.quote_fields.quote_number.clone(),
            bill_to: self.addresses.bill_to.clone(),
            ship_to: self.addresses.ship_to.clone(),
            items,
            terms: escape_html(&self.terms),
        }
    }

    /// Submit-for-approval stub: acknowledged, not yet wired to an approval
    /// process server-side.
    pub fn submit_for_approval(&self) -> Notification {
        if self.quote_id.is_none() {
            return Notification::warning(
                "No Quote to Submit",
                "A Quote ID is required to submit for approval.",
            );
        }
        Notification::success("Submitted", "The quote has been submitted for approval.")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
