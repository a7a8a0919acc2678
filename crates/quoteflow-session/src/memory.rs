//! # In-Memory Backend
//!
//! A self-contained implementation of every provider trait, used by the
//! session tests and the demo binary. Think of it as the seed catalog plus
//! canned server responses; nothing here talks to a network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use quoteflow_core::types::{Address, ProductHit, QuoteAddresses, QuoteFields};
use uuid::Uuid;

use crate::provider::{
    BackendError, BackendResult, PrintCache, ProductSearch, QuoteBackend, QuoteCreated,
};

/// Fixture-backed provider for tests and the demo.
///
/// ## Failure Injection
/// `set_failing(true)` makes every request fail, which is how the tests
/// exercise the degrade-gracefully paths (empty result reset, basic-print
/// fallback).
#[derive(Debug)]
pub struct InMemoryBackend {
    products: Vec<ProductHit>,
    quotes: Mutex<HashMap<String, QuoteFields>>,
    addresses: HashMap<String, QuoteAddresses>,
    cache: Mutex<HashMap<String, String>>,
    next_cache_key: AtomicU64,
    next_quote_number: AtomicU64,
    failing: AtomicBool,
}

impl InMemoryBackend {
    /// An empty backend; seed it with the builder methods below.
    pub fn new() -> Self {
        InMemoryBackend {
            products: Vec::new(),
            quotes: Mutex::new(HashMap::new()),
            addresses: HashMap::new(),
            cache: Mutex::new(HashMap::new()),
            next_cache_key: AtomicU64::new(1),
            next_quote_number: AtomicU64::new(1),
            failing: AtomicBool::new(false),
        }
    }

    /// A backend seeded with a small generator/service catalog.
    pub fn with_fixture_catalog() -> Self {
        let mut backend = Self::new();
        let fixtures = [
            ("GenWatt Diesel 1000kW", "GC1060", 10_000_00),
            ("GenWatt Diesel 200kW", "GC1040", 2_500_00),
            ("GenWatt Gasoline 300kW", "GC5020", 3_500_00),
            ("GenWatt Gasoline 750kW", "GC5060", 7_500_00),
            ("SLA: Gold", "SL9080", 1_200_00),
            ("SLA: Silver", "SL9060", 600_00),
            ("SLA: Bronze", "SL9040", 300_00),
            ("Installation: Industrial - High", "IN7080", 850_00),
        ];
        for (name, code, price_cents) in fixtures {
            backend.products.push(ProductHit {
                id: Uuid::new_v4().to_string(),
                name: Some(name.to_string()),
                product_code: Some(code.to_string()),
                unit_price_cents: Some(price_cents),
                quantity: None,
            });
        }
        backend
    }

    /// Adds a product hit to the catalog.
    pub fn add_product(&mut self, hit: ProductHit) -> &mut Self {
        self.products.push(hit);
        self
    }

    /// Registers an existing quote record.
    pub fn add_quote(&self, quote_id: &str, fields: QuoteFields) {
        self.quotes
            .lock()
            .expect("quotes mutex poisoned")
            .insert(quote_id.to_string(), fields);
    }

    /// Registers an opportunity's bill-to/ship-to addresses.
    pub fn add_opportunity(&mut self, opportunity_id: &str, addresses: QuoteAddresses) {
        self.addresses.insert(opportunity_id.to_string(), addresses);
    }

    /// A plausible address pair for fixtures.
    pub fn sample_addresses() -> QuoteAddresses {
        QuoteAddresses {
            bill_to: Address {
                street: Some("1 Market St".to_string()),
                city: Some("San Francisco".to_string()),
                state: Some("CA".to_string()),
                postal_code: Some("94105".to_string()),
                country: Some("US".to_string()),
            },
            ship_to: Address {
                street: Some("200 Dock Rd".to_string()),
                city: Some("Oakland".to_string()),
                state: Some("CA".to_string()),
                postal_code: Some("94607".to_string()),
                country: Some("US".to_string()),
            },
        }
    }

    /// Toggles failure injection for every subsequent request.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// The payload stored under a cache key, if any.
    pub fn cached_payload(&self, key: &str) -> Option<String> {
        self.cache
            .lock()
            .expect("cache mutex poisoned")
            .get(key)
            .cloned()
    }

    fn check_up(&self) -> BackendResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(BackendError::Request("backend unavailable".to_string()));
        }
        Ok(())
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::with_fixture_catalog()
    }
}

impl ProductSearch for InMemoryBackend {
    async fn search_products(&self, search_key: &str) -> BackendResult<Vec<ProductHit>> {
        self.check_up()?;
        let needle = search_key.trim().to_lowercase();
        let matches = self
            .products
            .iter()
            .filter(|p| {
                let name = p.name.as_deref().unwrap_or("").to_lowercase();
                let code = p.product_code.as_deref().unwrap_or("").to_lowercase();
                name.contains(&needle) || code.contains(&needle)
            })
            .cloned()
            .collect();
        Ok(matches)
    }

    async fn list_products(&self) -> BackendResult<Vec<ProductHit>> {
        self.check_up()?;
        Ok(self.products.clone())
    }
}

impl QuoteBackend for InMemoryBackend {
    async fn quote_fields(&self, quote_id: &str) -> BackendResult<QuoteFields> {
        self.check_up()?;
        self.quotes
            .lock()
            .expect("quotes mutex poisoned")
            .get(quote_id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound {
                entity: "Quote",
                id: quote_id.to_string(),
            })
    }

    async fn opportunity_addresses(
        &self,
        opportunity_id: &str,
    ) -> BackendResult<QuoteAddresses> {
        self.check_up()?;
        self.addresses
            .get(opportunity_id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound {
                entity: "Opportunity",
                id: opportunity_id.to_string(),
            })
    }

    async fn create_quote(&self, opportunity_id: &str) -> BackendResult<QuoteCreated> {
        self.check_up()?;
        if opportunity_id.trim().is_empty() {
            return Err(BackendError::Request(
                "opportunityId is required".to_string(),
            ));
        }
        let n = self.next_quote_number.fetch_add(1, Ordering::SeqCst);
        let created = QuoteCreated {
            quote_id: Uuid::new_v4().to_string(),
            quote_number: format!("Q-{n:05}"),
        };
        self.add_quote(
            &created.quote_id,
            QuoteFields {
                quote_number: Some(created.quote_number.clone()),
                quote_status: Some("Draft".to_string()),
            },
        );
        Ok(created)
    }
}

impl PrintCache for InMemoryBackend {
    async fn cache_payload(&self, payload_json: &str) -> BackendResult<String> {
        self.check_up()?;
        let key = format!("k{}", self.next_cache_key.fetch_add(1, Ordering::SeqCst));
        self.cache
            .lock()
            .expect("cache mutex poisoned")
            .insert(key.clone(), payload_json.to_string());
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_search_matches_name_and_code() {
        let backend = InMemoryBackend::with_fixture_catalog();

        let by_name = backend.search_products("genwatt diesel").await.unwrap();
        assert_eq!(by_name.len(), 2);

        let by_code = backend.search_products("SL90").await.unwrap();
        assert_eq!(by_code.len(), 3);
    }

    #[tokio::test]
    async fn test_list_products_returns_full_catalog() {
        let backend = InMemoryBackend::with_fixture_catalog();
        let all = backend.list_products().await.unwrap();
        assert_eq!(all.len(), 8);
    }

    #[tokio::test]
    async fn test_create_quote_registers_fields() {
        let backend = InMemoryBackend::new();
        let created = backend.create_quote("006-opp-1").await.unwrap();

        let fields = backend.quote_fields(&created.quote_id).await.unwrap();
        assert_eq!(fields.quote_number, Some(created.quote_number));
        assert_eq!(fields.quote_status.as_deref(), Some("Draft"));
    }

    #[tokio::test]
    async fn test_cache_round_trip() {
        let backend = InMemoryBackend::new();
        let key = backend.cache_payload(r#"{"items":[]}"#).await.unwrap();
        assert_eq!(backend.cached_payload(&key).as_deref(), Some(r#"{"items":[]}"#));
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let backend = InMemoryBackend::with_fixture_catalog();
        backend.set_failing(true);
        assert!(backend.search_products("gen").await.is_err());
        backend.set_failing(false);
        assert!(backend.search_products("gen").await.is_ok());
    }
}
