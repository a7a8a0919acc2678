//! # Search Session
//!
//! Drives the product search boundary and owns the result table. Two entry
//! points feed the same table: debounced keyed search, and a keyless catalog
//! browse.
//!
//! ## Debounce Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Debounced Search                                     │
//! │                                                                         │
//! │  keystroke "g"   ──► request_search ──► ticket #1                       │
//! │  keystroke "ge"  ──► request_search ──► ticket #2                       │
//! │  keystroke "gen" ──► request_search ──► ticket #3                       │
//! │                                                                         │
//! │  run_search(#1) ─ sleep 400ms ─► #1 != latest ──► Discarded (no call)   │
//! │  run_search(#3) ─ sleep 400ms ─► #3 == latest ──► provider.search(...)  │
//! │                                                                         │
//! │  One logical thread of control: tickets are compared against the        │
//! │  latest generation, so only the newest trigger ever reaches the         │
//! │  provider. Dropping an in-flight run_search future is also fine.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Policy
//! A failed request never leaves stale rows on screen: the table resets to
//! empty and the caller gets an error notification to display. Blank input
//! clears without calling the provider at all.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use quoteflow_core::paging::{DraftPatch, ResultTable};
use quoteflow_core::types::ProductPayload;

use crate::config::SessionConfig;
use crate::error::ApiError;
use crate::notify::Notification;
use crate::provider::ProductSearch;

// =============================================================================
// Tickets and Outcomes
// =============================================================================

/// A claim ticket for one search trigger. Only the latest ticket survives
/// the debounce window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
}

/// What a search trigger resolved to.
#[derive(Debug)]
pub enum SearchOutcome {
    /// Superseded by a newer trigger; the provider was never called.
    Discarded,
    /// Blank key: rows cleared without a request.
    Cleared,
    /// Rows loaded; the table was re-sorted and reset to page 1.
    Loaded { count: usize },
    /// The request failed; rows were reset to empty.
    Failed(Notification),
}

// =============================================================================
// Search Session
// =============================================================================

/// Owns the search key, the debounce generation, and the result table.
///
/// The provider is a generic, not an ambient singleton: the caller decides
/// which backend this session talks to and for how long it lives.
#[derive(Debug)]
pub struct SearchSession<P> {
    provider: P,
    config: SessionConfig,
    table: ResultTable,
    search_key: String,
    generation: u64,
}

impl<P: ProductSearch> SearchSession<P> {
    pub fn new(provider: P, config: SessionConfig) -> Result<Self, ApiError> {
        config.validate()?;
        let table = ResultTable::new(config.page_size);
        Ok(SearchSession {
            provider,
            config,
            table,
            search_key: String::new(),
            generation: 0,
        })
    }

    /// Records a new search key and returns the ticket for this trigger.
    ///
    /// Call this on every keystroke; award the ticket to [`run_search`],
    /// which discards it if a newer trigger arrived in the meantime.
    ///
    /// [`run_search`]: SearchSession::run_search
    pub fn request_search(&mut self, key: &str) -> SearchTicket {
        self.search_key = key.to_string();
        self.generation += 1;
        SearchTicket {
            generation: self.generation,
        }
    }

    /// Waits out the debounce window, then searches - unless the ticket was
    /// superseded, in which case nothing is sent to the provider.
    pub async fn run_search(&mut self, ticket: SearchTicket) -> SearchOutcome {
        sleep(Duration::from_millis(self.config.search_debounce_ms)).await;
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                latest = self.generation,
                "search trigger superseded"
            );
            return SearchOutcome::Discarded;
        }
        self.search_now().await
    }

    /// Searches immediately with the current key, skipping the debounce.
    pub async fn search_now(&mut self) -> SearchOutcome {
        let key = self.search_key.trim().to_string();
        if key.is_empty() {
            self.table.clear();
            return SearchOutcome::Cleared;
        }

        debug!(search_key = %key, "searching products");
        match self.provider.search_products(&key).await {
            Ok(hits) => {
                let count = hits.len();
                self.table.load(hits);
                debug!(count, "search results loaded");
                SearchOutcome::Loaded { count }
            }
            Err(err) => {
                // Never leave stale rows behind a failed request.
                warn!(error = %err, "product search failed; resetting results");
                self.table.clear();
                SearchOutcome::Failed(Notification::error("Search failed", err.to_string()))
            }
        }
    }

    /// Loads the full catalog without a search key (the browse entry point).
    ///
    /// Clears the search key and supersedes any pending debounced trigger,
    /// so a stale keyed search can never overwrite the browsed rows. Failure
    /// policy matches [`search_now`]: the table resets to empty.
    ///
    /// [`search_now`]: SearchSession::search_now
    pub async fn browse_catalog(&mut self) -> SearchOutcome {
        self.search_key.clear();
        self.generation += 1;

        debug!("loading full catalog");
        match self.provider.list_products().await {
            Ok(hits) => {
                let count = hits.len();
                self.table.load(hits);
                debug!(count, "catalog loaded");
                SearchOutcome::Loaded { count }
            }
            Err(err) => {
                warn!(error = %err, "catalog listing failed; resetting results");
                self.table.clear();
                SearchOutcome::Failed(Notification::error("Browse failed", err.to_string()))
            }
        }
    }

    /// The result table (read access: visible rows, page state, sort state).
    pub fn table(&self) -> &ResultTable {
        &self.table
    }

    /// The result table for sorting, draft merging, and page navigation.
    pub fn table_mut(&mut self) -> &mut ResultTable {
        &mut self.table
    }

    /// The current search key.
    pub fn search_key(&self) -> &str {
        &self.search_key
    }

    /// The add-to-cart payload for a row, honoring unsaved draft edits.
    /// Returns `None` for an unknown row id.
    pub fn add_to_cart_payload(
        &self,
        row_id: &str,
        drafts: &[DraftPatch],
    ) -> Option<ProductPayload> {
        self.table
            .effective_row(row_id, drafts)
            .map(|row| row.to_payload())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
