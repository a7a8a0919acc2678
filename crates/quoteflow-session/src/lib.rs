//! # Quoteflow Session
//!
//! Async orchestration for the quoting flow: debounced product search, the
//! cart session with its quote context, and the provider traits both talk
//! through.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    quoteflow-session                                    │
//! │                                                                         │
//! │  ┌───────────────────┐        ┌───────────────────┐                     │
//! │  │  SearchSession    │        │  CartSession      │                     │
//! │  │  ───────────────  │        │  ───────────────  │                     │
//! │  │  debounce tickets │        │  cart + context   │                     │
//! │  │  ResultTable      │───────►│  quote lifecycle  │                     │
//! │  │  (core crate)     │ payload│  print flow       │                     │
//! │  └─────────┬─────────┘        └─────────┬─────────┘                     │
//! │            │                            │                               │
//! │            ▼                            ▼                               │
//! │  ┌─────────────────────────────────────────────────┐                    │
//! │  │  provider traits: ProductSearch, QuoteBackend,  │                    │
//! │  │  PrintCache  (impl: memory::InMemoryBackend)    │                    │
//! │  └─────────────────────────────────────────────────┘                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All pure pricing and paging logic lives in `quoteflow-core`; this crate
//! adds only the async boundaries, their failure policy, and the state that
//! ties a user's search and cart together.

pub mod cart_session;
pub mod config;
pub mod error;
pub mod memory;
pub mod notify;
pub mod provider;
pub mod search;

pub use cart_session::{CartSession, PrintOutcome};
pub use config::SessionConfig;
pub use error::{ApiError, ErrorCode};
pub use memory::InMemoryBackend;
pub use notify::{Notification, Variant};
pub use provider::{
    BackendError, BackendResult, PrintCache, ProductSearch, QuoteBackend, QuoteCreated,
};
pub use search::{SearchOutcome, SearchSession, SearchTicket};
