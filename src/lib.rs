//! Historical price-series retrieval for the coin detail chart.
//!
//! [`application::history_service::HistoryService`] is the entry point: it
//! resolves a range token, walks a fixed chain of market-data providers until
//! one yields a usable series, and returns a typed
//! [`domain::outcome::FetchOutcome`].
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
