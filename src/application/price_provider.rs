// Provider trait for historical price data access
use crate::domain::range::ResolvedRange;
use crate::domain::series::{ProviderId, RawSeries};
use async_trait::async_trait;
use thiserror::Error;

/// Expected failure modes of a single provider call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    #[error("network error: {0}")]
    Network(String),

    #[error("rate limited")]
    RateLimited,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("provider returned no data")]
    Empty,
}

#[async_trait]
pub trait PriceProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Issue exactly one request for the given window.
    ///
    /// Expected failures (HTTP errors, timeouts, missing or unparseable data)
    /// come back as [`AdapterError`]; retrying is left to the caller.
    async fn fetch(
        &self,
        coin_id: &str,
        symbol: &str,
        range: &ResolvedRange,
    ) -> Result<RawSeries, AdapterError>;
}
