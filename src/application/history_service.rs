// History service - Use case for fetching a coin's price history with provider fallback
use crate::application::normalizer::{NormalizationError, SeriesNormalizer};
use crate::application::price_provider::{AdapterError, PriceProvider};
use crate::domain::outcome::{FailureReason, FetchOutcome, SeriesRequest};
use crate::domain::range::{ResolvedRange, TimeRangeResolver, TimeRangeToken};
use crate::domain::series::CanonicalSeries;
use std::sync::Arc;
use thiserror::Error;

/// Why a single provider attempt did not produce a series.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error(transparent)]
    Normalization(#[from] NormalizationError),
}

impl AttemptError {
    /// Whether the next provider in the chain should be tried.
    ///
    /// None of the current failure modes can be fixed by the caller, so all of
    /// them move on to the next provider.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Adapter(
                AdapterError::Network(_)
                | AdapterError::RateLimited
                | AdapterError::NotFound(_)
                | AdapterError::MalformedResponse(_)
                | AdapterError::Empty,
            ) => true,
            Self::Normalization(
                NormalizationError::SchemaMismatch { .. } | NormalizationError::Empty(_),
            ) => true,
        }
    }
}

#[derive(Clone)]
pub struct HistoryService {
    providers: Vec<Arc<dyn PriceProvider>>,
}

impl HistoryService {
    /// `providers` is the fallback chain, highest priority first.
    pub fn new(providers: Vec<Arc<dyn PriceProvider>>) -> Self {
        Self { providers }
    }

    pub async fn get_price_history_str(
        &self,
        coin_id: &str,
        symbol: &str,
        range: &str,
    ) -> FetchOutcome {
        match range.parse::<TimeRangeToken>() {
            Ok(token) => self.get_price_history(coin_id, symbol, token).await,
            Err(e) => {
                tracing::debug!("Rejecting history request for {}: {}", coin_id, e);
                FetchOutcome::Failure {
                    request: SeriesRequest::new(coin_id, symbol, range),
                    reason: FailureReason::InvalidRange,
                }
            }
        }
    }

    pub async fn get_price_history(
        &self,
        coin_id: &str,
        symbol: &str,
        token: TimeRangeToken,
    ) -> FetchOutcome {
        let request = SeriesRequest::new(coin_id, symbol, token.as_str());
        let range = TimeRangeResolver::resolve(token);

        for (index, provider) in self.providers.iter().enumerate() {
            let provider_id = provider.id();
            tracing::debug!(
                "Trying provider {} ({}/{}) for {} over {}",
                provider_id,
                index + 1,
                self.providers.len(),
                coin_id,
                token
            );

            match Self::attempt(provider.as_ref(), coin_id, symbol, &range).await {
                Ok(series) => {
                    tracing::info!(
                        "Fetched {} points for {} over {} from {}",
                        series.len(),
                        coin_id,
                        token,
                        provider_id
                    );
                    return FetchOutcome::Success {
                        request,
                        series,
                        provider: provider_id,
                    };
                }
                Err(e) if e.is_retryable() => {
                    tracing::warn!("Provider {} failed for {}: {}", provider_id, coin_id, e);
                }
                Err(e) => {
                    tracing::error!("Provider {} failed terminally for {}: {}", provider_id, coin_id, e);
                    break;
                }
            }
        }

        tracing::error!("All providers exhausted for {} over {}", coin_id, token);
        FetchOutcome::Failure {
            request,
            reason: FailureReason::AllProvidersExhausted,
        }
    }

    async fn attempt(
        provider: &dyn PriceProvider,
        coin_id: &str,
        symbol: &str,
        range: &ResolvedRange,
    ) -> Result<CanonicalSeries, AttemptError> {
        let raw = provider.fetch(coin_id, symbol, range).await?;
        Ok(SeriesNormalizer::normalize(provider.id(), raw)?)
    }
}
