// Fetch outcome domain model
use super::series::{CanonicalSeries, ProviderId};
use serde::Serialize;

/// Identity of one history request.
///
/// Echoed back on every outcome so a caller that has since moved on to a
/// different coin or range can recognise and drop a late answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesRequest {
    pub coin_id: String,
    pub symbol: String,
    pub range: String,
}

impl SeriesRequest {
    pub fn new(coin_id: impl Into<String>, symbol: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            coin_id: coin_id.into(),
            symbol: symbol.into(),
            range: range.into(),
        }
    }

    pub fn is_same_request(&self, other: &SeriesRequest) -> bool {
        self.coin_id == other.coin_id
            && self.symbol.eq_ignore_ascii_case(&other.symbol)
            && self.range == other.range
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureReason {
    AllProvidersExhausted,
    InvalidRange,
}

impl FailureReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AllProvidersExhausted => "all-providers-exhausted",
            Self::InvalidRange => "invalid-range",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Success {
        request: SeriesRequest,
        series: CanonicalSeries,
        provider: ProviderId,
    },
    Failure {
        request: SeriesRequest,
        reason: FailureReason,
    },
}

impl FetchOutcome {
    pub fn request(&self) -> &SeriesRequest {
        match self {
            Self::Success { request, .. } | Self::Failure { request, .. } => request,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
