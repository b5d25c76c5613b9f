// Price series domain models
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    CoinGecko,
    CryptoCompare,
    CoinPaprika,
}

impl ProviderId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CoinGecko => "coingecko",
            Self::CryptoCompare => "cryptocompare",
            Self::CoinPaprika => "coinpaprika",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub timestamp_ms: i64,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp_ms: i64, price: f64) -> Self {
        Self {
            timestamp_ms,
            price,
        }
    }
}

/// Ascending, duplicate-free series of at least two points.
///
/// Only the normalizer builds these, so holders can rely on the ordering
/// without re-checking it.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalSeries {
    points: Vec<PricePoint>,
}

impl CanonicalSeries {
    pub(crate) fn from_sorted(points: Vec<PricePoint>) -> Self {
        debug_assert!(points.len() >= 2);
        debug_assert!(points
            .windows(2)
            .all(|w| w[0].timestamp_ms < w[1].timestamp_ms));
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// CoinGecko `market_chart` price pair: `[unix_millis, price]`.
pub type CoinGeckoPair = [f64; 2];

/// CryptoCompare `histoday`/`histohour` candle. `time` is unix seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoCompareBar {
    pub time: i64,
    #[serde(default)]
    pub open: f64,
    #[serde(default)]
    pub high: f64,
    #[serde(default)]
    pub low: f64,
    pub close: f64,
}

/// CoinPaprika historical tick. `timestamp` is RFC 3339.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinPaprikaTick {
    pub timestamp: String,
    pub price: Option<f64>,
}

/// Provider-native payload, handed from an adapter straight to the normalizer.
#[derive(Debug, Clone, PartialEq)]
pub enum RawSeries {
    CoinGecko(Vec<CoinGeckoPair>),
    CryptoCompare(Vec<CryptoCompareBar>),
    CoinPaprika(Vec<CoinPaprikaTick>),
}

impl RawSeries {
    pub fn provider(&self) -> ProviderId {
        match self {
            Self::CoinGecko(_) => ProviderId::CoinGecko,
            Self::CryptoCompare(_) => ProviderId::CryptoCompare,
            Self::CoinPaprika(_) => ProviderId::CoinPaprika,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::CoinGecko(pairs) => pairs.len(),
            Self::CryptoCompare(bars) => bars.len(),
            Self::CoinPaprika(ticks) => ticks.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
