// CoinPaprika adapter - historical ticks bounded by absolute epoch seconds
use crate::application::price_provider::{AdapterError, PriceProvider};
use crate::domain::range::{Granularity, ResolvedRange};
use crate::domain::series::{CoinPaprikaTick, ProviderId, RawSeries};
use crate::infrastructure::config::ProviderSettings;
use crate::infrastructure::http_client::{decode_json, send};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;

/// Oldest history the public endpoint serves in one call.
const MAX_LOOKBACK_DAYS: i64 = 365;

#[derive(Debug, Clone)]
pub struct CoinPaprikaProvider {
    client: Client,
    base_url: String,
    quote: String,
}

impl CoinPaprikaProvider {
    pub fn new(client: Client, settings: &ProviderSettings, quote: &str) -> Self {
        Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            quote: quote.to_lowercase(),
        }
    }

    /// CoinPaprika ids look like `btc-bitcoin`.
    fn ticker_id(coin_id: &str, symbol: &str) -> String {
        format!(
            "{}-{}",
            symbol.trim().to_lowercase(),
            coin_id.trim().to_lowercase()
        )
    }

    fn build_url(&self, ticker_id: &str) -> String {
        format!(
            "{}/tickers/{}/historical",
            self.base_url,
            urlencoding::encode(ticker_id)
        )
    }

    fn window_start(range: &ResolvedRange) -> DateTime<Utc> {
        let earliest = range.lookback_end - Duration::days(MAX_LOOKBACK_DAYS);
        match range.lookback_start {
            Some(start) if start > earliest => start,
            _ => earliest,
        }
    }

    fn query_params(&self, range: &ResolvedRange) -> Vec<(&'static str, String)> {
        let interval = match range.granularity {
            Granularity::Hourly => "1h",
            Granularity::Daily => "1d",
        };

        vec![
            ("start", Self::window_start(range).timestamp().to_string()),
            ("end", range.lookback_end.timestamp().to_string()),
            ("interval", interval.to_string()),
            ("quote", self.quote.clone()),
        ]
    }

    fn decode(body: &str) -> Result<RawSeries, AdapterError> {
        let ticks: Vec<CoinPaprikaTick> = decode_json(body)?;
        if ticks.is_empty() {
            return Err(AdapterError::Empty);
        }
        Ok(RawSeries::CoinPaprika(ticks))
    }
}

#[async_trait]
impl PriceProvider for CoinPaprikaProvider {
    fn id(&self) -> ProviderId {
        ProviderId::CoinPaprika
    }

    async fn fetch(
        &self,
        coin_id: &str,
        symbol: &str,
        range: &ResolvedRange,
    ) -> Result<RawSeries, AdapterError> {
        let ticker_id = Self::ticker_id(coin_id, symbol);
        let request = self
            .client
            .get(self.build_url(&ticker_id))
            .header("Accept", "application/json")
            .query(&self.query_params(range));

        tracing::debug!("CoinPaprika history for {} ({})", ticker_id, range.token);
        let body = send(request, &ticker_id).await?;
        Self::decode(&body)
    }
}
