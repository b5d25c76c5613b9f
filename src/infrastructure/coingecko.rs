// CoinGecko adapter - market_chart endpoint keyed by coin id
use crate::application::price_provider::{AdapterError, PriceProvider};
use crate::domain::range::{Granularity, ResolvedRange};
use crate::domain::series::{CoinGeckoPair, ProviderId, RawSeries};
use crate::infrastructure::config::ProviderSettings;
use crate::infrastructure::http_client::{decode_json, send};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const API_KEY_HEADER: &str = "x-cg-demo-api-key";

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    #[serde(default)]
    prices: Vec<CoinGeckoPair>,
}

#[derive(Debug, Clone)]
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    vs_currency: String,
}

impl CoinGeckoProvider {
    pub fn new(client: Client, settings: &ProviderSettings, vs_currency: &str) -> Self {
        Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key().map(str::to_string),
            vs_currency: vs_currency.to_lowercase(),
        }
    }

    fn build_url(&self, coin_id: &str) -> String {
        format!(
            "{}/coins/{}/market_chart",
            self.base_url,
            urlencoding::encode(&coin_id.to_lowercase())
        )
    }

    fn query_params(&self, range: &ResolvedRange) -> Vec<(&'static str, String)> {
        let days = range
            .lookback_days()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "max".to_string());
        let interval = match range.granularity {
            Granularity::Hourly => "hourly",
            Granularity::Daily => "daily",
        };

        vec![
            ("vs_currency", self.vs_currency.clone()),
            ("days", days),
            ("interval", interval.to_string()),
        ]
    }

    fn decode(body: &str) -> Result<RawSeries, AdapterError> {
        let response: MarketChartResponse = decode_json(body)?;
        if response.prices.is_empty() {
            return Err(AdapterError::Empty);
        }
        Ok(RawSeries::CoinGecko(response.prices))
    }
}

#[async_trait]
impl PriceProvider for CoinGeckoProvider {
    fn id(&self) -> ProviderId {
        ProviderId::CoinGecko
    }

    async fn fetch(
        &self,
        coin_id: &str,
        _symbol: &str,
        range: &ResolvedRange,
    ) -> Result<RawSeries, AdapterError> {
        let mut request = self
            .client
            .get(self.build_url(coin_id))
            .header("Accept", "application/json")
            .query(&self.query_params(range));
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        tracing::debug!("CoinGecko market_chart for {} ({})", coin_id, range.token);
        let body = send(request, coin_id).await?;
        Self::decode(&body)
    }
}
