// CryptoCompare adapter - histohour/histoday endpoints keyed by ticker symbol
use crate::application::price_provider::{AdapterError, PriceProvider};
use crate::domain::range::{Granularity, ResolvedRange, MAX_DAILY_SAMPLES};
use crate::domain::series::{CryptoCompareBar, ProviderId, RawSeries};
use crate::infrastructure::config::ProviderSettings;
use crate::infrastructure::http_client::{decode_json, send};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HistoResponse {
    response: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: HistoData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HistoData {
    #[serde(default)]
    data: Vec<CryptoCompareBar>,
}

#[derive(Debug, Clone)]
pub struct CryptoCompareProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    quote_currency: String,
}

impl CryptoCompareProvider {
    pub fn new(client: Client, settings: &ProviderSettings, quote_currency: &str) -> Self {
        Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key().map(str::to_string),
            quote_currency: quote_currency.to_uppercase(),
        }
    }

    fn build_url(&self, granularity: Granularity) -> String {
        let endpoint = match granularity {
            Granularity::Hourly => "histohour",
            Granularity::Daily => "histoday",
        };
        format!("{}/data/v2/{}", self.base_url, endpoint)
    }

    fn query_params(&self, symbol: &str, range: &ResolvedRange) -> Vec<(&'static str, String)> {
        // `limit` counts intervals, so N points need N - 1
        let limit = range
            .approximate_sample_count
            .clamp(2, MAX_DAILY_SAMPLES)
            .saturating_sub(1);

        let mut params = vec![
            ("fsym", symbol.to_uppercase()),
            ("tsym", self.quote_currency.clone()),
            ("limit", limit.to_string()),
        ];
        if range.lookback_start.is_none() {
            params.push(("allData", "true".to_string()));
        }
        params
    }

    fn decode(body: &str, symbol: &str) -> Result<RawSeries, AdapterError> {
        let response: HistoResponse = decode_json(body)?;

        if !response.response.eq_ignore_ascii_case("success") {
            return Err(Self::classify_error_message(&response.message, symbol));
        }
        if response.data.data.is_empty() {
            return Err(AdapterError::Empty);
        }
        Ok(RawSeries::CryptoCompare(response.data.data))
    }

    /// CryptoCompare reports most failures as HTTP 200 with `"Response": "Error"`.
    fn classify_error_message(message: &str, symbol: &str) -> AdapterError {
        let lower = message.to_lowercase();
        if lower.contains("rate limit") {
            AdapterError::RateLimited
        } else if lower.contains("does not exist") || lower.contains("no data") {
            AdapterError::NotFound(symbol.to_string())
        } else {
            AdapterError::MalformedResponse(message.to_string())
        }
    }
}

#[async_trait]
impl PriceProvider for CryptoCompareProvider {
    fn id(&self) -> ProviderId {
        ProviderId::CryptoCompare
    }

    async fn fetch(
        &self,
        _coin_id: &str,
        symbol: &str,
        range: &ResolvedRange,
    ) -> Result<RawSeries, AdapterError> {
        let mut request = self
            .client
            .get(self.build_url(range.granularity))
            .header("Accept", "application/json")
            .query(&self.query_params(symbol, range));
        if let Some(key) = &self.api_key {
            request = request.header("authorization", format!("Apikey {}", key));
        }

        tracing::debug!("CryptoCompare history for {} ({})", symbol, range.token);
        let body = send(request, symbol).await?;
        Self::decode(&body, symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::range::{TimeRangeResolver, TimeRangeToken};
    use crate::infrastructure::http_client::test_support::spawn_stub;
    use axum::{extract::Query, http::HeaderMap, routing::get, Router};
    use std::collections::HashMap;

    fn provider(base_url: &str, api_key: Option<&str>) -> CryptoCompareProvider {
        let settings = ProviderSettings {
            base_url: base_url.to_string(),
            api_key: api_key.map(str::to_string),
        };
        CryptoCompareProvider::new(Client::new(), &settings, "usd")
    }

    fn params(token: TimeRangeToken) -> HashMap<&'static str, String> {
        let range = TimeRangeResolver::resolve(token);
        provider("http://unused", None)
            .query_params("btc", &range)
            .into_iter()
            .collect()
    }

    #[test]
    fn test_query_uses_sample_limit() {
        let week = params(TimeRangeToken::LastWeek);
        assert_eq!(week["fsym"], "BTC");
        assert_eq!(week["tsym"], "USD");
        assert_eq!(week["limit"], "6");
        assert!(!week.contains_key("allData"));

        assert_eq!(params(TimeRangeToken::LastDay)["limit"], "23");
        assert_eq!(params(TimeRangeToken::LastYear)["limit"], "364");

        let all = params(TimeRangeToken::AllTime);
        assert_eq!(all["limit"], "1999");
        assert_eq!(all["allData"], "true");
    }

    #[test]
    fn test_endpoint_by_granularity() {
        let p = provider("https://min-api.example.com/", None);
        assert_eq!(
            p.build_url(Granularity::Hourly),
            "https://min-api.example.com/data/v2/histohour"
        );
        assert_eq!(
            p.build_url(Granularity::Daily),
            "https://min-api.example.com/data/v2/histoday"
        );
    }

    #[test]
    fn test_decode_ohlc_records() {
        let body = r#"{
            "Response": "Success",
            "Message": "",
            "HasWarning": false,
            "Type": 100,
            "Data": {
                "Aggregated": false,
                "TimeFrom": 1717113600,
                "TimeTo": 1717200000,
                "Data": [
                    {"time": 1717113600, "high": 69000.1, "low": 67000.2, "open": 68000.0, "volumefrom": 1.0, "volumeto": 2.0, "close": 67500.0, "conversionType": "direct", "conversionSymbol": ""},
                    {"time": 1717200000, "high": 68000.0, "low": 66000.0, "open": 67500.0, "volumefrom": 1.0, "volumeto": 2.0, "close": 67750.5, "conversionType": "direct", "conversionSymbol": ""}
                ]
            }
        }"#;
        let RawSeries::CryptoCompare(bars) = CryptoCompareProvider::decode(body, "btc").unwrap() else {
            panic!("wrong raw variant");
        };
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].time, 1_717_200_000);
        assert_eq!(bars[1].close, 67750.5);
        assert_eq!(bars[0].open, 68000.0);
    }

    #[test]
    fn test_decode_error_responses() {
        let limited = r#"{"Response":"Error","Message":"You are over your rate limit please upgrade your account!","Data":{}}"#;
        assert_eq!(
            CryptoCompareProvider::decode(limited, "btc"),
            Err(AdapterError::RateLimited)
        );

        let missing = r#"{"Response":"Error","Message":"cccagg_or_exchange market does not exist for this coin pair (XYZ-USD)","Data":{}}"#;
        assert_eq!(
            CryptoCompareProvider::decode(missing, "xyz"),
            Err(AdapterError::NotFound("xyz".to_string()))
        );

        let odd = r#"{"Response":"Error","Message":"fsym param is empty or null.","Data":{}}"#;
        assert!(matches!(
            CryptoCompareProvider::decode(odd, ""),
            Err(AdapterError::MalformedResponse(_))
        ));

        let empty = r#"{"Response":"Success","Message":"","Data":{"Data":[]}}"#;
        assert_eq!(
            CryptoCompareProvider::decode(empty, "btc"),
            Err(AdapterError::Empty)
        );

        assert!(matches!(
            CryptoCompareProvider::decode("[]", "btc"),
            Err(AdapterError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_sends_optional_api_key() {
        let router = Router::new().route(
            "/data/v2/histoday",
            get(|headers: HeaderMap, Query(q): Query<HashMap<String, String>>| async move {
                let keyed = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    == Some("Apikey k-123");
                let close = if keyed { 2.0 } else { 1.0 };
                format!(
                    r#"{{"Response":"Success","Data":{{"Data":[{{"time":1,"close":{close}}},{{"time":2,"close":{close}}}]}},"Limit":"{}"}}"#,
                    q.get("limit").cloned().unwrap_or_default()
                )
            }),
        );
        let base = spawn_stub(router).await;
        let range = TimeRangeResolver::resolve(TimeRangeToken::LastMonth);

        let anonymous = provider(&base, None).fetch("bitcoin", "btc", &range).await.unwrap();
        let keyed = provider(&base, Some("k-123")).fetch("bitcoin", "btc", &range).await.unwrap();

        let close_of = |raw: RawSeries| match raw {
            RawSeries::CryptoCompare(bars) => bars[0].close,
            other => panic!("wrong variant: {other:?}"),
        };
        assert_eq!(close_of(anonymous), 1.0);
        assert_eq!(close_of(keyed), 2.0);
    }
}
