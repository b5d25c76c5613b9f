// Shared outbound HTTP plumbing for the provider adapters
use crate::application::price_provider::AdapterError;
use crate::infrastructure::config::HttpSettings;
use anyhow::Context;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Build the client shared by every adapter.
///
/// The timeout applies to each request on its own.
pub fn build_client(settings: &HttpSettings) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(settings.request_timeout_secs))
        .user_agent(settings.user_agent.as_str())
        .build()
        .context("Failed to build HTTP client")
}

/// Send one request and return the body of a successful response.
pub async fn send(request: RequestBuilder, resource: &str) -> Result<String, AdapterError> {
    let response = request.send().await.map_err(transport_error)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(classify_status(status, resource, &body));
    }

    response.text().await.map_err(transport_error)
}

pub fn classify_status(status: StatusCode, resource: &str, body: &str) -> AdapterError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => AdapterError::RateLimited,
        StatusCode::NOT_FOUND => AdapterError::NotFound(resource.to_string()),
        _ => AdapterError::Network(format!("status {}: {}", status, truncate(body, 200))),
    }
}

pub fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T, AdapterError> {
    serde_json::from_str(body).map_err(|e| AdapterError::MalformedResponse(e.to_string()))
}

fn transport_error(e: reqwest::Error) -> AdapterError {
    if e.is_timeout() {
        AdapterError::Network(format!("request timed out: {}", e))
    } else if e.is_decode() {
        AdapterError::MalformedResponse(e.to_string())
    } else {
        AdapterError::Network(e.to_string())
    }
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::spawn_stub;
    use super::*;
    use axum::{http::StatusCode as AxumStatus, routing::get, Router};

    fn client() -> Client {
        build_client(&HttpSettings {
            request_timeout_secs: 1,
            user_agent: "test".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_classify_status() {
        assert_eq!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, "btc", ""),
            AdapterError::RateLimited
        );
        assert_eq!(
            classify_status(StatusCode::NOT_FOUND, "btc", "{}"),
            AdapterError::NotFound("btc".to_string())
        );
        assert!(matches!(
            classify_status(StatusCode::BAD_GATEWAY, "btc", "upstream"),
            AdapterError::Network(msg) if msg.contains("502")
        ));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("hi", 10), "hi");
    }

    #[test]
    fn test_decode_json_malformed() {
        let err = decode_json::<Vec<f64>>("<html>").unwrap_err();
        assert!(matches!(err, AdapterError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_send_maps_http_failures() {
        let router = Router::new()
            .route("/ok", get(|| async { "[1.0]" }))
            .route("/limited", get(|| async { (AxumStatus::TOO_MANY_REQUESTS, "slow down") }))
            .route("/broken", get(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "boom") }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(std::time::Duration::from_secs(3)).await;
                    "late"
                }),
            );
        let base = spawn_stub(router).await;
        let client = client();

        let body = send(client.get(format!("{base}/ok")), "ok").await.unwrap();
        assert_eq!(body, "[1.0]");

        assert_eq!(
            send(client.get(format!("{base}/limited")), "x").await,
            Err(AdapterError::RateLimited)
        );
        assert_eq!(
            send(client.get(format!("{base}/missing")), "missing").await,
            Err(AdapterError::NotFound("missing".to_string()))
        );
        assert!(matches!(
            send(client.get(format!("{base}/broken")), "x").await,
            Err(AdapterError::Network(_))
        ));
        assert!(matches!(
            send(client.get(format!("{base}/slow")), "x").await,
            Err(AdapterError::Network(msg)) if msg.contains("timed out")
        ));
    }
}
