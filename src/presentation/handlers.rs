// HTTP request handlers
use crate::domain::outcome::{FailureReason, FetchOutcome};
use crate::domain::range::TimeRangeToken;
use crate::infrastructure::dto::outcome_to_response;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub symbol: Option<String>,
    pub range: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Price history for one coin over the requested range
pub async fn price_history(
    Path(coin_id): Path<String>,
    Query(query): Query<HistoryQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let compress = accepts_brotli(&headers);
    let symbol = query
        .symbol
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| coin_id.clone());
    let range = query
        .range
        .unwrap_or_else(|| TimeRangeToken::LastDay.as_str().to_string());

    let outcome = state
        .history_service
        .get_price_history_str(&coin_id, &symbol, &range)
        .await;

    // failures still carry a JSON body so the page can show an inline notice
    let status = match &outcome {
        FetchOutcome::Success { .. } => StatusCode::OK,
        FetchOutcome::Failure {
            reason: FailureReason::InvalidRange,
            ..
        } => StatusCode::BAD_REQUEST,
        FetchOutcome::Failure {
            reason: FailureReason::AllProvidersExhausted,
            ..
        } => StatusCode::BAD_GATEWAY,
    };

    match json_response(status, &outcome_to_response(outcome), compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}
