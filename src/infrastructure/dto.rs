// Mapper to convert domain outcomes to JSON wire types
use crate::domain::outcome::{FailureReason, FetchOutcome};
use crate::domain::series::ProviderId;
use crate::domain::trend::{Direction, TrendSegment, TrendSegmenter};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum HistoryResponse {
    Success {
        coin_id: String,
        symbol: String,
        range: String,
        provider: ProviderId,
        points: Vec<PointDto>,
        segments: Vec<SegmentDto>,
    },
    Failure {
        coin_id: String,
        symbol: String,
        range: String,
        reason: FailureReason,
    },
}

#[derive(Debug, Serialize)]
pub struct PointDto {
    pub t: i64,
    pub price: f64,
    /// Colour of the line leaving this point.
    pub direction: Direction,
}

#[derive(Debug, Serialize)]
pub struct SegmentDto {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
}

pub fn outcome_to_response(outcome: FetchOutcome) -> HistoryResponse {
    match outcome {
        FetchOutcome::Success {
            request,
            series,
            provider,
        } => {
            let segments = TrendSegmenter::segment(&series);
            let points = series
                .points()
                .iter()
                .enumerate()
                .map(|(i, p)| PointDto {
                    t: p.timestamp_ms,
                    price: p.price,
                    direction: TrendSegmenter::direction_at(&segments, i),
                })
                .collect();

            HistoryResponse::Success {
                coin_id: request.coin_id,
                symbol: request.symbol,
                range: request.range,
                provider,
                points,
                segments: segments.into_iter().map(segment_to_dto).collect(),
            }
        }
        FetchOutcome::Failure { request, reason } => HistoryResponse::Failure {
            coin_id: request.coin_id,
            symbol: request.symbol,
            range: request.range,
            reason,
        },
    }
}

fn segment_to_dto(segment: TrendSegment) -> SegmentDto {
    SegmentDto {
        from: segment.from_index,
        to: segment.to_index,
        direction: segment.direction,
    }
}
