// Series normalizer - converts provider-native payloads into a canonical series
use crate::domain::series::{CanonicalSeries, PricePoint, ProviderId, RawSeries};
use thiserror::Error;

const MIN_CHARTABLE_POINTS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    #[error("payload from {actual} cannot be read as {expected}")]
    SchemaMismatch {
        expected: ProviderId,
        actual: ProviderId,
    },

    #[error("only {0} usable points after normalization")]
    Empty(usize),
}

pub struct SeriesNormalizer;

impl SeriesNormalizer {
    pub fn normalize(
        provider: ProviderId,
        raw: RawSeries,
    ) -> Result<CanonicalSeries, NormalizationError> {
        if raw.provider() != provider {
            return Err(NormalizationError::SchemaMismatch {
                expected: provider,
                actual: raw.provider(),
            });
        }

        let points = match raw {
            RawSeries::CoinGecko(pairs) => pairs
                .into_iter()
                .filter(|[ts, _]| ts.is_finite())
                .map(|[ts, price]| PricePoint::new(ts as i64, price))
                .collect(),
            RawSeries::CryptoCompare(bars) => bars
                .into_iter()
                .map(|bar| PricePoint::new(bar.time.saturating_mul(1000), bar.close))
                .collect(),
            RawSeries::CoinPaprika(ticks) => ticks
                .into_iter()
                .filter_map(|tick| {
                    let time = chrono::DateTime::parse_from_rfc3339(&tick.timestamp).ok()?;
                    Some(PricePoint::new(time.timestamp_millis(), tick.price?))
                })
                .collect(),
        };

        Self::canonicalize(points)
    }

    fn canonicalize(mut points: Vec<PricePoint>) -> Result<CanonicalSeries, NormalizationError> {
        points.retain(|p| p.price.is_finite() && p.price > 0.0);

        // stable: equal timestamps keep their input order
        points.sort_by_key(|p| p.timestamp_ms);

        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(prev) if prev.timestamp_ms == point.timestamp_ms => *prev = point,
                _ => deduped.push(point),
            }
        }

        if deduped.len() < MIN_CHARTABLE_POINTS {
            return Err(NormalizationError::Empty(deduped.len()));
        }

        Ok(CanonicalSeries::from_sorted(deduped))
    }
}
