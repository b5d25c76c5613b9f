// Time range domain model - maps a user-facing range to provider-agnostic query bounds
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest daily page any configured provider serves in a single request.
pub const MAX_DAILY_SAMPLES: u32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeRangeToken {
    LastDay,
    LastWeek,
    LastMonth,
    LastQuarter,
    LastYear,
    AllTime,
}

impl TimeRangeToken {
    pub const ALL: [TimeRangeToken; 6] = [
        TimeRangeToken::LastDay,
        TimeRangeToken::LastWeek,
        TimeRangeToken::LastMonth,
        TimeRangeToken::LastQuarter,
        TimeRangeToken::LastYear,
        TimeRangeToken::AllTime,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LastDay => "last-day",
            Self::LastWeek => "last-week",
            Self::LastMonth => "last-month",
            Self::LastQuarter => "last-quarter",
            Self::LastYear => "last-year",
            Self::AllTime => "all-time",
        }
    }
}

impl fmt::Display for TimeRangeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown time range token: {0:?}")]
pub struct UnknownRangeToken(pub String);

impl FromStr for TimeRangeToken {
    type Err = UnknownRangeToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-day" | "24h" | "1d" => Ok(Self::LastDay),
            "last-week" | "7d" => Ok(Self::LastWeek),
            "last-month" | "30d" => Ok(Self::LastMonth),
            "last-quarter" | "90d" => Ok(Self::LastQuarter),
            "last-year" | "1y" | "365d" => Ok(Self::LastYear),
            "all-time" | "max" => Ok(Self::AllTime),
            _ => Err(UnknownRangeToken(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Hourly,
    Daily,
}

/// Query bounds derived from a [`TimeRangeToken`] at a given instant.
///
/// `lookback_start` is `None` for [`TimeRangeToken::AllTime`], meaning "as far
/// back as the provider serves". Adapters may cap that on their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRange {
    pub token: TimeRangeToken,
    pub granularity: Granularity,
    pub approximate_sample_count: u32,
    pub lookback_start: Option<DateTime<Utc>>,
    pub lookback_end: DateTime<Utc>,
}

impl ResolvedRange {
    /// Lookback window in whole days, or `None` when unbounded.
    pub fn lookback_days(&self) -> Option<i64> {
        self.lookback_start
            .map(|start| (self.lookback_end - start).num_days().max(1))
    }
}

pub struct TimeRangeResolver;

impl TimeRangeResolver {
    pub fn resolve(token: TimeRangeToken) -> ResolvedRange {
        Self::resolve_at(token, Utc::now())
    }

    pub fn resolve_at(token: TimeRangeToken, now: DateTime<Utc>) -> ResolvedRange {
        let (granularity, lookback, approximate_sample_count) = match token {
            TimeRangeToken::LastDay => (Granularity::Hourly, Some(Duration::hours(24)), 24),
            TimeRangeToken::LastWeek => (Granularity::Daily, Some(Duration::days(7)), 7),
            TimeRangeToken::LastMonth => (Granularity::Daily, Some(Duration::days(30)), 30),
            TimeRangeToken::LastQuarter => (Granularity::Daily, Some(Duration::days(90)), 90),
            TimeRangeToken::LastYear => (Granularity::Daily, Some(Duration::days(365)), 365),
            TimeRangeToken::AllTime => (Granularity::Daily, None, MAX_DAILY_SAMPLES),
        };

        ResolvedRange {
            token,
            granularity,
            approximate_sample_count,
            lookback_start: lookback.map(|d| now - d),
            lookback_end: now,
        }
    }
}
