//! Wire types for the recorder statistics query

use std::fmt;

use ae_core::HistoryDataPoint;
use chrono::{DateTime, Duration, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

/// WebSocket command type for the statistics query
pub const STATISTICS_DURING_PERIOD: &str = "recorder/statistics_during_period";

/// 2000-01-01T00:00:00Z in milliseconds; smaller `start` values are seconds
pub const MILLIS_EPOCH_THRESHOLD: f64 = 946_684_800_000.0;

/// Aggregation period of the returned statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[serde(rename = "5minute")]
    FiveMinute,
    #[default]
    Hour,
    Day,
    Month,
}

impl Period {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FiveMinute => "5minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Month => "month",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time window and period shared by every request of one fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub period: Period,
}

impl FetchRequest {
    /// The last `lookback_hours` up to now
    pub fn recent(lookback_hours: i64, period: Period) -> Self {
        Self::ending_at(Utc::now(), lookback_hours, period)
    }

    pub fn ending_at(end: DateTime<Utc>, lookback_hours: i64, period: Period) -> Self {
        Self {
            start: end - Duration::hours(lookback_hours),
            end,
            period,
        }
    }

    /// Query for a single statistic id over this window
    pub fn query_for(&self, statistic_id: impl Into<String>) -> StatisticsQuery {
        StatisticsQuery {
            start_time: self.start,
            end_time: self.end,
            statistic_ids: vec![statistic_id.into()],
            period: self.period,
        }
    }
}

/// One `recorder/statistics_during_period` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsQuery {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub statistic_ids: Vec<String>,
    pub period: Period,
}

impl StatisticsQuery {
    /// WebSocket message for this query with the given message id
    pub fn to_message(&self, id: u64) -> Value {
        json!({
            "id": id,
            "type": STATISTICS_DURING_PERIOD,
            "start_time": format_time(self.start_time),
            "end_time": format_time(self.end_time),
            "statistic_ids": self.statistic_ids,
            "period": self.period,
        })
    }
}

/// ISO-8601 with milliseconds in UTC, e.g. `2022-01-01T00:00:00.000Z`
fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// One aggregated statistic as returned by the recorder
///
/// Numeric fields are read leniently: a non-numeric value is kept as NaN so
/// the record can be rejected when that field is selected.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatisticRecord {
    #[serde(default = "missing", deserialize_with = "lenient_required")]
    pub start: f64,
    #[serde(default, deserialize_with = "lenient_required")]
    pub end: f64,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub state: Option<f64>,
}

impl StatisticRecord {
    pub fn new(start: f64) -> Self {
        Self {
            start,
            ..Self::default()
        }
    }

    pub fn with_mean(mut self, mean: f64) -> Self {
        self.mean = Some(mean);
        self
    }

    pub fn with_state(mut self, state: f64) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_sum(mut self, sum: f64) -> Self {
        self.sum = Some(sum);
        self
    }

    /// The displayed value: `mean`, else `state`, else `sum`
    pub fn value(&self) -> Option<f64> {
        self.mean
            .or(self.state)
            .or(self.sum)
            .filter(|value| value.is_finite())
    }

    /// Convert to a data point, or `None` when the record is unusable
    pub fn to_data_point(&self) -> Option<HistoryDataPoint> {
        let value = self.value()?;
        let timestamp = normalize_timestamp(self.start)?;
        Some(HistoryDataPoint::new(timestamp, value))
    }
}

/// Interpret a `start` value given in either seconds or milliseconds
pub fn normalize_timestamp(start: f64) -> Option<DateTime<Utc>> {
    if !start.is_finite() {
        return None;
    }
    let millis = if start >= MILLIS_EPOCH_THRESHOLD {
        start
    } else {
        start * 1000.0
    };
    Utc.timestamp_millis_opt(millis.round() as i64).single()
}

fn number(value: Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::Number(n) => n.as_f64().or(Some(f64::NAN)),
        _ => Some(f64::NAN),
    }
}

fn lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(number))
}

/// A missing bucket start leaves only this record unusable
fn missing() -> f64 {
    f64::NAN
}

fn lenient_required<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient(deserializer)?.unwrap_or(f64::NAN))
}
