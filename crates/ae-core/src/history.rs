//! Historical series produced by the statistics fetcher

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One aggregated sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryDataPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl HistoryDataPoint {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Timestamp as milliseconds since the Unix epoch
    pub fn millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}

/// The fetched series of one entity, ascending by timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityData {
    pub entity_id: String,
    pub friendly_name: String,
    pub data: Vec<HistoryDataPoint>,
}

impl EntityData {
    pub fn new(
        entity_id: impl Into<String>,
        friendly_name: impl Into<String>,
        data: Vec<HistoryDataPoint>,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            friendly_name: friendly_name.into(),
            data,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Everything one render cycle fetched
///
/// `untracked_power_data`, when present, holds only strictly positive values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerEnergyData {
    pub power_data: Vec<EntityData>,
    pub energy_data: Vec<EntityData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub untracked_power_data: Option<EntityData>,
}

impl PowerEnergyData {
    /// True when no entity produced a single data point
    pub fn has_no_history(&self) -> bool {
        self.power_data
            .iter()
            .chain(&self.energy_data)
            .all(EntityData::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn point(value: f64) -> HistoryDataPoint {
        HistoryDataPoint::new(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(), value)
    }

    #[test]
    fn test_has_no_history() {
        let mut data = PowerEnergyData {
            power_data: vec![EntityData::new("sensor.a", "A", vec![])],
            energy_data: vec![],
            untracked_power_data: None,
        };
        assert!(data.has_no_history());

        data.energy_data
            .push(EntityData::new("sensor.b", "B", vec![point(1.5)]));
        assert!(!data.has_no_history());
    }

    #[test]
    fn test_millis() {
        assert_eq!(point(0.0).millis(), 1_704_103_200_000);
    }
}
