//! Statistics served from a JSON file
//!
//! The file maps statistic ids to the records the host would return:
//! ```json
//! { "sensor.tv_power": [ { "start": 1709290800000, "end": 1709294400000, "mean": 85.0 } ] }
//! ```

use std::path::Path;

use ae_statistics::{
    normalize_timestamp, StatisticsQuery, StatisticsResponse, StatisticsResult, StatisticsSource,
};
use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

/// Offline [`StatisticsSource`] backed by recorded responses
#[derive(Debug, Clone, Default)]
pub struct FileStatisticsSource {
    records: StatisticsResponse,
}

impl FileStatisticsSource {
    pub async fn load(path: impl AsRef<Path>) -> StatisticsResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let source = Self::from_json(&content)?;
        debug!(
            "Loaded statistics for {} ids from {:?}",
            source.records.len(),
            path
        );
        Ok(source)
    }

    pub fn from_json(content: &str) -> StatisticsResult<Self> {
        Ok(Self::from_records(serde_json::from_str(content)?))
    }

    pub fn from_records(records: StatisticsResponse) -> Self {
        Self { records }
    }
}

#[async_trait]
impl StatisticsSource for FileStatisticsSource {
    /// Records whose bucket starts inside `[start_time, end_time)`
    async fn statistics_during_period(
        &self,
        query: &StatisticsQuery,
    ) -> StatisticsResult<StatisticsResponse> {
        let mut response = StatisticsResponse::new();
        for id in &query.statistic_ids {
            let Some(records) = self.records.get(id) else {
                continue;
            };
            let in_window: Vec<_> = records
                .iter()
                .filter(|record| {
                    normalize_timestamp(record.start)
                        .is_some_and(|start| start >= query.start_time && start < query.end_time)
                })
                .copied()
                .collect();
            response.insert(id.clone(), in_window);
        }
        Ok(response)
    }
}
