//! The external statistics service seam

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::StatisticsResult;
use crate::query::{StatisticRecord, StatisticsQuery};

/// Records per statistic id
pub type StatisticsResponse = HashMap<String, Vec<StatisticRecord>>;

/// Something that answers `recorder/statistics_during_period` queries
///
/// Ids absent from the response have no statistics for the window.
#[async_trait]
pub trait StatisticsSource: Send + Sync {
    async fn statistics_during_period(
        &self,
        query: &StatisticsQuery,
    ) -> StatisticsResult<StatisticsResponse>;
}
