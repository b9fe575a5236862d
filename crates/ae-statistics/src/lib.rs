//! Historical statistics for the area energy card
//!
//! [`StatisticsFetcher`] fans out one `recorder/statistics_during_period`
//! query per entity through a [`StatisticsSource`], converts the returned
//! records into [`HistoryDataPoint`](ae_core::HistoryDataPoint) series and,
//! when a total power sensor is configured, derives the untracked power
//! series with [`derive_untracked`].
//!
//! Fetch failures never reach the caller: a failed entity is logged and
//! reported with an empty series.

mod error;
mod fetcher;
mod query;
mod source;
mod untracked;

pub use error::{StatisticsError, StatisticsResult};
pub use fetcher::StatisticsFetcher;
pub use query::{
    normalize_timestamp, FetchRequest, Period, StatisticRecord, StatisticsQuery,
    MILLIS_EPOCH_THRESHOLD, STATISTICS_DURING_PERIOD,
};
pub use source::{StatisticsResponse, StatisticsSource};
pub use untracked::derive_untracked;
