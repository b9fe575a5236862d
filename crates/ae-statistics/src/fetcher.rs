//! Concurrent statistics fetching

use ae_core::{EntityData, EntityState, HistoryDataPoint, PowerEnergyData};
use futures::future::join_all;
use tracing::{debug, error, info, instrument, warn};

use crate::query::FetchRequest;
use crate::source::StatisticsSource;
use crate::untracked::derive_untracked;

/// Fetches history for a resolved entity set from a [`StatisticsSource`]
pub struct StatisticsFetcher<'a, S: ?Sized> {
    source: &'a S,
}

impl<'a, S> StatisticsFetcher<'a, S>
where
    S: StatisticsSource + ?Sized,
{
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Fetch every power and energy entity plus the optional total sensor
    ///
    /// All requests run concurrently and the result is available once every
    /// one of them has settled. A failed entity keeps its slot with empty
    /// data. The untracked series is derived when the total sensor returned
    /// data.
    #[instrument(
        skip_all,
        fields(
            power = power_entities.len(),
            energy = energy_entities.len(),
            period = %request.period,
        )
    )]
    pub async fn fetch(
        &self,
        power_entities: &[EntityState],
        energy_entities: &[EntityState],
        request: &FetchRequest,
        total_power: Option<&EntityState>,
    ) -> PowerEnergyData {
        let power = join_all(
            power_entities
                .iter()
                .map(|state| self.fetch_entity(state, request)),
        );
        let energy = join_all(
            energy_entities
                .iter()
                .map(|state| self.fetch_entity(state, request)),
        );
        let total = async {
            match total_power {
                Some(state) => Some(self.fetch_entity(state, request).await),
                None => None,
            }
        };

        let (power_data, energy_data, total) = futures::join!(power, energy, total);

        let untracked_power_data = total
            .filter(|total| !total.is_empty())
            .and_then(|total| derive_untracked(&power_data, &total));

        info!(
            "Fetched statistics: {} power series, {} energy series, untracked: {}",
            power_data.len(),
            energy_data.len(),
            untracked_power_data.is_some()
        );

        PowerEnergyData {
            power_data,
            energy_data,
            untracked_power_data,
        }
    }

    /// Fetch one entity's series; errors are logged and yield empty data
    pub async fn fetch_entity(&self, state: &EntityState, request: &FetchRequest) -> EntityData {
        let entity_id = state.entity_id.as_str();
        let query = request.query_for(entity_id);

        let records = match self.source.statistics_during_period(&query).await {
            Ok(mut response) => response.remove(entity_id).unwrap_or_else(|| {
                debug!("No statistics for {}", entity_id);
                Vec::new()
            }),
            Err(e) => {
                error!("Failed to fetch statistics for {}: {}", entity_id, e);
                Vec::new()
            }
        };

        let total = records.len();
        let data: Vec<HistoryDataPoint> =
            records.iter().filter_map(|record| record.to_data_point()).collect();
        if data.len() < total {
            warn!(
                "Discarded {} unusable statistic records for {}",
                total - data.len(),
                entity_id
            );
        }
        debug!("{}: {} data points", entity_id, data.len());

        EntityData::new(entity_id, state.display_name(), data)
    }
}
