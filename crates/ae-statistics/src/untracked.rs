//! Untracked power derivation

use std::collections::HashMap;

use ae_core::{EntityData, HistoryDataPoint};

/// Power measured by the total sensor but not by any tracked sensor
///
/// Tracked values are summed per exact timestamp; a tracked series without
/// a point at some timestamp contributes nothing there. Each total point
/// yields `max(0, total - tracked)` and only strictly positive results are
/// kept. Returns `None` when nothing remains.
pub fn derive_untracked(tracked: &[EntityData], total: &EntityData) -> Option<EntityData> {
    let mut tracked_sum: HashMap<i64, f64> = HashMap::new();
    for point in tracked.iter().flat_map(|series| &series.data) {
        *tracked_sum.entry(point.millis()).or_insert(0.0) += point.value;
    }

    let data: Vec<HistoryDataPoint> = total
        .data
        .iter()
        .filter_map(|point| {
            let tracked = tracked_sum.get(&point.millis()).copied().unwrap_or(0.0);
            let untracked = (point.value - tracked).max(0.0);
            (untracked > 0.0).then(|| HistoryDataPoint::new(point.timestamp, untracked))
        })
        .collect();

    if data.is_empty() {
        return None;
    }

    Some(EntityData::new(
        total.entity_id.clone(),
        format!("{} (Untracked)", total.friendly_name),
        data,
    ))
}
