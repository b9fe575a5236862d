//! Entity legend shown below the chart

use std::collections::HashMap;

use ae_chart::{entity_color, UNTRACKED_COLOR};
use ae_core::{EntityData, EntityKind, EntityState};
use ae_registries::ResolvedEntities;

use crate::view::LegendItem;

/// Legend rows: power entities, untracked power, energy entities
///
/// Colors follow the same assignment as the chart datasets so swatches
/// match their series.
pub fn legend_items(
    resolved: &ResolvedEntities,
    color_map: &HashMap<String, String>,
    untracked: Option<&EntityData>,
) -> Vec<LegendItem> {
    let mut items = kind_items(&resolved.power_entities, EntityKind::Power, color_map);

    if let Some(untracked) = untracked {
        items.push(LegendItem {
            entity_id: untracked.entity_id.clone(),
            color: UNTRACKED_COLOR.to_string(),
            label: untracked.friendly_name.clone(),
            state: None,
        });
    }

    items.extend(kind_items(&resolved.energy_entities, EntityKind::Energy, color_map));
    items
}

fn kind_items(
    entities: &[EntityState],
    kind: EntityKind,
    color_map: &HashMap<String, String>,
) -> Vec<LegendItem> {
    entities
        .iter()
        .enumerate()
        .map(|(index, state)| LegendItem {
            entity_id: state.entity_id.clone(),
            color: entity_color(&state.entity_id, index, kind, entities.len(), color_map),
            label: format!("{} ({})", state.display_name(), kind.unit()),
            state: Some(state.display_state()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ae_chart::{DEFAULT_ENERGY_COLOR, POWER_PALETTE};

    fn sensor(id: &str, name: &str, state: &str, unit: &str) -> EntityState {
        EntityState::new(id, state)
            .with_attribute("friendly_name", name)
            .with_attribute("unit_of_measurement", unit)
    }

    fn resolved() -> ResolvedEntities {
        ResolvedEntities {
            power_entities: vec![
                sensor("sensor.tv_power", "TV", "85", "W"),
                sensor("sensor.pc_power", "PC", "120", "W"),
            ],
            energy_entities: vec![EntityState::new("sensor.tv_energy", "1.4")],
            active_lights: 0,
            active_switches: 0,
        }
    }

    #[test]
    fn test_legend_items() {
        let items = legend_items(&resolved(), &HashMap::new(), None);
        assert_eq!(items.len(), 3);

        assert_eq!(items[0].label, "TV (W)");
        assert_eq!(items[0].color, POWER_PALETTE[0]);
        assert_eq!(items[0].state.as_deref(), Some("85 W"));
        assert_eq!(items[1].color, POWER_PALETTE[1]);

        assert_eq!(items[2].label, "sensor.tv_energy (kWh)");
        assert_eq!(items[2].color, DEFAULT_ENERGY_COLOR);
        assert_eq!(items[2].state.as_deref(), Some("1.4"));
    }

    #[test]
    fn test_untracked_item_follows_power() {
        let untracked = EntityData::new("sensor.house", "House (Untracked)", vec![]);
        let items = legend_items(&resolved(), &HashMap::new(), Some(&untracked));

        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["TV (W)", "PC (W)", "House (Untracked)", "sensor.tv_energy (kWh)"]
        );
        assert_eq!(items[2].color, UNTRACKED_COLOR);
        assert_eq!(items[2].state, None);
    }

    #[test]
    fn test_theme_tokens_are_not_resolved() {
        let colors = HashMap::from([("sensor.pc_power".to_string(), "amber".to_string())]);
        let items = legend_items(&resolved(), &colors, None);
        assert_eq!(items[1].color, "var(--amber-color)");
    }
}
