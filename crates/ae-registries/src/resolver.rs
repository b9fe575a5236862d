//! Entity resolution
//!
//! Decides which power and energy entities a card shows. An entity is a
//! candidate when it is explicitly configured or belongs to the configured
//! area. Configured entities are always kept; area members are dropped when
//! the `exclude_default_entities` feature is set. Candidates are bucketed by
//! their `device_class`, in registry order.

use ae_config::{Config, Feature};
use ae_core::{state_active, EntityId, EntityKind, EntityState};
use tracing::debug;

use crate::snapshot::RegistrySnapshot;

/// The working set of entities for one render cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedEntities {
    pub power_entities: Vec<EntityState>,
    pub energy_entities: Vec<EntityState>,
    /// Lights in the area that are currently on
    pub active_lights: usize,
    /// Switches in the area that are currently on
    pub active_switches: usize,
}

impl ResolvedEntities {
    pub fn entities(&self, kind: EntityKind) -> &[EntityState] {
        match kind {
            EntityKind::Power => &self.power_entities,
            EntityKind::Energy => &self.energy_entities,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.power_entities.is_empty() && self.energy_entities.is_empty()
    }

    /// Ids of every resolved entity, power first
    pub fn entity_ids(&self) -> Vec<&str> {
        self.power_entities
            .iter()
            .chain(&self.energy_entities)
            .map(|state| state.entity_id.as_str())
            .collect()
    }
}

/// Resolves the entity working set from a registry snapshot
pub struct EntityResolver;

impl EntityResolver {
    /// Resolve using the host's default activity rules
    pub fn resolve(snapshot: &RegistrySnapshot, config: &Config) -> ResolvedEntities {
        Self::resolve_with(snapshot, config, state_active)
    }

    /// Resolve with a custom "is entity active" predicate for the
    /// light/switch counters
    pub fn resolve_with<F>(
        snapshot: &RegistrySnapshot,
        config: &Config,
        is_active: F,
    ) -> ResolvedEntities
    where
        F: Fn(&EntityState) -> bool,
    {
        let skip_default_entities = config.has_feature(Feature::ExcludeDefaultEntities);
        let mut resolved = ResolvedEntities::default();

        for entry in snapshot.entities.values() {
            let is_config_entity = config.is_config_entity(&entry.entity_id);
            let in_area = snapshot.in_area(entry, &config.area);

            if !is_config_entity && !in_area {
                continue;
            }

            let Some(state) = snapshot.state(&entry.entity_id) else {
                debug!("Skipping {}: no live state", entry.entity_id);
                continue;
            };

            if in_area {
                match EntityId::domain_of(&entry.entity_id) {
                    "light" if is_active(state) => resolved.active_lights += 1,
                    "switch" if is_active(state) => resolved.active_switches += 1,
                    _ => {}
                }
            }

            if !is_config_entity && skip_default_entities {
                continue;
            }

            match state.device_class().and_then(EntityKind::from_device_class) {
                Some(EntityKind::Power) => resolved.power_entities.push(state.clone()),
                Some(EntityKind::Energy) => resolved.energy_entities.push(state.clone()),
                None => {}
            }
        }

        debug!(
            "Resolved area '{}': {} power, {} energy, {} lights on, {} switches on",
            config.area,
            resolved.power_entities.len(),
            resolved.energy_entities.len(),
            resolved.active_lights,
            resolved.active_switches
        );

        resolved
    }
}
