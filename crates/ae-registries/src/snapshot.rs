//! Point-in-time view of the host registries
//!
//! JSON format:
//! ```json
//! {
//!   "entities": { "sensor.tv_power": { "entity_id": "sensor.tv_power", "device_id": "tv" } },
//!   "devices":  { "tv": { "id": "tv", "name": "Television", "area_id": "living_room" } },
//!   "areas":    { "living_room": { "area_id": "living_room", "name": "Living Room" } },
//!   "states":   { "sensor.tv_power": { "entity_id": "sensor.tv_power", "state": "85", "attributes": {} } }
//! }
//! ```

use std::path::Path;

use ae_core::{EntityKind, EntityState};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::error::{RegistryError, RegistryResult};

/// An entity registry entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityEntry {
    pub entity_id: String,

    /// Owning device
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,

    /// Area override; when unset the device's area applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_id: Option<String>,

    /// Integration that created the entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub hidden: bool,
}

impl EntityEntry {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            device_id: None,
            area_id: None,
            platform: None,
            name: None,
            hidden: false,
        }
    }

    pub fn with_device(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    pub fn with_area(mut self, area_id: impl Into<String>) -> Self {
        self.area_id = Some(area_id.into());
        self
    }
}

/// A device registry entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceEntry {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_id: Option<String>,
}

/// An area registry entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaEntry {
    pub area_id: String,

    /// Area name (e.g., "Living Room")
    pub name: String,
}

/// Registries and live states bundled together
///
/// Maps keep the host's iteration order; resolution and color assignment
/// depend on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    #[serde(default)]
    pub entities: IndexMap<String, EntityEntry>,

    #[serde(default)]
    pub devices: IndexMap<String, DeviceEntry>,

    #[serde(default)]
    pub areas: IndexMap<String, AreaEntry>,

    #[serde(default)]
    pub states: IndexMap<String, EntityState>,
}

impl RegistrySnapshot {
    /// Load a snapshot from a JSON file
    pub async fn load(path: impl AsRef<Path>) -> RegistryResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| RegistryError::ReadFile {
                path: path.to_path_buf(),
                source: e,
            })?;

        let snapshot = Self::from_json(&content)?;
        debug!(
            "Loaded registry snapshot {:?}: {} entities, {} devices, {} areas, {} states",
            path,
            snapshot.entities.len(),
            snapshot.devices.len(),
            snapshot.areas.len(),
            snapshot.states.len()
        );
        Ok(snapshot)
    }

    pub fn from_json(content: &str) -> RegistryResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn add_area(&mut self, area_id: impl Into<String>, name: impl Into<String>) {
        let area_id = area_id.into();
        self.areas.insert(
            area_id.clone(),
            AreaEntry {
                area_id,
                name: name.into(),
            },
        );
    }

    pub fn add_device(&mut self, id: impl Into<String>, area_id: Option<&str>) {
        let id = id.into();
        self.devices.insert(
            id.clone(),
            DeviceEntry {
                name: id.clone(),
                id,
                area_id: area_id.map(str::to_string),
            },
        );
    }

    pub fn add_entity(&mut self, entry: EntityEntry) {
        self.entities.insert(entry.entity_id.clone(), entry);
    }

    pub fn add_state(&mut self, state: EntityState) {
        self.states.insert(state.entity_id.clone(), state);
    }

    pub fn state(&self, entity_id: &str) -> Option<&EntityState> {
        self.states.get(entity_id)
    }

    pub fn device(&self, device_id: &str) -> Option<&DeviceEntry> {
        self.devices.get(device_id)
    }

    /// Area an entity belongs to: its own area, else its device's area
    pub fn entity_area<'a>(&'a self, entry: &'a EntityEntry) -> Option<&'a str> {
        match &entry.area_id {
            Some(area_id) => Some(area_id.as_str()),
            None => entry
                .device_id
                .as_deref()
                .and_then(|id| self.device(id))
                .and_then(|device| device.area_id.as_deref()),
        }
    }

    pub fn in_area(&self, entry: &EntityEntry, area_id: &str) -> bool {
        !area_id.is_empty() && self.entity_area(entry) == Some(area_id)
    }

    /// All registry entity ids belonging to an area, in registry order
    pub fn area_entities(&self, area_id: &str) -> Vec<&str> {
        self.entities
            .values()
            .filter(|entry| self.in_area(entry, area_id))
            .map(|entry| entry.entity_id.as_str())
            .collect()
    }

    /// Display name of an area, falling back to its id
    pub fn area_name<'a>(&'a self, area_id: &'a str) -> &'a str {
        self.areas
            .get(area_id)
            .map(|area| area.name.as_str())
            .unwrap_or(area_id)
    }

    /// First area with both a power sensor in W and an energy sensor in kWh
    pub fn stub_area(&self) -> Option<&str> {
        self.areas
            .keys()
            .find(|area_id| {
                let members = self.area_entities(area_id);
                let has = |kind: EntityKind| {
                    members.iter().any(|id| {
                        self.state(id).is_some_and(|state| {
                            state.device_class().and_then(EntityKind::from_device_class)
                                == Some(kind)
                                && state.unit_of_measurement() == Some(kind.unit())
                        })
                    })
                };
                has(EntityKind::Power) && has(EntityKind::Energy)
            })
            .map(String::as_str)
    }
}
