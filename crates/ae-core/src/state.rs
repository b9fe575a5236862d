//! Live entity state as read from the host's state registry

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{attributes, EntityId};

/// The live state of one monitored entity
///
/// Owned by the host; the card only reads it. The value is kept as the raw
/// string the host reports (`"on"`, `"231.4"`, `"unavailable"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    pub entity_id: String,

    pub state: String,

    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,
}

impl EntityState {
    pub fn new(entity_id: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            state: state.into(),
            attributes: HashMap::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn domain(&self) -> &str {
        EntityId::domain_of(&self.entity_id)
    }

    /// String attribute by key, `None` when missing or not a string
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(|v| v.as_str())
    }

    pub fn device_class(&self) -> Option<&str> {
        self.attribute_str(attributes::DEVICE_CLASS)
    }

    pub fn friendly_name(&self) -> Option<&str> {
        self.attribute_str(attributes::FRIENDLY_NAME)
    }

    pub fn unit_of_measurement(&self) -> Option<&str> {
        self.attribute_str(attributes::UNIT_OF_MEASUREMENT)
    }

    /// Friendly name, falling back to the entity id
    pub fn display_name(&self) -> &str {
        self.friendly_name().unwrap_or(&self.entity_id)
    }

    /// State value followed by its unit, as shown next to legend entries
    pub fn display_state(&self) -> String {
        match self.unit_of_measurement() {
            Some(unit) if !unit.is_empty() => format!("{} {}", self.state, unit),
            _ => self.state.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attribute_accessors() {
        let state = EntityState::new("sensor.kitchen_power", "231.4")
            .with_attribute("device_class", "power")
            .with_attribute("unit_of_measurement", "W")
            .with_attribute("friendly_name", "Kitchen Power");

        assert_eq!(state.domain(), "sensor");
        assert_eq!(state.device_class(), Some("power"));
        assert_eq!(state.display_name(), "Kitchen Power");
        assert_eq!(state.display_state(), "231.4 W");
    }

    #[test]
    fn test_display_name_falls_back_to_entity_id() {
        let state = EntityState::new("sensor.kitchen_power", "1")
            .with_attribute("friendly_name", json!(42));
        assert_eq!(state.display_name(), "sensor.kitchen_power");
        assert_eq!(state.display_state(), "1");
    }

    #[test]
    fn test_deserialize_without_attributes() {
        let state: EntityState =
            serde_json::from_value(json!({"entity_id": "light.desk", "state": "on"})).unwrap();
        assert!(state.attributes.is_empty());
        assert_eq!(state.domain(), "light");
    }
}
