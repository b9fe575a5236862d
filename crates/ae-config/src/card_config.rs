//! The card configuration schema

use std::collections::HashMap;

use ae_core::{ChartType, EntityId, LineType};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// User-level card configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Area to discover power and energy entities from
    #[serde(default)]
    pub area: String,

    /// Card title override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Explicitly configured entities, always shown
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<EntityConfig>,

    #[serde(default)]
    pub chart: ChartSettings,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<Feature>,
}

impl Config {
    /// Minimal configuration for an area, as offered when the card is added
    pub fn stub(area: impl Into<String>) -> Self {
        Self {
            area: area.into(),
            ..Self::default()
        }
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    /// Configured entity ids in configuration order
    pub fn entity_ids(&self) -> Vec<&str> {
        self.entities.iter().map(|e| e.entity_id.as_str()).collect()
    }

    pub fn is_config_entity(&self, entity_id: &str) -> bool {
        self.entities.iter().any(|e| e.entity_id == entity_id)
    }

    /// Explicit colors keyed by entity id; a later duplicate wins
    pub fn entity_color_map(&self) -> HashMap<String, String> {
        self.entities
            .iter()
            .filter_map(|e| Some((e.entity_id.clone(), e.color.clone()?)))
            .collect()
    }

    /// Check the configuration can drive a card
    pub fn validate(&self) -> ConfigResult<()> {
        if self.area.trim().is_empty() && self.entities.is_empty() {
            return Err(ConfigError::ValidationFailed {
                message: "either 'area' or 'entities' must be set".to_string(),
            });
        }

        for entity in &self.entities {
            entity
                .entity_id
                .parse::<EntityId>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "entities".to_string(),
                    reason: e.to_string(),
                })?;
        }

        if let Some(total) = &self.chart.total_power_entity {
            total
                .parse::<EntityId>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "chart.total_power_entity".to_string(),
                    reason: e.to_string(),
                })?;
        }

        Ok(())
    }
}

/// A configured entity with an optional color override
///
/// Written either as a bare id or as `{entity_id, color}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawEntity", into = "RawEntity")]
pub struct EntityConfig {
    pub entity_id: String,
    pub color: Option<String>,
}

impl EntityConfig {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// On-disk shape of an entity entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawEntity {
    Id(String),
    Detailed {
        entity_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
}

impl From<RawEntity> for EntityConfig {
    fn from(raw: RawEntity) -> Self {
        match raw {
            RawEntity::Id(entity_id) => Self {
                entity_id,
                color: None,
            },
            RawEntity::Detailed { entity_id, color } => Self { entity_id, color },
        }
    }
}

impl From<EntityConfig> for RawEntity {
    fn from(config: EntityConfig) -> Self {
        match config.color {
            None => RawEntity::Id(config.entity_id),
            color => RawEntity::Detailed {
                entity_id: config.entity_id,
                color,
            },
        }
    }
}

/// Chart section of the card configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSettings {
    #[serde(default)]
    pub chart_type: ChartType,

    /// Whole-house power sensor used to derive untracked power
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_power_entity: Option<String>,

    #[serde(default)]
    pub legend_style: LegendStyle,

    #[serde(default)]
    pub axis_style: AxisStyle,

    #[serde(default)]
    pub line_type: LineType,
}

/// Where entity names are listed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendStyle {
    /// Rich legend below the chart with live state per entity
    #[default]
    Entities,
    /// The chart library's own legend
    Compact,
    #[serde(rename = "none")]
    Hidden,
}

impl LegendStyle {
    pub fn shows_chart_legend(self) -> bool {
        self == Self::Compact
    }

    pub fn shows_entity_legend(self) -> bool {
        self == Self::Entities
    }
}

/// Which axes are drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisStyle {
    #[default]
    All,
    XOnly,
    YOnly,
    #[serde(rename = "none")]
    Hidden,
}

impl AxisStyle {
    pub fn hides_x(self) -> bool {
        matches!(self, Self::YOnly | Self::Hidden)
    }

    pub fn hides_y(self) -> bool {
        matches!(self, Self::XOnly | Self::Hidden)
    }
}

/// Optional behaviors toggled from the `features` list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Hide the card header
    HideName,
    /// Only show explicitly configured entities
    ExcludeDefaultEntities,
}
