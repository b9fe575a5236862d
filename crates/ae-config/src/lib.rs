//! Card configuration for the area energy chart
//!
//! The configuration is the YAML the user writes for the card:
//!
//! ```yaml
//! area: living_room
//! entities:
//!   - sensor.tv_power
//!   - entity_id: sensor.heater_power
//!     color: red
//! chart:
//!   chart_type: stacked_bar
//!   total_power_entity: sensor.house_power
//! features:
//!   - exclude_default_entities
//! ```
//!
//! Entities may be written as plain ids or as `{entity_id, color}` objects;
//! both forms are normalized into [`EntityConfig`] while parsing. The loader
//! understands the `!env_var NAME` tag.

mod card_config;
mod error;
mod loader;

pub use card_config::{AxisStyle, ChartSettings, Config, EntityConfig, Feature, LegendStyle};
pub use error::{ConfigError, ConfigResult};
pub use loader::{load_config, load_config_str};
