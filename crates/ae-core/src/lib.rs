//! Core types for the area energy card
//!
//! This crate provides the value types shared by every stage of the
//! pipeline: entity identity and live state, the history series produced by
//! the statistics fetcher, and the chart/line type enums that select how the
//! series are drawn.

mod chart_kind;
mod domains;
mod entity_id;
mod history;
mod state;

pub use chart_kind::{ChartType, EntityKind, LineType};
pub use domains::{state_active, UNAVAILABLE_STATES};
pub use entity_id::{EntityId, EntityIdError};
pub use history::{EntityData, HistoryDataPoint, PowerEnergyData};
pub use state::EntityState;

/// Device class tagging an entity as an instantaneous power sensor
pub const DEVICE_CLASS_POWER: &str = "power";

/// Device class tagging an entity as a cumulative energy sensor
pub const DEVICE_CLASS_ENERGY: &str = "energy";

/// Well-known attribute keys read from entity states
pub mod attributes {
    /// Human readable entity name
    pub const FRIENDLY_NAME: &str = "friendly_name";

    /// Categorical tag used to bucket entities (`power`, `energy`, ...)
    pub const DEVICE_CLASS: &str = "device_class";

    /// Unit the state value is expressed in (`W`, `kWh`, ...)
    pub const UNIT_OF_MEASUREMENT: &str = "unit_of_measurement";
}
