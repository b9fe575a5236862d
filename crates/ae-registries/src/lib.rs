//! Registry snapshot and entity resolution
//!
//! The host application owns the entity, device and area registries and the
//! live state machine. This crate consumes a point-in-time snapshot of all
//! four and decides which power and energy entities a card displays.

mod error;
mod resolver;
mod snapshot;

pub use error::{RegistryError, RegistryResult};
pub use resolver::{EntityResolver, ResolvedEntities};
pub use snapshot::{AreaEntry, DeviceEntry, EntityEntry, RegistrySnapshot};
