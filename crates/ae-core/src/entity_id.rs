//! Entity ID type representing a domain.object_id pair

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for invalid entity IDs
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EntityIdError {
    #[error("entity_id '{0}' must contain exactly one '.' separator")]
    InvalidFormat(String),

    #[error("domain cannot be empty")]
    EmptyDomain,

    #[error("object_id cannot be empty")]
    EmptyObjectId,

    #[error("domain '{0}' must be lowercase alphanumeric with single underscores")]
    InvalidDomainChars(String),

    #[error("object_id '{0}' must be lowercase alphanumeric with underscores")]
    InvalidObjectIdChars(String),
}

/// A validated entity ID such as `sensor.kitchen_power`
///
/// Configured entity ids are parsed into this type when the card
/// configuration is validated; registry data is trusted and kept as plain
/// strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId {
    domain: String,
    object_id: String,
}

impl EntityId {
    /// Create a new EntityId from domain and object_id parts
    pub fn new(
        domain: impl Into<String>,
        object_id: impl Into<String>,
    ) -> Result<Self, EntityIdError> {
        let domain = domain.into();
        let object_id = object_id.into();

        if domain.is_empty() {
            return Err(EntityIdError::EmptyDomain);
        }
        if object_id.is_empty() {
            return Err(EntityIdError::EmptyObjectId);
        }
        if !is_valid_domain(&domain) {
            return Err(EntityIdError::InvalidDomainChars(domain));
        }
        if !is_valid_object_id(&object_id) {
            return Err(EntityIdError::InvalidObjectIdChars(object_id));
        }

        Ok(Self { domain, object_id })
    }

    /// Domain part (`sensor`, `light`, `switch`, ...)
    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    /// Domain of a raw entity id string without validating it
    pub fn domain_of(entity_id: &str) -> &str {
        entity_id.split('.').next().unwrap_or(entity_id)
    }
}

/// Lowercase alphanumeric plus underscores, not starting or ending with `_`
fn is_valid_object_id(s: &str) -> bool {
    if s.starts_with('_') || s.ends_with('_') {
        return false;
    }
    s.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

fn is_valid_domain(s: &str) -> bool {
    !s.contains("__") && is_valid_object_id(s)
}

impl FromStr for EntityId {
    type Err = EntityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            Some((domain, object_id)) if !object_id.contains('.') => Self::new(domain, object_id),
            _ => Err(EntityIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for EntityId {
    type Error = EntityIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> String {
        id.to_string()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.domain, self.object_id)
    }
}
