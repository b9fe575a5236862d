//! Domain metadata used to decide whether an entity is "active"
//!
//! The header badges count lights and switches that are currently on. The
//! rules below follow the host frontend: every domain has a single inactive
//! value (usually `off`) and a handful of domains define their own.

use crate::EntityState;

/// State values that never count as active, whatever the domain
pub static UNAVAILABLE_STATES: &[&str] = &["unavailable", "unknown"];

/// Domains whose only inactive state is "unavailable" (stateless triggers)
static STATELESS_DOMAINS: &[&str] = &["button", "event", "input_button", "scene"];

/// Domains with a specific inactive state value
static INACTIVE_STATE_BY_DOMAIN: &[(&str, &str)] = &[
    ("alarm_control_panel", "disarmed"),
    ("alert", "idle"),
    ("cover", "closed"),
    ("valve", "closed"),
    ("device_tracker", "not_home"),
    ("person", "not_home"),
    ("lock", "locked"),
    ("media_player", "standby"),
];

/// Domains that are active only in an explicit set of states
static ACTIVE_STATES_BY_DOMAIN: &[(&str, &[&str])] = &[
    ("camera", &["streaming"]),
    ("lawn_mower", &["mowing", "error"]),
    ("plant", &["problem"]),
    ("timer", &["active"]),
    ("vacuum", &["on", "cleaning"]),
    ("group", &["on", "home", "open", "locked", "problem"]),
];

/// Check if an entity's live state counts as active
pub fn state_active(state: &EntityState) -> bool {
    let domain = state.domain();
    let value = state.state.as_str();

    if STATELESS_DOMAINS.contains(&domain) {
        return value != "unavailable";
    }
    if UNAVAILABLE_STATES.contains(&value) {
        return false;
    }
    if let Some((_, inactive)) = INACTIVE_STATE_BY_DOMAIN.iter().find(|(d, _)| *d == domain) {
        return value != *inactive;
    }
    if let Some((_, active)) = ACTIVE_STATES_BY_DOMAIN.iter().find(|(d, _)| *d == domain) {
        return active.contains(&value);
    }
    value != "off"
}
