//! Shared helpers for the card integration tests

use std::path::Path;

use ae_card::FileStatisticsSource;
use ae_config::{load_config_str, Config};
use ae_registries::RegistrySnapshot;
use chrono::{DateTime, TimeZone, Utc};

/// Load a fixture file from `tests/fixtures/`
pub fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);

    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture '{}' from {:?}: {}", name, path, e))
}

pub fn registry() -> RegistrySnapshot {
    RegistrySnapshot::from_json(&load_fixture("registry.json"))
        .unwrap_or_else(|e| panic!("Failed to parse registry fixture: {}", e))
}

pub fn statistics() -> FileStatisticsSource {
    FileStatisticsSource::from_json(&load_fixture("statistics.json"))
        .unwrap_or_else(|e| panic!("Failed to parse statistics fixture: {}", e))
}

pub fn card_config() -> Config {
    load_config_str(&load_fixture("card.yaml"), "card.yaml")
        .unwrap_or_else(|e| panic!("Failed to parse card fixture: {}", e))
}

/// End of the window the statistics fixture was recorded for
pub fn window_end() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

/// Top of the given hour on the fixture day, in milliseconds
pub fn hour_ms(hour: u32) -> i64 {
    Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0)
        .unwrap()
        .timestamp_millis()
}
