//! What a render cycle produces

use ae_chart::ChartConfiguration;
use serde::Serialize;

/// Card title with the area's activity badges
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardHeader {
    pub title: String,
    pub active_lights: usize,
    pub active_switches: usize,
}

/// One row of the entity legend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendItem {
    pub entity_id: String,
    /// Swatch color; theme tokens are left for the host to resolve
    pub color: String,
    pub label: String,
    /// Live state with unit, absent for derived series
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Result of one render cycle
///
/// An error replaces the whole card, so `error` is never set together with
/// a header, legend or chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<CardHeader>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub legend: Vec<LegendItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CardView {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            header: None,
            legend: Vec::new(),
            chart: None,
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
