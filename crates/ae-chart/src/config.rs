//! Declarative chart configuration
//!
//! Serializes to the shape the chart library accepts: `type`,
//! `data.datasets` and `options`. Callbacks the library would call back
//! into (tick labels, tooltip labels) are methods on the owning type.

use chrono::{Local, TimeZone, Timelike};
use serde::{Serialize, Serializer};

use crate::paint::ColorValue;

/// The complete configuration handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfiguration {
    /// `"line"` or `"bar"`
    #[serde(rename = "type")]
    pub chart_type: &'static str,
    pub data: ChartDatasets,
    pub options: ChartConfigOptions,
}

impl ChartConfiguration {
    pub fn datasets(&self) -> &[Dataset] {
        &self.data.datasets
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDatasets {
    pub datasets: Vec<Dataset>,
}

/// A `{x: epoch millis, y}` sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: i64,
    pub y: f64,
}

/// Step mode of a line; serializes as `false` or the mode name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stepped {
    Off,
    Mode(&'static str),
}

impl Serialize for Stepped {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Off => serializer.serialize_bool(false),
            Self::Mode(mode) => serializer.serialize_str(mode),
        }
    }
}

/// One series; line-only properties are absent for bars
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<Point>,
    pub border_color: ColorValue,
    pub background_color: ColorValue,
    pub border_width: u32,
    #[serde(rename = "yAxisID")]
    pub y_axis_id: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stepped: Option<Stepped>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_hover_radius: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfigOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub interaction: Interaction,
    pub plugins: Plugins,
    pub scales: Scales,
}

/// Hovering any x position shows every series at that x
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interaction {
    pub mode: &'static str,
    pub intersect: bool,
}

impl Default for Interaction {
    fn default() -> Self {
        Self {
            mode: "index",
            intersect: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: LegendConfig,
    pub tooltip: TooltipConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegendConfig {
    pub display: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipConfig {
    pub background_color: &'static str,
    pub title_color: &'static str,
    pub body_color: &'static str,
    pub border_color: &'static str,
    pub border_width: u32,
    pub padding: u32,
    pub display_colors: bool,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            background_color: "rgba(0, 0, 0, 0.8)",
            title_color: "#fff",
            body_color: "#fff",
            border_color: "rgba(255, 255, 255, 0.1)",
            border_width: 1,
            padding: 12,
            display_colors: true,
        }
    }
}

impl TooltipConfig {
    /// Tooltip line for a dataset value, e.g. `TV (W): 85.3`
    pub fn label(&self, dataset_label: &str, value: Option<f64>) -> String {
        let value = value
            .map(|v| format!("{v:.1}"))
            .unwrap_or_else(|| "0".to_string());
        format!("{dataset_label}: {value}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: TimeScale,
    pub y: LinearScale,
    pub y1: LinearScale,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    pub display: bool,
    #[serde(rename = "drawOnChartArea", skip_serializing_if = "Option::is_none")]
    pub draw_on_chart_area: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicksConfig {
    pub color: &'static str,
    pub display: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    pub display: bool,
    pub text: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOptions {
    pub unit: &'static str,
    pub display_formats: DisplayFormats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayFormats {
    pub hour: &'static str,
    pub day: &'static str,
}

/// The shared time axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeScale {
    #[serde(rename = "type")]
    pub scale_type: &'static str,
    pub display: bool,
    pub stacked: bool,
    pub time: TimeOptions,
    pub grid: GridConfig,
    pub ticks: TicksConfig,
}

impl TimeScale {
    pub fn new(display: bool, stacked: bool) -> Self {
        Self {
            scale_type: "time",
            display,
            stacked,
            time: TimeOptions {
                unit: "hour",
                display_formats: DisplayFormats {
                    hour: "HH:mm",
                    day: "MMM d",
                },
            },
            grid: GridConfig {
                color: Some("rgba(0, 0, 0, 0.05)"),
                display,
                draw_on_chart_area: None,
            },
            ticks: TicksConfig {
                color: "#666",
                display,
            },
        }
    }

    /// Tick label for an epoch-millis tick in the local time zone
    pub fn tick_label(&self, millis: i64) -> String {
        format_tick_label(millis, &Local)
    }
}

/// `Jan 1` at midnight, otherwise 24-hour `HH:MM`
pub fn format_tick_label<Tz>(millis: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let Some(time) = tz.timestamp_millis_opt(millis).single() else {
        return millis.to_string();
    };

    if time.hour() == 0 && time.minute() == 0 {
        time.format("%b %-d").to_string()
    } else {
        time.format("%H:%M").to_string()
    }
}

/// A value axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearScale {
    #[serde(rename = "type")]
    pub scale_type: &'static str,
    pub display: bool,
    pub position: &'static str,
    pub stacked: bool,
    pub title: AxisTitle,
    pub grid: GridConfig,
    pub ticks: TicksConfig,
}

impl LinearScale {
    /// Left-hand power axis
    pub fn power(display: bool, stacked: bool) -> Self {
        Self {
            scale_type: "linear",
            display,
            position: "left",
            stacked,
            title: AxisTitle {
                display,
                text: "Power (W)",
                color: "rgba(59, 130, 246, 0.8)",
            },
            grid: GridConfig {
                color: Some("rgba(0, 0, 0, 0.05)"),
                display,
                draw_on_chart_area: None,
            },
            ticks: TicksConfig {
                color: "#666",
                display,
            },
        }
    }

    /// Right-hand energy axis; its grid stays off the plot area
    pub fn energy(display: bool, stacked: bool) -> Self {
        Self {
            scale_type: "linear",
            display,
            position: "right",
            stacked,
            title: AxisTitle {
                display,
                text: "Energy (kWh)",
                color: "rgba(16, 185, 129, 0.8)",
            },
            grid: GridConfig {
                color: None,
                display,
                draw_on_chart_area: Some(false),
            },
            ticks: TicksConfig {
                color: "#666",
                display,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use serde_json::json;

    #[test]
    fn test_tick_label_midnight() {
        let utc = Utc;
        let midnight = utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_tick_label(midnight.timestamp_millis(), &utc), "Jan 1");

        let afternoon = utc.with_ymd_and_hms(2024, 1, 1, 14, 30, 0).unwrap();
        assert_eq!(format_tick_label(afternoon.timestamp_millis(), &utc), "14:30");

        let morning = utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 0).unwrap();
        assert_eq!(format_tick_label(morning.timestamp_millis(), &utc), "07:05");

        let just_after = utc.with_ymd_and_hms(2024, 1, 1, 0, 1, 0).unwrap();
        assert_eq!(format_tick_label(just_after.timestamp_millis(), &utc), "00:01");
    }

    #[test]
    fn test_tick_label_uses_zone_midnight() {
        let cet = FixedOffset::east_opt(3600).unwrap();
        let utc_23h = Utc.with_ymd_and_hms(2024, 12, 31, 23, 0, 0).unwrap();
        assert_eq!(format_tick_label(utc_23h.timestamp_millis(), &cet), "Jan 1");
        assert_eq!(format_tick_label(utc_23h.timestamp_millis(), &Utc), "23:00");
    }

    #[test]
    fn test_tick_label_local_matches_local_zone() {
        let scale = TimeScale::new(true, false);
        // Midnight can be skipped by a DST change in some zones
        let Some(local_midnight) = Local.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).earliest() else {
            return;
        };
        assert_eq!(scale.tick_label(local_midnight.timestamp_millis()), "Jun 15");
    }

    #[test]
    fn test_tooltip_label() {
        let tooltip = TooltipConfig::default();
        assert_eq!(tooltip.label("TV (W)", Some(85.26)), "TV (W): 85.3");
        assert_eq!(tooltip.label("TV (W)", Some(3.0)), "TV (W): 3.0");
        assert_eq!(tooltip.label("TV (W)", None), "TV (W): 0");
    }

    #[test]
    fn test_stepped_serialization() {
        assert_eq!(serde_json::to_value(Stepped::Off).unwrap(), json!(false));
        assert_eq!(serde_json::to_value(Stepped::Mode("before")).unwrap(), json!("before"));
    }

    #[test]
    fn test_scale_serialization() {
        let y1 = serde_json::to_value(LinearScale::energy(false, true)).unwrap();
        assert_eq!(
            y1,
            json!({
                "type": "linear",
                "display": false,
                "position": "right",
                "stacked": true,
                "title": {"display": false, "text": "Energy (kWh)", "color": "rgba(16, 185, 129, 0.8)"},
                "grid": {"display": false, "drawOnChartArea": false},
                "ticks": {"color": "#666", "display": false},
            })
        );

        let x = serde_json::to_value(TimeScale::new(true, false)).unwrap();
        assert_eq!(x["type"], "time");
        assert_eq!(x["time"]["displayFormats"], json!({"hour": "HH:mm", "day": "MMM d"}));
        assert_eq!(x["grid"]["color"], "rgba(0, 0, 0, 0.05)");
    }
}
