//! Chart presentation enums shared by the configuration and the chart builder

use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall chart shape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    /// Independent lines, one per entity
    #[default]
    Line,
    /// Bars stacked per kind
    StackedBar,
    /// Filled lines stacked per kind
    StackedLine,
}

impl ChartType {
    /// Stacked variants sum their datasets per stack group
    pub fn is_stacked(self) -> bool {
        matches!(self, Self::StackedBar | Self::StackedLine)
    }

    pub fn is_bar(self) -> bool {
        self == Self::StackedBar
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::StackedBar => "stacked_bar",
            Self::StackedLine => "stacked_line",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How line datasets are stroked and filled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineType {
    #[default]
    Normal,
    /// Monochrome gradient stroke and fill in the entity's hue
    Gradient,
    /// Cool to warm gradient stroke, no fill
    GradientNoFill,
    /// Flat stroke, no fill
    NoFill,
}

impl LineType {
    pub fn is_gradient(self) -> bool {
        matches!(self, Self::Gradient | Self::GradientNoFill)
    }

    pub fn fills(self) -> bool {
        matches!(self, Self::Normal | Self::Gradient)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Gradient => "gradient",
            Self::GradientNoFill => "gradient_no_fill",
            Self::NoFill => "no_fill",
        }
    }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two families of tracked sensors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Power,
    Energy,
}

impl EntityKind {
    /// Classify a device class, `None` for anything that is neither kind
    pub fn from_device_class(device_class: &str) -> Option<Self> {
        match device_class {
            crate::DEVICE_CLASS_POWER => Some(Self::Power),
            crate::DEVICE_CLASS_ENERGY => Some(Self::Energy),
            _ => None,
        }
    }

    /// Stack group name used by stacked chart types
    pub fn stack_group(self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Energy => "energy",
        }
    }

    /// Id of the value axis this kind is plotted against
    pub fn axis_id(self) -> &'static str {
        match self {
            Self::Power => "y",
            Self::Energy => "y1",
        }
    }

    /// Unit suffix shown in labels
    pub fn unit(self) -> &'static str {
        match self {
            Self::Power => "W",
            Self::Energy => "kWh",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stack_group())
    }
}
