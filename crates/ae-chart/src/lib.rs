//! Chart configuration for area power and energy series
//!
//! [`ChartConfigBuilder`] turns fetched series into a declarative
//! [`ChartConfiguration`]: one dataset per entity with its color, shape and
//! stacking, the three scales, and the legend and tooltip settings. The
//! configuration is plain data apart from gradient colors, which are
//! [`ColorValue::Deferred`] resolvers evaluated by the renderer once the plot
//! area is known. Those resolvers share the builder's [`GradientCache`].

mod builder;
mod colors;
mod config;
mod gradient;
mod paint;
mod style;

pub use builder::{ChartConfigBuilder, ChartData, ChartOptions};
pub use colors::{
    entity_color, resolve_color, theme_token, with_alpha, ThemeColors, DEFAULT_ENERGY_COLOR,
    DEFAULT_POWER_COLOR, ENERGY_PALETTE, POWER_PALETTE, THEME_COLOR_NAMES, UNTRACKED_COLOR,
};
pub use config::{
    format_tick_label, AxisTitle, ChartConfigOptions, ChartConfiguration, ChartDatasets, Dataset,
    DisplayFormats, GridConfig, Interaction, LegendConfig, LinearScale, Plugins, Point, Scales,
    Stepped, TicksConfig, TimeOptions, TimeScale, TooltipConfig,
};
pub use gradient::{gradient_stops, ColorStop, GradientCache, LinearGradient, PlotArea};
pub use paint::{ColorResolver, ColorValue, DrawContext, GradientColor, Paint, ResolverDescription};
pub use style::{dataset_style, kind_line, DatasetStyle, FillPaint, KindLine, Shape, StrokePaint};
