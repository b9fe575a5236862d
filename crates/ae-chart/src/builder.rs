//! Chart configuration builder

use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use ae_core::{ChartType, EntityData, EntityKind, LineType, PowerEnergyData};
use tracing::debug;

use crate::colors::{entity_color, resolve_color, with_alpha, ThemeColors, UNTRACKED_COLOR};
use crate::config::{
    ChartConfigOptions, ChartConfiguration, ChartDatasets, Dataset, Interaction, LegendConfig,
    LinearScale, Plugins, Point, Scales, Stepped, TimeScale, TooltipConfig,
};
use crate::gradient::GradientCache;
use crate::paint::{ColorValue, GradientColor};
use crate::style::{dataset_style, kind_line, DatasetStyle, FillPaint, StrokePaint};

/// Input series of a build
pub type ChartData = PowerEnergyData;

/// Rendering options of a build
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub show_legend: bool,
    pub hide_x_axis: bool,
    pub hide_y_axis: bool,
    pub chart_type: ChartType,
    pub line_type: LineType,
    /// Configured colors by entity id
    pub entity_color_map: HashMap<String, String>,
    /// Values for `var(--name)` color tokens
    pub theme: ThemeColors,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            responsive: true,
            maintain_aspect_ratio: false,
            show_legend: false,
            hide_x_axis: false,
            hide_y_axis: false,
            chart_type: ChartType::default(),
            line_type: LineType::default(),
            entity_color_map: HashMap::new(),
            theme: ThemeColors::default(),
        }
    }
}

/// Builds chart configurations from fetched series
///
/// The builder owns the gradient cache shared by the deferred colors of
/// every configuration it produced, so one builder should be kept per chart
/// and used from one thread.
#[derive(Debug, Default)]
pub struct ChartConfigBuilder {
    gradients: Rc<RefCell<GradientCache>>,
}

impl ChartConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gradient_cache(&self) -> Ref<'_, GradientCache> {
        self.gradients.borrow()
    }

    /// Build the configuration for one render
    ///
    /// Datasets come in order: tracked power, untracked power (stacked chart
    /// types only), energy. Series without data produce no dataset.
    pub fn build(&self, data: &ChartData, options: &ChartOptions) -> ChartConfiguration {
        let style = dataset_style(options.chart_type, options.line_type);

        let mut datasets = self.kind_datasets(&data.power_data, EntityKind::Power, &style, options);
        if options.chart_type.is_stacked() {
            if let Some(untracked) = data.untracked_power_data.as_ref().filter(|d| !d.is_empty()) {
                datasets.push(untracked_dataset(untracked, &style));
            }
        }
        datasets.extend(self.kind_datasets(&data.energy_data, EntityKind::Energy, &style, options));

        debug!(
            "Built {} chart with {} datasets ({})",
            options.chart_type,
            datasets.len(),
            options.line_type.as_str()
        );

        ChartConfiguration {
            chart_type: if style.is_bar() { "bar" } else { "line" },
            data: ChartDatasets { datasets },
            options: chart_options(options),
        }
    }

    fn kind_datasets(
        &self,
        series: &[EntityData],
        kind: EntityKind,
        style: &DatasetStyle,
        options: &ChartOptions,
    ) -> Vec<Dataset> {
        series
            .iter()
            .enumerate()
            .filter(|(_, entity)| !entity.is_empty())
            .map(|(index, entity)| {
                let color = resolve_color(
                    &entity_color(
                        &entity.entity_id,
                        index,
                        kind,
                        series.len(),
                        &options.entity_color_map,
                    ),
                    &options.theme,
                );
                self.entity_dataset(entity, kind, &color, style, options.line_type)
            })
            .collect()
    }

    fn entity_dataset(
        &self,
        entity: &EntityData,
        kind: EntityKind,
        color: &str,
        style: &DatasetStyle,
        line_type: LineType,
    ) -> Dataset {
        let line = kind_line(kind);
        let tinted = with_alpha(color, line.fill_alpha);

        let border_color = match style.stroke {
            StrokePaint::Flat => ColorValue::solid(color),
            StrokePaint::Gradient => self.gradient(kind, line_type, color),
        };
        let background_color = match style.fill {
            FillPaint::Solid => ColorValue::solid(color),
            FillPaint::Tinted => ColorValue::Solid(tinted),
            FillPaint::Gradient => self.gradient(kind, line_type, &tinted),
            FillPaint::Transparent => ColorValue::solid("transparent"),
        };

        let mut dataset = Dataset {
            label: format!("{} ({})", entity.friendly_name, kind.unit()),
            data: points(entity),
            border_color,
            background_color,
            border_width: style.border_width,
            y_axis_id: kind.axis_id(),
            stack: style.stacked.then(|| kind.stack_group()),
            fill: None,
            tension: None,
            stepped: None,
            point_radius: None,
            point_hover_radius: None,
        };

        if !style.is_bar() {
            dataset.fill = Some(style.fills_area);
            dataset.tension = Some(line.tension);
            dataset.stepped = Some(line.stepped.map_or(Stepped::Off, Stepped::Mode));
            dataset.point_radius = Some(0);
            dataset.point_hover_radius = Some(style.point_hover_radius);
        }

        dataset
    }

    fn gradient(&self, kind: EntityKind, line_type: LineType, fallback: &str) -> ColorValue {
        ColorValue::Deferred(Rc::new(GradientColor::new(
            self.gradients.clone(),
            kind,
            line_type,
            fallback,
        )))
    }
}

/// Gray series stacked on top of tracked power
fn untracked_dataset(untracked: &EntityData, style: &DatasetStyle) -> Dataset {
    let mut dataset = Dataset {
        label: untracked.friendly_name.clone(),
        data: points(untracked),
        border_color: ColorValue::solid(UNTRACKED_COLOR),
        background_color: ColorValue::solid(UNTRACKED_COLOR),
        border_width: style.border_width,
        y_axis_id: EntityKind::Power.axis_id(),
        stack: Some(EntityKind::Power.stack_group()),
        fill: None,
        tension: None,
        stepped: None,
        point_radius: None,
        point_hover_radius: None,
    };

    if !style.is_bar() {
        dataset.fill = Some(true);
        dataset.tension = Some(kind_line(EntityKind::Power).tension);
        dataset.point_radius = Some(0);
        dataset.point_hover_radius = Some(0);
    }

    dataset
}

fn points(entity: &EntityData) -> Vec<Point> {
    entity
        .data
        .iter()
        .map(|point| Point {
            x: point.millis(),
            y: point.value,
        })
        .collect()
}

fn chart_options(options: &ChartOptions) -> ChartConfigOptions {
    let stacked = options.chart_type.is_stacked();
    ChartConfigOptions {
        responsive: options.responsive,
        maintain_aspect_ratio: options.maintain_aspect_ratio,
        interaction: Interaction::default(),
        plugins: Plugins {
            legend: LegendConfig {
                display: options.show_legend,
            },
            tooltip: TooltipConfig::default(),
        },
        scales: Scales {
            x: TimeScale::new(!options.hide_x_axis, stacked),
            y: LinearScale::power(!options.hide_y_axis, stacked),
            y1: LinearScale::energy(!options.hide_y_axis, stacked),
        },
    }
}
