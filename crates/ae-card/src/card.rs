//! One render cycle of the area energy card

use ae_chart::{ChartConfigBuilder, ChartOptions, ThemeColors};
use ae_config::{Config, Feature};
use ae_core::{ChartType, EntityState};
use ae_registries::{EntityResolver, RegistrySnapshot, ResolvedEntities};
use ae_statistics::{FetchRequest, Period, StatisticsFetcher, StatisticsSource};
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use crate::legend::legend_items;
use crate::view::{CardHeader, CardView};

/// How far back each render cycle looks
pub const LOOKBACK_HOURS: i64 = 24;

/// Chart options derived from a card configuration
pub fn chart_options(config: &Config, theme: &ThemeColors) -> ChartOptions {
    let chart = &config.chart;
    ChartOptions {
        show_legend: chart.legend_style.shows_chart_legend(),
        hide_x_axis: chart.axis_style.hides_x(),
        hide_y_axis: chart.axis_style.hides_y(),
        chart_type: chart.chart_type,
        line_type: chart.line_type,
        entity_color_map: config.entity_color_map(),
        theme: theme.clone(),
        ..ChartOptions::default()
    }
}

/// The card: configuration plus the chart builder kept across renders
pub struct AreaEnergyCard {
    config: Config,
    builder: ChartConfigBuilder,
    theme: ThemeColors,
}

impl AreaEnergyCard {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            builder: ChartConfigBuilder::new(),
            theme: ThemeColors::default(),
        }
    }

    /// Theme variables used to resolve `var(--name)` colors in the chart
    pub fn with_theme(mut self, theme: ThemeColors) -> Self {
        self.theme = theme;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn builder(&self) -> &ChartConfigBuilder {
        &self.builder
    }

    /// Statistics period for the configured chart type
    pub fn period(&self) -> Period {
        match self.config.chart.chart_type {
            ChartType::Line => Period::FiveMinute,
            ChartType::StackedBar | ChartType::StackedLine => Period::Hour,
        }
    }

    pub fn chart_options(&self) -> ChartOptions {
        chart_options(&self.config, &self.theme)
    }

    /// Default configuration for a freshly added card
    ///
    /// Picks the first area holding both a power and an energy sensor, or
    /// returns a config with an empty area when there is none.
    pub fn stub_config(snapshot: &RegistrySnapshot) -> Config {
        Config::stub(snapshot.stub_area().unwrap_or_default())
    }

    /// Render the last [`LOOKBACK_HOURS`] up to now
    pub async fn render<S>(&self, snapshot: &RegistrySnapshot, source: &S) -> CardView
    where
        S: StatisticsSource + ?Sized,
    {
        self.render_at(snapshot, source, Utc::now()).await
    }

    /// Render the window ending at `end`
    #[instrument(skip_all, fields(area = %self.config.area, %end))]
    pub async fn render_at<S>(
        &self,
        snapshot: &RegistrySnapshot,
        source: &S,
        end: DateTime<Utc>,
    ) -> CardView
    where
        S: StatisticsSource + ?Sized,
    {
        let resolved = EntityResolver::resolve(snapshot, &self.config);
        let request = FetchRequest::ending_at(end, LOOKBACK_HOURS, self.period());
        let total_power = self.total_power_state(snapshot);

        let data = StatisticsFetcher::new(source)
            .fetch(
                &resolved.power_entities,
                &resolved.energy_entities,
                &request,
                total_power.as_ref(),
            )
            .await;

        if data.has_no_history() {
            let message = self.no_history_message(&resolved);
            warn!("{}", message);
            return CardView::error(message);
        }

        let chart = self.builder.build(&data, &self.chart_options());
        info!(
            "Rendered {} datasets for area '{}'",
            chart.datasets().len(),
            self.config.area
        );

        let legend = if self.config.chart.legend_style.shows_entity_legend() {
            let untracked = data
                .untracked_power_data
                .as_ref()
                .filter(|_| self.config.chart.chart_type.is_stacked());
            legend_items(&resolved, &self.config.entity_color_map(), untracked)
        } else {
            Vec::new()
        };

        CardView {
            header: self.header(snapshot, &resolved),
            legend,
            chart: Some(chart),
            error: None,
        }
    }

    fn header(&self, snapshot: &RegistrySnapshot, resolved: &ResolvedEntities) -> Option<CardHeader> {
        if self.config.has_feature(Feature::HideName) {
            return None;
        }

        let title = match &self.config.name {
            Some(name) => name.clone(),
            None => format!(
                "{} Energy Consumption",
                snapshot.area_name(&self.config.area)
            ),
        };

        Some(CardHeader {
            title,
            active_lights: resolved.active_lights,
            active_switches: resolved.active_switches,
        })
    }

    /// Live state of the total power sensor, if one is configured
    fn total_power_state(&self, snapshot: &RegistrySnapshot) -> Option<EntityState> {
        let entity_id = self.config.chart.total_power_entity.as_deref()?;
        Some(snapshot.state(entity_id).cloned().unwrap_or_else(|| {
            debug!("Total power entity {} has no state", entity_id);
            EntityState::new(entity_id, "unknown")
        }))
    }

    fn no_history_message(&self, resolved: &ResolvedEntities) -> String {
        let mut ids = self.config.entity_ids();
        if ids.is_empty() {
            ids = resolved.entity_ids();
        }
        format!("No history data available for entities: {}", ids.join(", "))
    }
}
