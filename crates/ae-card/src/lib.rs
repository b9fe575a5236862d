//! The area energy card
//!
//! [`AreaEnergyCard`] runs one render cycle: resolve the area's power and
//! energy entities, fetch their statistics, derive untracked power and build
//! the chart configuration. The result is a [`CardView`] describing the
//! header, the entity legend and either the chart or an error message.
//!
//! Statistics come from any [`StatisticsSource`](ae_statistics::StatisticsSource);
//! this crate provides a JSON file source for offline rendering and a
//! WebSocket source talking to a live Home Assistant instance.

mod card;
mod file_source;
mod legend;
mod view;
mod ws_source;

pub use card::{chart_options, AreaEnergyCard, LOOKBACK_HOURS};
pub use file_source::FileStatisticsSource;
pub use legend::legend_items;
pub use view::{CardHeader, CardView, LegendItem};
pub use ws_source::WebSocketStatisticsSource;
