//! Linear gradients and their per-kind cache

use ae_core::{EntityKind, LineType};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// The chart's plot area in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl PlotArea {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f64,
    pub color: String,
}

impl ColorStop {
    fn new(offset: f64, color: &str) -> Self {
        Self {
            offset,
            color: color.to_string(),
        }
    }
}

/// A vertical gradient from `(x0, y0)` to `(x1, y1)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub stops: Vec<ColorStop>,
}

impl LinearGradient {
    /// Bottom-to-top gradient spanning the plot area
    pub fn vertical(area: &PlotArea, stops: Vec<ColorStop>) -> Self {
        Self {
            x0: 0.0,
            y0: area.bottom,
            x1: 0.0,
            y1: area.top,
            stops,
        }
    }
}

/// Color stops for a kind and gradient line type
///
/// `gradient_no_fill` ramps from a cool color at the bottom to red at the
/// top; `gradient` fades the kind's own hue in from transparent.
pub fn gradient_stops(kind: EntityKind, line_type: LineType) -> Vec<ColorStop> {
    if line_type == LineType::GradientNoFill {
        let bottom = match kind {
            EntityKind::Power => "rgba(59, 130, 246, 0.8)",
            EntityKind::Energy => "rgba(6, 182, 212, 0.8)",
        };
        return vec![
            ColorStop::new(0.0, bottom),
            ColorStop::new(0.3, "rgba(34, 197, 94, 0.8)"),
            ColorStop::new(0.6, "rgba(251, 191, 36, 0.8)"),
            ColorStop::new(1.0, "rgba(239, 68, 68, 0.8)"),
        ];
    }

    let rgb = match kind {
        EntityKind::Power => "59, 130, 246",
        EntityKind::Energy => "16, 185, 129",
    };
    vec![
        ColorStop::new(0.0, &format!("rgba({rgb}, 0.1)")),
        ColorStop::new(0.5, &format!("rgba({rgb}, 0.6)")),
        ColorStop::new(1.0, &format!("rgba({rgb}, 1)")),
    ]
}

#[derive(Debug, Clone, PartialEq)]
struct CachedGradient {
    width: f64,
    height: f64,
    line_type: LineType,
    gradient: LinearGradient,
}

impl CachedGradient {
    fn matches(&self, area: &PlotArea, line_type: LineType) -> bool {
        self.width == area.width() && self.height == area.height() && self.line_type == line_type
    }
}

/// Last gradient created for each kind
///
/// An entry is reused only while the plot width, plot height and line type
/// are unchanged; any difference recreates it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradientCache {
    power: Option<CachedGradient>,
    energy: Option<CachedGradient>,
    created: usize,
}

impl GradientCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, kind: EntityKind) -> &mut Option<CachedGradient> {
        match kind {
            EntityKind::Power => &mut self.power,
            EntityKind::Energy => &mut self.energy,
        }
    }

    /// Whether a lookup with these inputs would be a cache hit
    pub fn is_cached(&self, kind: EntityKind, area: &PlotArea, line_type: LineType) -> bool {
        let slot = match kind {
            EntityKind::Power => &self.power,
            EntityKind::Energy => &self.energy,
        };
        slot.as_ref()
            .is_some_and(|cached| cached.matches(area, line_type))
    }

    pub fn get_or_create(
        &mut self,
        kind: EntityKind,
        area: &PlotArea,
        line_type: LineType,
    ) -> &LinearGradient {
        let hit = self.is_cached(kind, area, line_type);
        if !hit {
            trace!(
                "Creating {:?} gradient for {}x{} ({})",
                kind,
                area.width(),
                area.height(),
                line_type.as_str()
            );
            self.created += 1;
        }

        let slot = self.slot(kind);
        if !hit {
            *slot = None;
        }
        &slot
            .get_or_insert_with(|| CachedGradient {
                width: area.width(),
                height: area.height(),
                line_type,
                gradient: LinearGradient::vertical(area, gradient_stops(kind, line_type)),
            })
            .gradient
    }

    /// Number of gradients created over the cache's lifetime
    pub fn created(&self) -> usize {
        self.created
    }

    pub fn clear(&mut self) {
        self.power = None;
        self.energy = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(width: f64, height: f64) -> PlotArea {
        PlotArea::new(10.0, 20.0, 10.0 + width, 20.0 + height)
    }

    #[test]
    fn test_plot_area_dimensions() {
        let area = PlotArea::new(10.0, 5.0, 110.0, 55.0);
        assert_eq!(area.width(), 100.0);
        assert_eq!(area.height(), 50.0);
    }

    #[test]
    fn test_gradient_runs_bottom_to_top() {
        let mut cache = GradientCache::new();
        let gradient = cache
            .get_or_create(EntityKind::Power, &area(300.0, 200.0), LineType::Gradient)
            .clone();
        assert_eq!((gradient.x0, gradient.y0), (0.0, 220.0));
        assert_eq!((gradient.x1, gradient.y1), (0.0, 20.0));
    }

    #[test]
    fn test_stops() {
        let no_fill_power = gradient_stops(EntityKind::Power, LineType::GradientNoFill);
        let no_fill_energy = gradient_stops(EntityKind::Energy, LineType::GradientNoFill);
        assert_eq!(no_fill_power.len(), 4);
        assert_eq!(no_fill_power[0].color, "rgba(59, 130, 246, 0.8)");
        assert_eq!(no_fill_energy[0].color, "rgba(6, 182, 212, 0.8)");
        assert_eq!(no_fill_power[1..], no_fill_energy[1..]);
        assert_eq!(no_fill_power[3].color, "rgba(239, 68, 68, 0.8)");

        let fill_energy = gradient_stops(EntityKind::Energy, LineType::Gradient);
        let offsets: Vec<f64> = fill_energy.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 0.5, 1.0]);
        assert_eq!(fill_energy[0].color, "rgba(16, 185, 129, 0.1)");
        assert_eq!(fill_energy[2].color, "rgba(16, 185, 129, 1)");
    }

    #[test]
    fn test_cache_hit_with_same_key() {
        let mut cache = GradientCache::new();
        let plot = area(300.0, 200.0);

        assert!(!cache.is_cached(EntityKind::Power, &plot, LineType::Gradient));
        cache.get_or_create(EntityKind::Power, &plot, LineType::Gradient);
        assert!(cache.is_cached(EntityKind::Power, &plot, LineType::Gradient));

        // same size at a different position is still a hit
        let moved = PlotArea::new(0.0, 0.0, 300.0, 200.0);
        cache.get_or_create(EntityKind::Power, &moved, LineType::Gradient);
        assert_eq!(cache.created(), 1);
    }

    #[test]
    fn test_cache_invalidated_by_any_key_change() {
        let mut cache = GradientCache::new();
        let plot = area(300.0, 200.0);
        cache.get_or_create(EntityKind::Power, &plot, LineType::Gradient);

        cache.get_or_create(EntityKind::Power, &area(301.0, 200.0), LineType::Gradient);
        assert_eq!(cache.created(), 2);

        cache.get_or_create(EntityKind::Power, &area(301.0, 199.0), LineType::Gradient);
        assert_eq!(cache.created(), 3);

        let gradient = cache
            .get_or_create(EntityKind::Power, &area(301.0, 199.0), LineType::GradientNoFill)
            .clone();
        assert_eq!(cache.created(), 4);
        assert_eq!(gradient.stops.len(), 4);
        assert!(!cache.is_cached(EntityKind::Power, &area(301.0, 199.0), LineType::Gradient));
    }

    #[test]
    fn test_kinds_are_cached_independently() {
        let mut cache = GradientCache::new();
        let plot = area(300.0, 200.0);

        cache.get_or_create(EntityKind::Power, &plot, LineType::Gradient);
        cache.get_or_create(EntityKind::Energy, &plot, LineType::GradientNoFill);
        assert_eq!(cache.created(), 2);

        cache.get_or_create(EntityKind::Power, &plot, LineType::Gradient);
        cache.get_or_create(EntityKind::Energy, &plot, LineType::GradientNoFill);
        assert_eq!(cache.created(), 2);

        cache.get_or_create(EntityKind::Energy, &area(100.0, 100.0), LineType::GradientNoFill);
        assert!(cache.is_cached(EntityKind::Power, &plot, LineType::Gradient));
        assert!(!cache.is_cached(EntityKind::Energy, &plot, LineType::GradientNoFill));
    }

    #[test]
    fn test_clear() {
        let mut cache = GradientCache::new();
        let plot = area(300.0, 200.0);
        cache.get_or_create(EntityKind::Power, &plot, LineType::Gradient);
        cache.clear();
        assert!(!cache.is_cached(EntityKind::Power, &plot, LineType::Gradient));
    }
}
