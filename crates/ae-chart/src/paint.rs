//! Colors resolved at draw time

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ae_core::{EntityKind, LineType};
use serde::ser::{Serialize, Serializer};

use crate::gradient::{gradient_stops, ColorStop, GradientCache, LinearGradient, PlotArea};

/// What the renderer knows when it asks for a color
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DrawContext {
    /// `None` until the chart has been laid out
    pub plot_area: Option<PlotArea>,
}

impl DrawContext {
    pub fn new(plot_area: PlotArea) -> Self {
        Self {
            plot_area: Some(plot_area),
        }
    }

    /// Context before the first layout
    pub fn unmeasured() -> Self {
        Self::default()
    }
}

/// A concrete fill or stroke
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Color(String),
    Gradient(LinearGradient),
}

/// Serializable description of a deferred color
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ResolverDescription {
    pub kind: &'static str,
    pub fallback: String,
    pub stops: Vec<ColorStop>,
}

/// Produces a paint once the plot geometry is known
pub trait ColorResolver: fmt::Debug {
    fn resolve(&self, ctx: &DrawContext) -> Paint;

    fn describe(&self) -> ResolverDescription;
}

/// Kind gradient backed by the builder's shared cache
pub struct GradientColor {
    cache: Rc<RefCell<GradientCache>>,
    kind: EntityKind,
    line_type: LineType,
    fallback: String,
}

impl GradientColor {
    pub fn new(
        cache: Rc<RefCell<GradientCache>>,
        kind: EntityKind,
        line_type: LineType,
        fallback: impl Into<String>,
    ) -> Self {
        Self {
            cache,
            kind,
            line_type,
            fallback: fallback.into(),
        }
    }
}

impl fmt::Debug for GradientColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GradientColor")
            .field("kind", &self.kind)
            .field("line_type", &self.line_type)
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl ColorResolver for GradientColor {
    fn resolve(&self, ctx: &DrawContext) -> Paint {
        match &ctx.plot_area {
            None => Paint::Color(self.fallback.clone()),
            Some(area) => Paint::Gradient(
                self.cache
                    .borrow_mut()
                    .get_or_create(self.kind, area, self.line_type)
                    .clone(),
            ),
        }
    }

    fn describe(&self) -> ResolverDescription {
        ResolverDescription {
            kind: "gradient",
            fallback: self.fallback.clone(),
            stops: gradient_stops(self.kind, self.line_type),
        }
    }
}

/// A dataset color: fixed, or resolved by the renderer at draw time
#[derive(Clone)]
pub enum ColorValue {
    Solid(String),
    Deferred(Rc<dyn ColorResolver>),
}

impl ColorValue {
    pub fn solid(color: impl Into<String>) -> Self {
        Self::Solid(color.into())
    }

    pub fn resolve(&self, ctx: &DrawContext) -> Paint {
        match self {
            Self::Solid(color) => Paint::Color(color.clone()),
            Self::Deferred(resolver) => resolver.resolve(ctx),
        }
    }

    pub fn as_solid(&self) -> Option<&str> {
        match self {
            Self::Solid(color) => Some(color),
            Self::Deferred(_) => None,
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

impl fmt::Debug for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solid(color) => f.debug_tuple("Solid").field(color).finish(),
            Self::Deferred(resolver) => f.debug_tuple("Deferred").field(resolver).finish(),
        }
    }
}

/// Deferred colors compare by what they would draw, not by identity
impl PartialEq for ColorValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Solid(a), Self::Solid(b)) => a == b,
            (Self::Deferred(a), Self::Deferred(b)) => a.describe() == b.describe(),
            _ => false,
        }
    }
}

impl Serialize for ColorValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Solid(color) => serializer.serialize_str(color),
            Self::Deferred(resolver) => resolver.describe().serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn gradient(cache: &Rc<RefCell<GradientCache>>, line_type: LineType) -> ColorValue {
        ColorValue::Deferred(Rc::new(GradientColor::new(
            cache.clone(),
            EntityKind::Power,
            line_type,
            "rgba(59, 130, 246, 0.1)",
        )))
    }

    #[test]
    fn test_unmeasured_context_uses_fallback() {
        let cache = Rc::new(RefCell::new(GradientCache::new()));
        let color = gradient(&cache, LineType::Gradient);

        assert_eq!(
            color.resolve(&DrawContext::unmeasured()),
            Paint::Color("rgba(59, 130, 246, 0.1)".to_string())
        );
        assert_eq!(cache.borrow().created(), 0);
    }

    #[test]
    fn test_measured_context_uses_shared_cache() {
        let cache = Rc::new(RefCell::new(GradientCache::new()));
        let border = gradient(&cache, LineType::Gradient);
        let background = gradient(&cache, LineType::Gradient);
        let ctx = DrawContext::new(PlotArea::new(0.0, 0.0, 400.0, 300.0));

        let first = border.resolve(&ctx);
        let second = background.resolve(&ctx);
        assert_eq!(first, second);
        assert!(matches!(first, Paint::Gradient(ref g) if g.stops.len() == 3));
        assert_eq!(cache.borrow().created(), 1);
    }

    #[test]
    fn test_serialize() {
        let cache = Rc::new(RefCell::new(GradientCache::new()));
        assert_eq!(
            serde_json::to_value(ColorValue::solid("transparent")).unwrap(),
            json!("transparent")
        );

        let value = serde_json::to_value(gradient(&cache, LineType::GradientNoFill)).unwrap();
        assert_eq!(value["kind"], "gradient");
        assert_eq!(value["fallback"], "rgba(59, 130, 246, 0.1)");
        assert_eq!(value["stops"].as_array().unwrap().len(), 4);
        assert_eq!(value["stops"][2], json!({"offset": 0.6, "color": "rgba(251, 191, 36, 0.8)"}));
    }

    #[test]
    fn test_equality() {
        let cache = Rc::new(RefCell::new(GradientCache::new()));
        let other_cache = Rc::new(RefCell::new(GradientCache::new()));
        assert_eq!(gradient(&cache, LineType::Gradient), gradient(&other_cache, LineType::Gradient));
        assert_ne!(gradient(&cache, LineType::Gradient), gradient(&cache, LineType::GradientNoFill));
        assert_ne!(gradient(&cache, LineType::Gradient), ColorValue::solid("red"));
        assert_eq!(ColorValue::solid("red").as_solid(), Some("red"));
    }
}
