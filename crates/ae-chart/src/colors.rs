//! Entity colors and theme tokens

use std::collections::HashMap;
use std::sync::OnceLock;

use ae_core::EntityKind;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Color of a lone power entity
pub const DEFAULT_POWER_COLOR: &str = "rgba(59, 130, 246, 0.8)";

/// Color of a lone energy entity
pub const DEFAULT_ENERGY_COLOR: &str = "rgba(16, 185, 129, 0.8)";

/// Untracked power is always drawn in neutral gray
pub const UNTRACKED_COLOR: &str = "rgba(128, 128, 128, 0.7)";

/// Palette for multiple power entities, blue first
pub const POWER_PALETTE: [&str; 8] = [
    "rgba(59, 130, 246, 0.8)",
    "rgba(239, 68, 68, 0.8)",
    "rgba(245, 158, 11, 0.8)",
    "rgba(139, 92, 246, 0.8)",
    "rgba(236, 72, 153, 0.8)",
    "rgba(34, 197, 94, 0.8)",
    "rgba(6, 182, 212, 0.8)",
    "rgba(168, 85, 247, 0.8)",
];

/// Palette for multiple energy entities, green first
pub const ENERGY_PALETTE: [&str; 8] = [
    "rgba(16, 185, 129, 0.8)",
    "rgba(239, 68, 68, 0.8)",
    "rgba(59, 130, 246, 0.8)",
    "rgba(245, 158, 11, 0.8)",
    "rgba(139, 92, 246, 0.8)",
    "rgba(236, 72, 153, 0.8)",
    "rgba(6, 182, 212, 0.8)",
    "rgba(168, 85, 247, 0.8)",
];

/// Color names the host theme defines as `--<name>-color`
pub static THEME_COLOR_NAMES: &[&str] = &[
    "primary",
    "accent",
    "disabled",
    "red",
    "pink",
    "purple",
    "deep-purple",
    "indigo",
    "blue",
    "light-blue",
    "cyan",
    "teal",
    "green",
    "light-green",
    "lime",
    "yellow",
    "amber",
    "orange",
    "deep-orange",
    "brown",
    "light-grey",
    "grey",
    "dark-grey",
    "blue-grey",
    "black",
    "white",
];

/// Default color for an entity of a kind
///
/// A color configured for the entity wins; theme color names become
/// `var(--<name>-color)` tokens. Otherwise a single entity gets the kind's
/// default color and several entities cycle through the kind's palette.
pub fn entity_color(
    entity_id: &str,
    index: usize,
    kind: EntityKind,
    total: usize,
    color_map: &HashMap<String, String>,
) -> String {
    if let Some(color) = color_map.get(entity_id) {
        return theme_token(color);
    }

    if total == 1 {
        return match kind {
            EntityKind::Power => DEFAULT_POWER_COLOR,
            EntityKind::Energy => DEFAULT_ENERGY_COLOR,
        }
        .to_string();
    }

    let palette = match kind {
        EntityKind::Power => &POWER_PALETTE,
        EntityKind::Energy => &ENERGY_PALETTE,
    };
    palette[index % palette.len()].to_string()
}

/// Translate a theme color name into its CSS variable; other colors pass through
pub fn theme_token(color: &str) -> String {
    if THEME_COLOR_NAMES.contains(&color) {
        format!("var(--{color}-color)")
    } else {
        color.to_string()
    }
}

/// Replace the first `0.8` alpha of a palette color
pub fn with_alpha(color: &str, alpha: &str) -> String {
    color.replacen("0.8", alpha, 1)
}

/// Values of theme CSS variables, keyed by variable name (`--primary-color`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeColors(HashMap<String, String>);

impl ThemeColors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, variable: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(variable.into(), value.into());
        self
    }

    pub fn get(&self, variable: &str) -> Option<&str> {
        self.0.get(variable).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn css_variable() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^var\(\s*(--[A-Za-z0-9_-]+)\s*\)$").expect("CSS variable pattern is valid")
    })
}

/// Resolve a `var(--name)` token against the theme
///
/// Unknown or empty variables, and anything that is not a variable, are
/// returned unchanged.
pub fn resolve_color(color: &str, theme: &ThemeColors) -> String {
    css_variable()
        .captures(color.trim())
        .and_then(|captures| theme.get(&captures[1]))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(color)
        .to_string()
}
