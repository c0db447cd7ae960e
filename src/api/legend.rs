use std::collections::HashMap;

use crate::core::ColorMapping;
use crate::render::Color;

/// One legend swatch, in the color mapping's first-seen domain order.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub swatch_color: Color,
    pub icon: Option<String>,
    pub label: String,
}

/// Renders the resolved color domain as swatch entries.
#[must_use]
pub fn legend(mapping: &ColorMapping) -> Vec<LegendEntry> {
    mapping
        .domain()
        .map(|(key, color)| LegendEntry {
            swatch_color: color,
            icon: None,
            label: key.to_owned(),
        })
        .collect()
}

/// Like [`legend`], attaching a caller-supplied icon per category key.
#[must_use]
pub fn legend_with_icons(mapping: &ColorMapping, icons: &HashMap<String, String>) -> Vec<LegendEntry> {
    mapping
        .domain()
        .map(|(key, color)| LegendEntry {
            swatch_color: color,
            icon: icons.get(key).cloned(),
            label: key.to_owned(),
        })
        .collect()
}
