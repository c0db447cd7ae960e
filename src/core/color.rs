use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Row, TimeInterval};
use crate::error::{TimelineError, TimelineResult};
use crate::render::Color;

/// Default 8-color cyclic palette (the Accent scheme).
pub const DEFAULT_PALETTE: [Color; 8] = [
    Color::from_rgb8(0x7f, 0xc9, 0x7f),
    Color::from_rgb8(0xbe, 0xae, 0xd4),
    Color::from_rgb8(0xfd, 0xc0, 0x86),
    Color::from_rgb8(0xff, 0xff, 0x99),
    Color::from_rgb8(0x38, 0x6c, 0xb0),
    Color::from_rgb8(0xf0, 0x02, 0x7f),
    Color::from_rgb8(0xbf, 0x5b, 0x17),
    Color::from_rgb8(0x66, 0x66, 0x66),
];

/// How intervals without an explicit color are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorMode {
    /// Cycle the palette by row input index.
    #[default]
    ByRowIndex,
    /// Map category keys through the render's [`ColorMapping`].
    ByCategory,
}

/// Cyclic color range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPalette {
    colors: Vec<Color>,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.to_vec(),
        }
    }
}

impl ColorPalette {
    pub fn new(colors: Vec<Color>) -> TimelineResult<Self> {
        if colors.is_empty() {
            return Err(TimelineError::Configuration(
                "color palette must not be empty".to_owned(),
            ));
        }
        for color in &colors {
            color.validate()?;
        }
        Ok(Self { colors })
    }

    #[must_use]
    pub fn color_at(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Category key → color, in first-seen order for the current render.
///
/// Within one render every interval sharing a key resolves to the identical
/// color. Stability across renders is not guaranteed: ordinal positions
/// shift when the observed category set differs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorMapping {
    entries: IndexMap<String, Color>,
}

impl ColorMapping {
    /// Scans all rows' intervals once, before any interval is colored.
    ///
    /// An interval's own key wins; a row-level key fills in for intervals
    /// without one.
    #[must_use]
    pub fn from_rows(rows: &[Row], palette: &ColorPalette) -> Self {
        let mut entries = IndexMap::new();
        for row in rows {
            for interval in &row.intervals {
                let key = interval
                    .category_key
                    .as_deref()
                    .or(row.category_key.as_deref());
                if let Some(key) = key {
                    if !entries.contains_key(key) {
                        let color = palette.color_at(entries.len());
                        entries.insert(key.to_owned(), color);
                    }
                }
            }
        }
        Self { entries }
    }

    #[must_use]
    pub fn color_for(&self, key: &str) -> Option<Color> {
        self.entries.get(key).copied()
    }

    /// Observed keys with their colors, in first-seen order.
    pub fn domain(&self) -> impl Iterator<Item = (&str, Color)> {
        self.entries.iter().map(|(key, color)| (key.as_str(), *color))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves one interval's fill.
///
/// Precedence: explicit color, then the category mapping (interval key,
/// else row key) when coloring by category, then the row index through the
/// cyclic palette.
#[must_use]
pub fn resolve_fill(
    interval: &TimeInterval,
    row: &Row,
    row_index: usize,
    mode: ColorMode,
    mapping: &ColorMapping,
    palette: &ColorPalette,
) -> Color {
    if let Some(color) = interval.explicit_color {
        return color;
    }

    if mode == ColorMode::ByCategory {
        let key = interval
            .category_key
            .as_deref()
            .or(row.category_key.as_deref());
        if let Some(color) = key.and_then(|key| mapping.color_for(key)) {
            return color;
        }
    }

    palette.color_at(row_index)
}
