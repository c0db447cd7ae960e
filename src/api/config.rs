use serde::{Deserialize, Serialize};

use crate::core::{ColorMode, ColorPalette, Margins, StackMode};
use crate::error::{TimelineError, TimelineResult};
use crate::render::Color;

/// Which side of the plot carries the time axis, and which way tick marks
/// and labels face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisOrientation {
    /// Axis above the first lane, ticks pointing up.
    Top,
    /// Axis below the last lane, ticks pointing down.
    #[default]
    Bottom,
    /// Axis below the last lane, tick marks and labels to the left.
    Left,
    /// Axis below the last lane, tick marks and labels to the right.
    Right,
}

/// Time step unit for generated axis ticks.
///
/// Steps are calendar-approximate: months count 30 days, years 365.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TickGranularity {
    Minutes,
    #[default]
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl TickGranularity {
    #[must_use]
    pub fn step_millis(self) -> f64 {
        match self {
            Self::Minutes => 60_000.0,
            Self::Hours => 3_600_000.0,
            Self::Days => 86_400_000.0,
            Self::Weeks => 604_800_000.0,
            Self::Months => 2_592_000_000.0,
            Self::Years => 31_536_000_000.0,
        }
    }
}

/// Tick generation and labeling controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSpec {
    /// strftime-style pattern applied to each tick instant, in UTC.
    #[serde(default = "default_tick_label_format")]
    pub label_format: String,
    #[serde(default)]
    pub granularity: TickGranularity,
    /// Granularity multiplier, e.g. every 3 hours.
    #[serde(default = "default_tick_interval")]
    pub interval: u32,
    /// When set, tick density is derived from `plot_width / target_spacing`
    /// with nice time steps instead of fixed granularity stepping.
    #[serde(default)]
    pub target_spacing_px: Option<f64>,
    /// Explicit tick instants; overrides generation entirely.
    #[serde(default)]
    pub tick_values: Option<Vec<f64>>,
    /// Tick mark length.
    #[serde(default = "default_tick_size_px")]
    pub tick_size_px: f64,
}

impl Default for TickSpec {
    fn default() -> Self {
        Self {
            label_format: default_tick_label_format(),
            granularity: TickGranularity::default(),
            interval: default_tick_interval(),
            target_spacing_px: None,
            tick_values: None,
            tick_size_px: default_tick_size_px(),
        }
    }
}

impl TickSpec {
    pub fn validate(&self) -> TimelineResult<()> {
        if self.label_format.is_empty() {
            return Err(TimelineError::Configuration(
                "tick label format must not be empty".to_owned(),
            ));
        }
        if self.interval == 0 {
            return Err(TimelineError::Configuration(
                "tick interval must be >= 1".to_owned(),
            ));
        }
        if !self.tick_size_px.is_finite() || self.tick_size_px < 0.0 {
            return Err(TimelineError::Configuration(
                "tick size must be finite and >= 0".to_owned(),
            ));
        }
        if let Some(spacing) = self.target_spacing_px {
            if !spacing.is_finite() || spacing <= 0.0 {
                return Err(TimelineError::Configuration(
                    "tick target spacing must be finite and > 0".to_owned(),
                ));
            }
        }
        if let Some(values) = &self.tick_values {
            if values.iter().any(|value| !value.is_finite()) {
                return Err(TimelineError::Configuration(
                    "explicit tick values must be finite".to_owned(),
                ));
            }
        }
        Ok(())
    }
}

/// Style of a full-height vertical guide line (border and "today" markers).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideLineFormat {
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub width: f64,
    pub color: Color,
}

impl Default for GuideLineFormat {
    fn default() -> Self {
        Self {
            margin_top: 25.0,
            margin_bottom: 0.0,
            width: 1.0,
            color: Color::from_rgb8(0x66, 0x66, 0x66),
        }
    }
}

impl GuideLineFormat {
    pub fn validate(self) -> TimelineResult<()> {
        if !self.margin_top.is_finite()
            || self.margin_top < 0.0
            || !self.margin_bottom.is_finite()
            || self.margin_bottom < 0.0
        {
            return Err(TimelineError::Configuration(
                "guide line margins must be finite and >= 0".to_owned(),
            ));
        }
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(TimelineError::Configuration(
                "guide line width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Dash pattern of the optional full-height axis guide lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisGuideStyle {
    pub dash_px: f64,
    pub gap_px: f64,
}

impl Default for AxisGuideStyle {
    fn default() -> Self {
        Self {
            dash_px: 4.0,
            gap_px: 10.0,
        }
    }
}

impl AxisGuideStyle {
    pub fn validate(self) -> TimelineResult<()> {
        if !self.dash_px.is_finite() || self.dash_px <= 0.0 || !self.gap_px.is_finite() || self.gap_px <= 0.0
        {
            return Err(TimelineError::Configuration(
                "axis guide dash pattern must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Per-row background band fill, in data form so the configuration stays a
/// plain serializable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BandFill {
    Uniform(Color),
    /// Cycled by row index.
    Cycle(Vec<Color>),
}

impl BandFill {
    #[must_use]
    pub fn color_at(&self, row_index: usize) -> Color {
        match self {
            Self::Uniform(color) => *color,
            Self::Cycle(colors) => colors[row_index % colors.len()],
        }
    }

    pub fn validate(&self) -> TimelineResult<()> {
        match self {
            Self::Uniform(color) => color.validate(),
            Self::Cycle(colors) => {
                if colors.is_empty() {
                    return Err(TimelineError::Configuration(
                        "background color cycle must not be empty".to_owned(),
                    ));
                }
                for color in colors {
                    color.validate()?;
                }
                Ok(())
            }
        }
    }
}

/// Immutable chart configuration.
///
/// Built upfront through `with_*` setters (callable any number of times
/// before rendering), validated once at render time, never mutated during a
/// render. Serializable so host applications can persist chart setup
/// without inventing their own format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Total chart width; falls back to the container width when unset.
    #[serde(default)]
    pub width: Option<f64>,
    /// Total chart height; computed from the lane count when unset.
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub margin: Margins,
    #[serde(default)]
    pub orientation: AxisOrientation,
    /// Explicit domain start; inferred from data when unset.
    #[serde(default)]
    pub beginning: Option<f64>,
    /// Explicit domain end; inferred from data when unset.
    #[serde(default)]
    pub ending: Option<f64>,
    #[serde(default)]
    pub stack_mode: StackMode,
    #[serde(default)]
    pub relative_time: bool,
    #[serde(default = "default_item_height")]
    pub item_height: f64,
    #[serde(default = "default_item_margin")]
    pub item_margin: f64,
    /// Left inset of row labels inside the label gutter.
    #[serde(default)]
    pub label_margin: f64,
    #[serde(default = "default_nav_margin")]
    pub nav_margin: f64,
    #[serde(default)]
    pub tick_spec: TickSpec,
    #[serde(default)]
    pub rotate_ticks_degrees: Option<f64>,
    #[serde(default)]
    pub color_mode: ColorMode,
    #[serde(default)]
    pub palette: ColorPalette,
    #[serde(default = "default_text_color")]
    pub text_color: Color,
    #[serde(default = "default_tick_font_size_px")]
    pub tick_font_size_px: f64,
    #[serde(default = "default_label_font_size_px")]
    pub label_font_size_px: f64,
    #[serde(default = "default_show_time_axis")]
    pub show_time_axis: bool,
    #[serde(default)]
    pub show_axis_guide_lines: bool,
    #[serde(default)]
    pub axis_guide_style: AxisGuideStyle,
    #[serde(default)]
    pub show_axis_calendar_year: bool,
    #[serde(default)]
    pub show_axis_nav: bool,
    #[serde(default)]
    pub axis_header_background: Option<Color>,
    #[serde(default)]
    pub background: Option<BandFill>,
    #[serde(default)]
    pub full_length_backgrounds: bool,
    #[serde(default)]
    pub row_separators: Option<Color>,
    #[serde(default)]
    pub show_border_lines: bool,
    #[serde(default)]
    pub border_format: GuideLineFormat,
    /// Current instant for the "today" marker; the engine never reads the
    /// clock itself.
    #[serde(default)]
    pub today_marker: Option<f64>,
    #[serde(default)]
    pub today_format: GuideLineFormat,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            margin: Margins::default(),
            orientation: AxisOrientation::default(),
            beginning: None,
            ending: None,
            stack_mode: StackMode::default(),
            relative_time: false,
            item_height: default_item_height(),
            item_margin: default_item_margin(),
            label_margin: 0.0,
            nav_margin: default_nav_margin(),
            tick_spec: TickSpec::default(),
            rotate_ticks_degrees: None,
            color_mode: ColorMode::default(),
            palette: ColorPalette::default(),
            text_color: default_text_color(),
            tick_font_size_px: default_tick_font_size_px(),
            label_font_size_px: default_label_font_size_px(),
            show_time_axis: default_show_time_axis(),
            show_axis_guide_lines: false,
            axis_guide_style: AxisGuideStyle::default(),
            show_axis_calendar_year: false,
            show_axis_nav: false,
            axis_header_background: None,
            background: None,
            full_length_backgrounds: false,
            row_separators: None,
            show_border_lines: false,
            border_format: GuideLineFormat::default(),
            today_marker: None,
            today_format: GuideLineFormat::default(),
        }
    }
}

impl TimelineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margins) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: AxisOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_beginning(mut self, beginning: f64) -> Self {
        self.beginning = Some(beginning);
        self
    }

    #[must_use]
    pub fn with_ending(mut self, ending: f64) -> Self {
        self.ending = Some(ending);
        self
    }

    #[must_use]
    pub fn with_stack_mode(mut self, stack_mode: StackMode) -> Self {
        self.stack_mode = stack_mode;
        self
    }

    /// Stacks each row in its own lane (input order).
    #[must_use]
    pub fn stacked(self) -> Self {
        self.with_stack_mode(StackMode::Stacked)
    }

    /// Rebases all instants against the first interval's start time.
    #[must_use]
    pub fn with_relative_time(mut self, relative_time: bool) -> Self {
        self.relative_time = relative_time;
        self
    }

    #[must_use]
    pub fn with_item_height(mut self, item_height: f64) -> Self {
        self.item_height = item_height;
        self
    }

    #[must_use]
    pub fn with_item_margin(mut self, item_margin: f64) -> Self {
        self.item_margin = item_margin;
        self
    }

    #[must_use]
    pub fn with_label_margin(mut self, label_margin: f64) -> Self {
        self.label_margin = label_margin;
        self
    }

    #[must_use]
    pub fn with_nav_margin(mut self, nav_margin: f64) -> Self {
        self.nav_margin = nav_margin;
        self
    }

    #[must_use]
    pub fn with_tick_spec(mut self, tick_spec: TickSpec) -> Self {
        self.tick_spec = tick_spec;
        self
    }

    #[must_use]
    pub fn with_rotate_ticks_degrees(mut self, degrees: f64) -> Self {
        self.rotate_ticks_degrees = Some(degrees);
        self
    }

    #[must_use]
    pub fn with_color_mode(mut self, color_mode: ColorMode) -> Self {
        self.color_mode = color_mode;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: ColorPalette) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_text_color(mut self, text_color: Color) -> Self {
        self.text_color = text_color;
        self
    }

    #[must_use]
    pub fn with_show_time_axis(mut self, show_time_axis: bool) -> Self {
        self.show_time_axis = show_time_axis;
        self
    }

    #[must_use]
    pub fn with_axis_guide_lines(mut self, style: AxisGuideStyle) -> Self {
        self.show_axis_guide_lines = true;
        self.axis_guide_style = style;
        self
    }

    #[must_use]
    pub fn with_axis_calendar_year(mut self, show: bool) -> Self {
        self.show_axis_calendar_year = show;
        self
    }

    #[must_use]
    pub fn with_axis_nav(mut self, show: bool) -> Self {
        self.show_axis_nav = show;
        self
    }

    #[must_use]
    pub fn with_axis_header_background(mut self, color: Color) -> Self {
        self.axis_header_background = Some(color);
        self
    }

    #[must_use]
    pub fn with_background(mut self, fill: BandFill) -> Self {
        self.background = Some(fill);
        self
    }

    #[must_use]
    pub fn with_full_length_backgrounds(mut self, full_length: bool) -> Self {
        self.full_length_backgrounds = full_length;
        self
    }

    #[must_use]
    pub fn with_row_separators(mut self, color: Color) -> Self {
        self.row_separators = Some(color);
        self
    }

    #[must_use]
    pub fn with_border_lines(mut self, format: GuideLineFormat) -> Self {
        self.show_border_lines = true;
        self.border_format = format;
        self
    }

    #[must_use]
    pub fn with_today_marker(mut self, instant_ms: f64, format: GuideLineFormat) -> Self {
        self.today_marker = Some(instant_ms);
        self.today_format = format;
        self
    }

    pub fn validate(&self) -> TimelineResult<()> {
        self.margin.validate()?;
        self.tick_spec.validate()?;

        for (name, value) in [("width", self.width), ("height", self.height)] {
            if let Some(value) = value {
                if !value.is_finite() || value <= 0.0 {
                    return Err(TimelineError::Configuration(format!(
                        "{name} must be finite and > 0"
                    )));
                }
            }
        }
        if !self.item_height.is_finite() || self.item_height <= 0.0 {
            return Err(TimelineError::Configuration(
                "item height must be finite and > 0".to_owned(),
            ));
        }
        if !self.item_margin.is_finite() || self.item_margin < 0.0 {
            return Err(TimelineError::Configuration(
                "item margin must be finite and >= 0".to_owned(),
            ));
        }
        if !self.label_margin.is_finite() || self.label_margin < 0.0 {
            return Err(TimelineError::Configuration(
                "label margin must be finite and >= 0".to_owned(),
            ));
        }
        if !self.nav_margin.is_finite() {
            return Err(TimelineError::Configuration(
                "nav margin must be finite".to_owned(),
            ));
        }
        for (name, value) in [
            ("tick font size", self.tick_font_size_px),
            ("label font size", self.label_font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TimelineError::Configuration(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if let Some(degrees) = self.rotate_ticks_degrees {
            if !degrees.is_finite() {
                return Err(TimelineError::Configuration(
                    "tick rotation must be finite".to_owned(),
                ));
            }
        }
        if self.palette.is_empty() {
            return Err(TimelineError::Configuration(
                "color palette must not be empty".to_owned(),
            ));
        }
        self.text_color.validate()?;
        self.axis_guide_style.validate()?;
        if let Some(color) = self.axis_header_background {
            color.validate()?;
        }
        if let Some(fill) = &self.background {
            fill.validate()?;
        }
        if let Some(color) = self.row_separators {
            color.validate()?;
        }
        self.border_format.validate()?;
        self.today_format.validate()?;
        if let Some(instant) = self.today_marker {
            if !instant.is_finite() {
                return Err(TimelineError::Configuration(
                    "today marker instant must be finite".to_owned(),
                ));
            }
        }
        for (name, value) in [("beginning", self.beginning), ("ending", self.ending)] {
            if let Some(value) = value {
                if !value.is_finite() {
                    return Err(TimelineError::Configuration(format!(
                        "explicit {name} must be finite"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            TimelineError::Configuration(format!("failed to serialize config: {e}"))
        })
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| TimelineError::Configuration(format!("failed to parse config: {e}")))
    }
}

fn default_tick_label_format() -> String {
    "%I %p".to_owned()
}

fn default_tick_interval() -> u32 {
    1
}

fn default_tick_size_px() -> f64 {
    6.0
}

fn default_item_height() -> f64 {
    20.0
}

fn default_item_margin() -> f64 {
    5.0
}

fn default_nav_margin() -> f64 {
    60.0
}

fn default_text_color() -> Color {
    Color::rgb(0.0, 0.0, 0.0)
}

fn default_tick_font_size_px() -> f64 {
    11.0
}

fn default_label_font_size_px() -> f64 {
    12.0
}

fn default_show_time_axis() -> bool {
    true
}
