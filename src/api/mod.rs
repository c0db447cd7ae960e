mod axis;
mod config;
mod decorations;
mod engine;
mod legend;

pub use axis::{AxisTick, calendar_year_label};
pub use config::{
    AxisGuideStyle, AxisOrientation, BandFill, GuideLineFormat, TickGranularity, TickSpec,
    TimelineConfig,
};
pub use engine::{TimelineEngine, TimelineScene};
pub use legend::{LegendEntry, legend, legend_with_icons};
