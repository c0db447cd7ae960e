mod color;
mod domain;
mod geometry;
mod interval;
mod primitives;
mod scale;
mod stack;
mod types;

pub use color::{ColorMapping, ColorMode, ColorPalette, DEFAULT_PALETTE, resolve_fill};
pub use domain::{DomainBounds, resolve_domain, shift_to_relative_origin};
pub use geometry::{RenderedInterval, RenderedLabel, RowGeometry, project_rows};
pub use interval::{IntervalShape, Row, TimeInterval};
pub use primitives::format_instant;
pub use scale::TimeScale;
pub use stack::{LaneLayout, LaneMetrics, StackMode, assign_lanes};
pub use types::{Margins, Viewport};
