use smallvec::SmallVec;

use crate::core::{
    ColorMapping, ColorMode, ColorPalette, IntervalShape, LaneLayout, LaneMetrics, Row, TimeScale,
    resolve_fill,
};
use crate::error::TimelineResult;
use crate::render::Color;

/// Horizontal gap between a bar's left edge and its label anchor.
const BAR_LABEL_OFFSET_PX: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// One interval projected into pixel space. Lives for a single render.
///
/// Bars are rectangles anchored at `(x, y)`. Markers keep `width == 0`;
/// backends draw them as circles of radius `height / 2` centered at
/// `(x, y + height / 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedInterval {
    /// Index into the source row's interval list.
    pub source_index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub shape: IntervalShape,
    pub fill_color: Color,
    pub label: Option<RenderedLabel>,
}

impl RenderedInterval {
    /// Bounding box `(left, top, width, height)` used for hit testing.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        match self.shape {
            IntervalShape::Bar => (self.x, self.y, self.width, self.height),
            IntervalShape::Marker => {
                let radius = self.height / 2.0;
                (self.x - radius, self.y, self.height, self.height)
            }
        }
    }
}

/// One row's rendered sequence, markers hoisted to the front.
#[derive(Debug, Clone, PartialEq)]
pub struct RowGeometry {
    pub row_index: usize,
    pub lane: usize,
    pub intervals: SmallVec<[RenderedInterval; 8]>,
}

impl RowGeometry {
    pub fn iter(&self) -> impl Iterator<Item = &RenderedInterval> {
        self.intervals.iter()
    }
}

/// Projects every row into pixel space.
///
/// Purely a function of config and data; recomputed from scratch on each
/// render, no incremental caching.
pub fn project_rows(
    rows: &[Row],
    scale: TimeScale,
    lanes: &LaneLayout,
    metrics: LaneMetrics,
    color_mode: ColorMode,
    mapping: &ColorMapping,
    palette: &ColorPalette,
) -> TimelineResult<Vec<RowGeometry>> {
    metrics.validate()?;

    let scale_factor = scale.scale_factor();
    let mut projected = Vec::with_capacity(rows.len());

    for (row_index, row) in rows.iter().enumerate() {
        let lane = lanes.lane(row_index);
        let lane_top = metrics.lane_top(lane);
        let mut intervals = SmallVec::new();

        for (source_index, interval) in row.render_order() {
            let x = scale.time_to_pixel(interval.start_time)?;
            let fill_color = resolve_fill(interval, row, row_index, color_mode, mapping, palette);

            let rendered = match interval.shape() {
                IntervalShape::Bar => {
                    let label = interval.label.as_ref().map(|text| RenderedLabel {
                        text: text.clone(),
                        x: x + BAR_LABEL_OFFSET_PX,
                        y: metrics.label_baseline(lane),
                    });
                    RenderedInterval {
                        source_index,
                        x,
                        y: lane_top,
                        width: interval.duration() * scale_factor,
                        height: metrics.item_height,
                        shape: IntervalShape::Bar,
                        fill_color,
                        label,
                    }
                }
                IntervalShape::Marker => RenderedInterval {
                    source_index,
                    x,
                    y: lane_top,
                    width: 0.0,
                    height: metrics.item_height,
                    shape: IntervalShape::Marker,
                    fill_color,
                    label: None,
                },
            };
            intervals.push(rendered);
        }

        projected.push(RowGeometry {
            row_index,
            lane,
            intervals,
        });
    }

    Ok(projected)
}
