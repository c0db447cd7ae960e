use crate::api::config::{BandFill, GuideLineFormat};
use crate::core::{LaneLayout, LaneMetrics, Margins, Row, TimeScale};
use crate::error::TimelineResult;
use crate::render::{Color, LinePrimitive, RectPrimitive, TimelineFrame};

/// One background band per row, spanning the full chart or the plot area.
pub(crate) fn append_background_bands(
    frame: &mut TimelineFrame,
    fill: &BandFill,
    full_length: bool,
    width: f64,
    margin: Margins,
    metrics: LaneMetrics,
    lanes: &LaneLayout,
    row_count: usize,
) {
    let (x, band_width) = if full_length {
        (0.0, width)
    } else {
        (margin.left, width - margin.left - margin.right)
    };

    for row_index in 0..row_count {
        frame.push_rect(RectPrimitive::new(
            x,
            metrics.lane_top(lanes.lane(row_index)),
            band_width,
            metrics.item_height,
            fill.color_at(row_index),
        ));
    }
}

/// Horizontal separator at each row boundary.
pub(crate) fn append_row_separators(
    frame: &mut TimelineFrame,
    color: Color,
    width: f64,
    margin: Margins,
    metrics: LaneMetrics,
    lanes: &LaneLayout,
    row_count: usize,
) {
    for row_index in 0..row_count {
        let y = metrics.lane_top(lanes.lane(row_index))
            + metrics.item_height
            + metrics.item_margin / 2.0;
        frame.push_line(LinePrimitive::new(
            margin.left,
            y,
            width - margin.right,
            y,
            1.0,
            color,
        ));
    }
}

/// Vertical guide spanning the chart height, inset by the format margins.
fn append_vertical_guide(
    frame: &mut TimelineFrame,
    x: f64,
    format: GuideLineFormat,
    chart_height: f64,
) {
    frame.push_line(LinePrimitive::new(
        x,
        format.margin_top,
        x,
        chart_height - format.margin_bottom,
        format.width,
        format.color,
    ));
}

/// Guide lines at every interval's start and end instants.
pub(crate) fn append_border_lines(
    frame: &mut TimelineFrame,
    rows: &[Row],
    scale: TimeScale,
    format: GuideLineFormat,
    chart_height: f64,
) -> TimelineResult<()> {
    for row in rows {
        for interval in &row.intervals {
            append_vertical_guide(
                frame,
                scale.time_to_pixel(interval.start_time)?,
                format,
                chart_height,
            );
            append_vertical_guide(
                frame,
                scale.time_to_pixel(interval.end_time)?,
                format,
                chart_height,
            );
        }
    }
    Ok(())
}

/// Marker at the caller-supplied current instant.
pub(crate) fn append_today_line(
    frame: &mut TimelineFrame,
    instant_ms: f64,
    scale: TimeScale,
    format: GuideLineFormat,
    chart_height: f64,
) -> TimelineResult<()> {
    append_vertical_guide(frame, scale.time_to_pixel(instant_ms)?, format, chart_height);
    Ok(())
}
