use chrono::{Datelike, TimeZone, Utc};
use ordered_float::OrderedFloat;

use crate::api::config::{AxisGuideStyle, AxisOrientation, TickSpec};
use crate::core::{LaneMetrics, TimeScale, format_instant};
use crate::error::TimelineResult;
use crate::interaction::{HitKind, HitRegion};
use crate::render::{
    Color, LinePrimitive, LineStrokeStyle, RectPrimitive, TextHAlign, TextPrimitive, TimelineFrame,
};

/// Gap between a tick mark and its label.
const TICK_LABEL_GAP_PX: f64 = 2.0;
/// The axis is split into six horizontal blocks to place the navigation
/// chevrons.
const NAV_TIMELINE_BLOCKS: f64 = 6.0;
const NAV_HIT_SIZE_PX: f64 = 16.0;
const NAV_BASELINE_Y_PX: f64 = 20.0;
const CALENDAR_LABEL_X_PX: f64 = 20.0;

/// Nice time steps for count-driven tick generation, in milliseconds.
const NICE_STEP_LADDER_MS: [f64; 17] = [
    60_000.0,            // 1 min
    300_000.0,           // 5 min
    600_000.0,           // 10 min
    900_000.0,           // 15 min
    1_800_000.0,         // 30 min
    3_600_000.0,         // 1 h
    10_800_000.0,        // 3 h
    21_600_000.0,        // 6 h
    43_200_000.0,        // 12 h
    86_400_000.0,        // 1 d
    172_800_000.0,       // 2 d
    604_800_000.0,       // 1 w
    1_209_600_000.0,     // 2 w
    2_592_000_000.0,     // 30 d
    7_776_000_000.0,     // 90 d
    15_552_000_000.0,    // 180 d
    31_536_000_000.0,    // 365 d
];

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub time: f64,
    pub x: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AxisLayout {
    pub baseline_y: f64,
    pub ticks: Vec<AxisTick>,
}

pub(crate) fn tick_target_count(
    axis_span_px: f64,
    target_spacing_px: f64,
    min_ticks: usize,
    max_ticks: usize,
) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return min_ticks;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return min_ticks;
    }

    let raw = (axis_span_px / target_spacing_px).floor() as usize + 1;
    raw.clamp(min_ticks, max_ticks)
}

fn nice_step_for_count(span_ms: f64, target_count: usize) -> f64 {
    let raw_step = span_ms / target_count.max(1) as f64;
    for step in NICE_STEP_LADDER_MS {
        if step >= raw_step {
            return step;
        }
    }

    let year = NICE_STEP_LADDER_MS[NICE_STEP_LADDER_MS.len() - 1];
    (raw_step / year).ceil() * year
}

/// Tick instants for the given domain.
///
/// Explicit values win; otherwise a target pixel spacing drives nice-step
/// selection, and failing that the configured granularity steps the domain
/// directly. Generated ticks align to step multiples counted from the epoch.
pub(crate) fn generate_ticks(
    domain: (f64, f64),
    spec: &TickSpec,
    plot_width_px: f64,
) -> Vec<f64> {
    let (beginning, ending) = domain;

    if let Some(values) = &spec.tick_values {
        let mut ticks: Vec<f64> = values
            .iter()
            .copied()
            .filter(|value| value.is_finite() && *value >= beginning && *value <= ending)
            .collect();
        ticks.sort_by_key(|value| OrderedFloat(*value));
        ticks.dedup();
        return ticks;
    }

    let step = match spec.target_spacing_px {
        Some(spacing) => {
            let count = tick_target_count(plot_width_px, spacing, 2, 64);
            nice_step_for_count(ending - beginning, count)
        }
        None => spec.granularity.step_millis() * f64::from(spec.interval),
    };

    let mut ticks = Vec::new();
    let mut tick = (beginning / step).ceil() * step;
    while tick <= ending {
        ticks.push(tick);
        tick += step;
    }
    ticks
}

/// Places the axis baseline above the first lane or below the last one and
/// projects every tick through the scale.
pub(crate) fn layout_axis(
    scale: TimeScale,
    spec: &TickSpec,
    orientation: AxisOrientation,
    metrics: LaneMetrics,
    max_stack: usize,
) -> TimelineResult<AxisLayout> {
    let baseline_y = match orientation {
        AxisOrientation::Top => metrics.top,
        AxisOrientation::Bottom | AxisOrientation::Left | AxisOrientation::Right => {
            metrics.band_bottom(max_stack)
        }
    };

    let (range_start, range_end) = scale.range();
    let times = generate_ticks(scale.domain(), spec, range_end - range_start);

    let mut ticks = Vec::with_capacity(times.len());
    for time in times {
        ticks.push(AxisTick {
            time,
            x: scale.time_to_pixel(time)?,
            label: format_instant(time, &spec.label_format),
        });
    }

    Ok(AxisLayout { baseline_y, ticks })
}

pub(crate) struct AxisStyle {
    pub orientation: AxisOrientation,
    pub tick_size_px: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub rotate_labels_degrees: Option<f64>,
}

/// Appends the axis baseline, tick marks, and tick labels.
pub(crate) fn append_axis(
    frame: &mut TimelineFrame,
    layout: &AxisLayout,
    scale: TimeScale,
    style: &AxisStyle,
) {
    let (range_start, range_end) = scale.range();
    let y = layout.baseline_y;

    frame.push_line(LinePrimitive::new(
        range_start,
        y,
        range_end,
        y,
        1.0,
        style.color,
    ));

    for tick in &layout.ticks {
        let (mark_end_x, mark_end_y, label_x, label_y, h_align) = match style.orientation {
            AxisOrientation::Top => (
                tick.x,
                y - style.tick_size_px,
                tick.x,
                y - style.tick_size_px - TICK_LABEL_GAP_PX - style.font_size_px,
                TextHAlign::Center,
            ),
            AxisOrientation::Bottom => (
                tick.x,
                y + style.tick_size_px,
                tick.x,
                y + style.tick_size_px + TICK_LABEL_GAP_PX,
                TextHAlign::Center,
            ),
            AxisOrientation::Left => (
                tick.x - style.tick_size_px,
                y,
                tick.x - style.tick_size_px - TICK_LABEL_GAP_PX,
                y,
                TextHAlign::Right,
            ),
            AxisOrientation::Right => (
                tick.x + style.tick_size_px,
                y,
                tick.x + style.tick_size_px + TICK_LABEL_GAP_PX,
                y,
                TextHAlign::Left,
            ),
        };

        if style.tick_size_px > 0.0 {
            frame.push_line(LinePrimitive::new(
                tick.x,
                y,
                mark_end_x,
                mark_end_y,
                1.0,
                style.color,
            ));
        }

        if !tick.label.is_empty() {
            let mut text = TextPrimitive::new(
                tick.label.clone(),
                label_x,
                label_y,
                style.font_size_px,
                style.color,
                h_align,
            );
            if let Some(degrees) = style.rotate_labels_degrees {
                text = text.with_rotation_degrees(degrees);
            }
            frame.push_text(text);
        }
    }
}

/// Dashed guide lines extending from the axis through all lanes.
pub(crate) fn append_axis_guide_lines(
    frame: &mut TimelineFrame,
    layout: &AxisLayout,
    metrics: LaneMetrics,
    max_stack: usize,
    guide_style: AxisGuideStyle,
    color: Color,
) {
    let top = (metrics.top - 3.0).max(0.0);
    let bottom = metrics.band_bottom(max_stack);
    let stroke_style = LineStrokeStyle::Dashed {
        dash_px: guide_style.dash_px,
        gap_px: guide_style.gap_px,
    };

    for tick in &layout.ticks {
        frame.push_line(
            LinePrimitive::new(tick.x, top, tick.x, bottom, 1.0, color)
                .with_stroke_style(stroke_style),
        );
    }
}

/// Single year, or a `YYYY-YYYY` range when the domain spans calendar years.
#[must_use]
pub fn calendar_year_label(beginning_ms: f64, ending_ms: f64) -> String {
    let year_of = |ms: f64| match Utc.timestamp_millis_opt(ms as i64) {
        chrono::LocalResult::Single(datetime) => datetime.year(),
        _ => 0,
    };

    let begin_year = year_of(beginning_ms);
    let end_year = year_of(ending_ms);
    if begin_year == end_year {
        format!("{begin_year}")
    } else {
        format!("{begin_year}-{end_year}")
    }
}

pub(crate) fn append_calendar_year(
    frame: &mut TimelineFrame,
    domain: (f64, f64),
    font_size_px: f64,
    color: Color,
) {
    let label = calendar_year_label(domain.0, domain.1);
    frame.push_text(TextPrimitive::new(
        label,
        CALENDAR_LABEL_X_PX,
        NAV_BASELINE_Y_PX,
        font_size_px,
        color,
        TextHAlign::Left,
    ));
}

/// Chevron anchor positions derived from the margins and `nav_margin`.
pub(crate) fn nav_positions(width: f64, margin_left: f64, margin_right: f64, nav_margin: f64) -> (f64, f64) {
    let increment = (width - margin_left) / NAV_TIMELINE_BLOCKS;
    let left_x = margin_left - nav_margin;
    let right_x = width - margin_right - increment + nav_margin;
    (left_x, right_x)
}

/// Appends prior/next chevrons and returns their hit regions.
pub(crate) fn append_axis_nav(
    frame: &mut TimelineFrame,
    width: f64,
    margin_left: f64,
    margin_right: f64,
    nav_margin: f64,
    font_size_px: f64,
    color: Color,
) -> (HitRegion, HitRegion) {
    let (left_x, right_x) = nav_positions(width, margin_left, margin_right, nav_margin);

    frame.push_text(TextPrimitive::new(
        "<",
        left_x,
        NAV_BASELINE_Y_PX,
        font_size_px,
        color,
        TextHAlign::Left,
    ));
    frame.push_text(TextPrimitive::new(
        ">",
        right_x,
        NAV_BASELINE_Y_PX,
        font_size_px,
        color,
        TextHAlign::Left,
    ));

    let region = |kind, x| HitRegion {
        kind,
        x: x - NAV_HIT_SIZE_PX / 4.0,
        y: NAV_BASELINE_Y_PX - NAV_HIT_SIZE_PX / 4.0,
        width: NAV_HIT_SIZE_PX,
        height: NAV_HIT_SIZE_PX,
    };
    (
        region(HitKind::NavBackward, left_x),
        region(HitKind::NavForward, right_x),
    )
}

/// Opaque band behind the axis header area.
pub(crate) fn append_axis_header_background(
    frame: &mut TimelineFrame,
    width: f64,
    item_height: f64,
    color: Color,
) {
    frame.push_rect(RectPrimitive::new(0.0, 0.0, width, item_height, color));
}

#[cfg(test)]
mod tests {
    use super::{calendar_year_label, generate_ticks, nice_step_for_count, tick_target_count};
    use crate::api::config::{TickGranularity, TickSpec};

    #[test]
    fn granularity_stepping_aligns_to_step_multiples() {
        let spec = TickSpec {
            granularity: TickGranularity::Hours,
            interval: 3,
            ..TickSpec::default()
        };
        let hour = 3_600_000.0;
        let ticks = generate_ticks((hour * 1.5, hour * 13.0), &spec, 500.0);

        assert_eq!(ticks, vec![hour * 3.0, hour * 6.0, hour * 9.0, hour * 12.0]);
    }

    #[test]
    fn explicit_tick_values_are_filtered_and_sorted() {
        let spec = TickSpec {
            tick_values: Some(vec![50.0, 10.0, 500.0, 10.0]),
            ..TickSpec::default()
        };
        let ticks = generate_ticks((0.0, 100.0), &spec, 500.0);
        assert_eq!(ticks, vec![10.0, 50.0]);
    }

    #[test]
    fn target_spacing_drives_tick_density() {
        let spec = TickSpec {
            target_spacing_px: Some(100.0),
            ..TickSpec::default()
        };
        let hour = 3_600_000.0;
        let ticks = generate_ticks((0.0, hour * 24.0), &spec, 600.0);

        assert!(ticks.len() >= 4 && ticks.len() <= 9, "got {}", ticks.len());
        assert!(ticks.windows(2).all(|pair| pair[1] > pair[0]));
    }

    #[test]
    fn tick_count_follows_span_over_spacing() {
        assert_eq!(tick_target_count(600.0, 100.0, 2, 64), 7);
        assert_eq!(tick_target_count(0.0, 100.0, 2, 64), 2);
        assert_eq!(tick_target_count(10_000.0, 1.0, 2, 64), 64);
    }

    #[test]
    fn nice_step_never_undershoots_the_raw_step() {
        let step = nice_step_for_count(24.0 * 3_600_000.0, 7);
        assert!(step >= 24.0 * 3_600_000.0 / 7.0);
    }

    #[test]
    fn calendar_label_collapses_same_year() {
        // 2021-06-01 .. 2021-08-01
        let label = calendar_year_label(1_622_505_600_000.0, 1_627_776_000_000.0);
        assert_eq!(label, "2021");
    }

    #[test]
    fn calendar_label_spans_years_as_a_range() {
        // 2021-12-30 .. 2022-01-02
        let label = calendar_year_label(1_640_822_400_000.0, 1_641_081_600_000.0);
        assert_eq!(label, "2021-2022");
    }
}
