use std::borrow::Cow;

use tracing::debug;

use crate::api::axis::{
    AxisStyle, append_axis, append_axis_guide_lines, append_axis_header_background,
    append_axis_nav, append_calendar_year, layout_axis,
};
use crate::api::config::TimelineConfig;
use crate::api::decorations::{
    append_background_bands, append_border_lines, append_row_separators, append_today_line,
};
use crate::core::{
    ColorMapping, DomainBounds, IntervalShape, LaneLayout, LaneMetrics, Row, RowGeometry,
    TimeScale, Viewport, assign_lanes, project_rows, resolve_domain, shift_to_relative_origin,
};
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::{HitKind, HitRegion, PanState, ScrollUpdate, hit_test};
use crate::render::{CirclePrimitive, RectPrimitive, TextHAlign, TextPrimitive, TimelineFrame};

/// Stateless rendering engine: one configuration, any number of renders.
///
/// Each render is a pure function of the current config and the supplied
/// rows; its output fully replaces any previous scene. Configuration changes
/// happen through `with_*` setters on [`TimelineConfig`] before rendering,
/// never during one.
#[derive(Debug, Clone)]
pub struct TimelineEngine {
    config: TimelineConfig,
}

/// Output of one render call. Lives until the next render replaces it.
#[derive(Debug, Clone)]
pub struct TimelineScene {
    pub frame: TimelineFrame,
    pub rows: Vec<RowGeometry>,
    pub hit_regions: Vec<HitRegion>,
    pub color_mapping: ColorMapping,
    pub scale: TimeScale,
    pub lane_layout: LaneLayout,
    pub content_width: f64,
    pub container_width: f64,
}

impl TimelineScene {
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        self.scale.domain()
    }

    /// Resolves the topmost interactive element under the pointer.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&HitRegion> {
        hit_test(&self.hit_regions, x, y)
    }

    /// Pan is available only when the chart overflows its container.
    #[must_use]
    pub fn pan_available(&self) -> bool {
        PanState::is_active(self.container_width, self.content_width)
    }

    /// Offset + scale pair for synchronizing caller-side UI after a pan.
    #[must_use]
    pub fn scroll_update(&self, pan: &PanState) -> ScrollUpdate {
        ScrollUpdate {
            offset_px: pan.offset_px(),
            scale: self.scale,
        }
    }
}

impl TimelineEngine {
    pub fn new(config: TimelineConfig) -> TimelineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TimelineConfig) -> TimelineResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Lays out and draws the supplied rows into a fresh scene.
    ///
    /// Fails before producing any frame content, so a caller keeping the
    /// previous scene around loses nothing on error.
    pub fn render(&self, rows: &[Row], container: Viewport) -> TimelineResult<TimelineScene> {
        let span = tracing::debug_span!("timeline_render", rows = rows.len());
        let _guard = span.enter();

        let config = &self.config;
        config.validate()?;
        for row in rows {
            row.validate()?;
        }

        let width = resolve_width(config, container)?;
        let lanes = assign_lanes(rows.len(), config.stack_mode);
        let metrics = LaneMetrics {
            top: config.margin.top,
            item_height: config.item_height,
            item_margin: config.item_margin,
        };
        let height = config
            .height
            .unwrap_or_else(|| metrics.band_bottom(lanes.max_stack()) + config.margin.bottom);

        // Relative-time rebasing works on a copy; caller rows stay intact.
        let working: Cow<'_, [Row]> = if config.relative_time {
            let mut shifted = rows.to_vec();
            shift_to_relative_origin(&mut shifted);
            Cow::Owned(shifted)
        } else {
            Cow::Borrowed(rows)
        };

        let bounds = DomainBounds {
            beginning: config.beginning,
            ending: config.ending,
        };
        let (beginning, ending) = resolve_domain(&working, bounds)?;
        let scale = TimeScale::new(
            beginning,
            ending,
            config.margin.left,
            width - config.margin.right,
        )?;
        debug!(beginning, ending, width, height, "resolved timeline domain");

        let mapping = ColorMapping::from_rows(&working, &config.palette);
        let projected = project_rows(
            &working,
            scale,
            &lanes,
            metrics,
            config.color_mode,
            &mapping,
            &config.palette,
        )?;

        let viewport = Viewport::new(width.round() as u32, height.round() as u32);
        let mut frame = TimelineFrame::new(viewport);
        let mut hit_regions = Vec::new();

        if let Some(color) = config.axis_header_background {
            append_axis_header_background(&mut frame, width, config.item_height, color);
        }

        if let Some(fill) = &config.background {
            append_background_bands(
                &mut frame,
                fill,
                config.full_length_backgrounds,
                width,
                config.margin,
                metrics,
                &lanes,
                rows.len(),
            );
        }

        if let Some(color) = config.row_separators {
            append_row_separators(
                &mut frame,
                color,
                width,
                config.margin,
                metrics,
                &lanes,
                rows.len(),
            );
        }

        for row_geometry in &projected {
            for rendered in row_geometry.iter() {
                match rendered.shape {
                    IntervalShape::Bar => {
                        frame.push_rect(RectPrimitive::new(
                            rendered.x,
                            rendered.y,
                            rendered.width,
                            rendered.height,
                            rendered.fill_color,
                        ));
                    }
                    IntervalShape::Marker => {
                        let radius = rendered.height / 2.0;
                        frame.push_circle(CirclePrimitive::new(
                            rendered.x,
                            rendered.y + radius,
                            radius,
                            rendered.fill_color,
                        ));
                    }
                }

                if let Some(label) = &rendered.label {
                    if !label.text.is_empty() {
                        frame.push_text(TextPrimitive::new(
                            label.text.clone(),
                            label.x,
                            label.y - config.label_font_size_px,
                            config.label_font_size_px,
                            config.text_color,
                            TextHAlign::Left,
                        ));
                    }
                }

                let (x, y, region_width, region_height) = rendered.bounds();
                hit_regions.push(HitRegion {
                    kind: HitKind::Interval {
                        row_index: row_geometry.row_index,
                        interval_index: rendered.source_index,
                    },
                    x,
                    y,
                    width: region_width,
                    height: region_height,
                });
            }
        }

        for (row_index, row) in rows.iter().enumerate() {
            if row.label.is_empty() {
                continue;
            }
            let lane = lanes.lane(row_index);
            frame.push_text(TextPrimitive::new(
                row.label.clone(),
                config.label_margin,
                metrics.lane_center(lane) - config.label_font_size_px / 2.0,
                config.label_font_size_px,
                config.text_color,
                TextHAlign::Left,
            ));
            let gutter_width = (config.margin.left - config.label_margin).max(0.0);
            hit_regions.push(HitRegion {
                kind: HitKind::RowLabel { row_index },
                x: config.label_margin,
                y: metrics.lane_top(lane),
                width: gutter_width,
                height: metrics.item_height,
            });
        }

        if config.show_time_axis {
            let layout = layout_axis(
                scale,
                &config.tick_spec,
                config.orientation,
                metrics,
                lanes.max_stack(),
            )?;
            append_axis(
                &mut frame,
                &layout,
                scale,
                &AxisStyle {
                    orientation: config.orientation,
                    tick_size_px: config.tick_spec.tick_size_px,
                    font_size_px: config.tick_font_size_px,
                    color: config.text_color,
                    rotate_labels_degrees: config.rotate_ticks_degrees,
                },
            );

            if config.show_axis_guide_lines {
                append_axis_guide_lines(
                    &mut frame,
                    &layout,
                    metrics,
                    lanes.max_stack(),
                    config.axis_guide_style,
                    config.text_color,
                );
            }
        }

        if config.show_axis_nav {
            let (backward, forward) = append_axis_nav(
                &mut frame,
                width,
                config.margin.left,
                config.margin.right,
                config.nav_margin,
                config.tick_font_size_px,
                config.text_color,
            );
            hit_regions.push(backward);
            hit_regions.push(forward);
        }

        if config.show_axis_calendar_year {
            append_calendar_year(
                &mut frame,
                (beginning, ending),
                config.tick_font_size_px,
                config.text_color,
            );
        }

        if config.show_border_lines {
            append_border_lines(&mut frame, &working, scale, config.border_format, height)?;
        }

        if let Some(instant) = config.today_marker {
            append_today_line(&mut frame, instant, scale, config.today_format, height)?;
        }

        debug!(
            rects = frame.rects.len(),
            circles = frame.circles.len(),
            lines = frame.lines.len(),
            texts = frame.texts.len(),
            "timeline scene built"
        );

        Ok(TimelineScene {
            frame,
            rows: projected,
            hit_regions,
            color_mapping: mapping,
            scale,
            lane_layout: lanes,
            content_width: width,
            container_width: f64::from(container.width),
        })
    }
}

fn resolve_width(config: &TimelineConfig, container: Viewport) -> TimelineResult<f64> {
    if let Some(width) = config.width {
        return Ok(width);
    }
    if container.width > 0 {
        return Ok(f64::from(container.width));
    }
    Err(TimelineError::Configuration(
        "chart width is not set and the container has no width".to_owned(),
    ))
}

#[cfg(test)]
mod tests {
    use super::{TimelineEngine, resolve_width};
    use crate::api::config::TimelineConfig;
    use crate::core::Viewport;
    use crate::error::TimelineError;

    #[test]
    fn width_falls_back_to_the_container() {
        let config = TimelineConfig::default();
        let width = resolve_width(&config, Viewport::new(640, 0)).expect("width");
        assert_eq!(width, 640.0);
    }

    #[test]
    fn unresolved_width_is_a_configuration_error() {
        let engine = TimelineEngine::new(TimelineConfig::default()).expect("engine");
        let result = engine.render(&[], Viewport::new(0, 0));
        assert!(matches!(result, Err(TimelineError::Configuration(_))));
    }
}
