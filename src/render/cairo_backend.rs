use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::PI;

use crate::error::{TimelineError, TimelineResult};
use crate::render::{Color, LineStrokeStyle, Renderer, TextHAlign, TimelineFrame};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub rects_drawn: usize,
    pub circles_drawn: usize,
    pub lines_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a toolkit drawing-area callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &TimelineFrame,
    ) -> TimelineResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> TimelineResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(TimelineError::Configuration(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> TimelineResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(
        &mut self,
        context: &Context,
        frame: &TimelineFrame,
    ) -> TimelineResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for rect in &frame.rects {
            apply_color(context, rect.fill_color);
            context.rectangle(rect.x, rect.y, rect.width, rect.height);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
            stats.rects_drawn += 1;
        }

        for circle in &frame.circles {
            apply_color(context, circle.fill_color);
            context.new_sub_path();
            context.arc(circle.cx, circle.cy, circle.radius, 0.0, 2.0 * PI);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill circle", err))?;
            stats.circles_drawn += 1;
        }

        for line in &frame.lines {
            apply_color(context, line.color);
            context.set_line_width(line.stroke_width);
            match line.stroke_style {
                LineStrokeStyle::Solid => context.set_dash(&[], 0.0),
                LineStrokeStyle::Dashed { dash_px, gap_px } => {
                    context.set_dash(&[dash_px, gap_px], 0.0);
                }
            }
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }
        context.set_dash(&[], 0.0);

        for text in &frame.texts {
            let layout = pangocairo::functions::create_layout(context);
            let font_description =
                FontDescription::from_string(&format!("Sans {}", text.font_size_px));
            layout.set_font_description(Some(&font_description));
            layout.set_text(&text.text);

            let (text_width, _text_height) = layout.pixel_size();
            let x = match text.h_align {
                TextHAlign::Left => text.x,
                TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
                TextHAlign::Right => text.x - f64::from(text_width),
            };

            apply_color(context, text.color);
            if text.rotation_degrees != 0.0 {
                context.save().map_err(|err| {
                    map_backend_error("failed to save context for rotated text", err)
                })?;
                context.translate(text.x, text.y);
                context.rotate(text.rotation_degrees.to_radians());
                context.move_to(x - text.x, 0.0);
                pangocairo::functions::show_layout(context, &layout);
                context.restore().map_err(|err| {
                    map_backend_error("failed to restore context after rotated text", err)
                })?;
            } else {
                context.move_to(x, text.y);
                pangocairo::functions::show_layout(context, &layout);
            }
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &TimelineFrame) -> TimelineResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &TimelineFrame,
    ) -> TimelineResult<()> {
        self.render_with_context(context, frame)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> TimelineError {
    TimelineError::Configuration(format!("{prefix}: {err}"))
}
