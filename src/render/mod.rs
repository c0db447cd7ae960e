mod frame;
mod null_renderer;
mod primitives;

pub use frame::TimelineFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, LineStrokeStyle, RectPrimitive, TextHAlign,
    TextPrimitive,
};

use crate::error::TimelineResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `TimelineFrame` so
/// drawing code remains isolated from layout and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &TimelineFrame) -> TimelineResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
