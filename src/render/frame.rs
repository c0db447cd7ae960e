use crate::core::Viewport;
use crate::error::{TimelineError, TimelineResult};
use crate::render::{CirclePrimitive, LinePrimitive, RectPrimitive, TextPrimitive};

/// Backend-agnostic scene for one timeline draw pass.
///
/// A new frame fully replaces the previous one: there is no partial update
/// path, so backends can clear and redraw unconditionally.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineFrame {
    pub viewport: Viewport,
    pub rects: Vec<RectPrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl TimelineFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            rects: Vec::new(),
            circles: Vec::new(),
            lines: Vec::new(),
            texts: Vec::new(),
        }
    }

    pub fn push_rect(&mut self, rect: RectPrimitive) {
        self.rects.push(rect);
    }

    pub fn push_circle(&mut self, circle: CirclePrimitive) {
        self.circles.push(circle);
    }

    pub fn push_line(&mut self, line: LinePrimitive) {
        self.lines.push(line);
    }

    pub fn push_text(&mut self, text: TextPrimitive) {
        self.texts.push(text);
    }

    pub fn validate(&self) -> TimelineResult<()> {
        if !self.viewport.is_valid() {
            return Err(TimelineError::Configuration(format!(
                "invalid viewport size: width={}, height={}",
                self.viewport.width, self.viewport.height
            )));
        }

        for rect in &self.rects {
            rect.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
            && self.circles.is_empty()
            && self.lines.is_empty()
            && self.texts.is_empty()
    }
}
