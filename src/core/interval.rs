use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};
use crate::render::Color;

/// How one interval is drawn: a duration bar or a zero-duration point marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntervalShape {
    Bar,
    Marker,
}

/// One time-bounded segment inside a row.
///
/// The shape is derived from the times rather than stored: an interval is a
/// `Marker` exactly when `start_time == end_time`, so deserialized values can
/// never disagree with their own bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start_time: f64,
    pub end_time: f64,
    pub description: String,
    #[serde(default)]
    pub category_key: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub explicit_color: Option<Color>,
}

impl TimeInterval {
    pub fn new(
        start_time: f64,
        end_time: f64,
        description: impl Into<String>,
    ) -> TimelineResult<Self> {
        let interval = Self {
            start_time,
            end_time,
            description: description.into(),
            category_key: None,
            label: None,
            explicit_color: None,
        };
        interval.validate()?;
        Ok(interval)
    }

    /// Zero-duration boundary event, rendered as a circle.
    pub fn marker(time: f64, description: impl Into<String>) -> TimelineResult<Self> {
        Self::new(time, time, description)
    }

    #[must_use]
    pub fn with_category_key(mut self, key: impl Into<String>) -> Self {
        self.category_key = Some(key.into());
        self
    }

    /// Markers never carry a label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        if self.shape() == IntervalShape::Bar {
            self.label = Some(label.into());
        }
        self
    }

    #[must_use]
    pub fn with_explicit_color(mut self, color: Color) -> Self {
        self.explicit_color = Some(color);
        self
    }

    #[must_use]
    pub fn shape(&self) -> IntervalShape {
        if self.start_time == self.end_time {
            IntervalShape::Marker
        } else {
            IntervalShape::Bar
        }
    }

    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    pub fn validate(&self) -> TimelineResult<()> {
        if !self.start_time.is_finite() || !self.end_time.is_finite() {
            return Err(TimelineError::Data(
                "interval times must be finite".to_owned(),
            ));
        }
        if self.end_time < self.start_time {
            return Err(TimelineError::Data(format!(
                "interval ends before it starts: start={}, end={}",
                self.start_time, self.end_time
            )));
        }
        if let Some(color) = self.explicit_color {
            color.validate().map_err(|_| {
                TimelineError::Data("interval explicit color is out of range".to_owned())
            })?;
        }
        Ok(())
    }
}

/// One chronological lane of intervals, e.g. one itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub label: String,
    /// Fallback coloring key used when an interval has no key of its own.
    #[serde(default)]
    pub category_key: Option<String>,
    /// Opaque icon asset handle carried through for callers; never
    /// interpreted or drawn by the engine.
    #[serde(default)]
    pub icon: Option<String>,
    pub intervals: Vec<TimeInterval>,
}

impl Row {
    #[must_use]
    pub fn new(label: impl Into<String>, intervals: Vec<TimeInterval>) -> Self {
        Self {
            label: label.into(),
            category_key: None,
            icon: None,
            intervals,
        }
    }

    #[must_use]
    pub fn with_category_key(mut self, key: impl Into<String>) -> Self {
        self.category_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Intervals in drawing order with their original input indices.
    ///
    /// Markers are hoisted to the front (input order preserved within each
    /// group) so boundary points are drawn beneath overlapping bars.
    pub fn render_order(&self) -> impl Iterator<Item = (usize, &TimeInterval)> {
        let markers = self
            .intervals
            .iter()
            .enumerate()
            .filter(|(_, interval)| interval.shape() == IntervalShape::Marker);
        let bars = self
            .intervals
            .iter()
            .enumerate()
            .filter(|(_, interval)| interval.shape() == IntervalShape::Bar);
        markers.chain(bars)
    }

    pub fn validate(&self) -> TimelineResult<()> {
        for interval in &self.intervals {
            interval.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{IntervalShape, Row, TimeInterval};

    #[test]
    fn zero_duration_interval_is_a_marker() {
        let interval = TimeInterval::marker(100.0, "arrive").expect("valid marker");
        assert_eq!(interval.shape(), IntervalShape::Marker);
        assert_eq!(interval.duration(), 0.0);
    }

    #[test]
    fn marker_refuses_a_label() {
        let interval = TimeInterval::marker(100.0, "arrive")
            .expect("valid marker")
            .with_label("should be dropped");
        assert!(interval.label.is_none());
    }

    #[test]
    fn backwards_interval_is_rejected() {
        assert!(TimeInterval::new(10.0, 5.0, "backwards").is_err());
    }

    #[test]
    fn render_order_hoists_markers_before_bars() {
        let row = Row::new(
            "route",
            vec![
                TimeInterval::new(0.0, 100.0, "drive").expect("bar"),
                TimeInterval::marker(100.0, "arrive").expect("marker"),
                TimeInterval::new(100.0, 150.0, "wait").expect("bar"),
            ],
        );

        let order: Vec<usize> = row.render_order().map(|(index, _)| index).collect();
        assert_eq!(order, vec![1, 0, 2]);
    }
}
