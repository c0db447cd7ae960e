use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

/// Maps the resolved `[beginning, ending]` time domain onto a horizontal
/// pixel range, normally `[margin.left, width - margin.right]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    beginning: f64,
    ending: f64,
    range_start_px: f64,
    range_end_px: f64,
}

impl TimeScale {
    pub fn new(
        beginning: f64,
        ending: f64,
        range_start_px: f64,
        range_end_px: f64,
    ) -> TimelineResult<Self> {
        if !beginning.is_finite() || !ending.is_finite() {
            return Err(TimelineError::Data(
                "scale domain must be finite".to_owned(),
            ));
        }
        if ending <= beginning {
            return Err(TimelineError::Domain { beginning, ending });
        }
        if !range_start_px.is_finite() || !range_end_px.is_finite() || range_end_px <= range_start_px
        {
            return Err(TimelineError::Configuration(format!(
                "scale pixel range is empty: start={range_start_px}, end={range_end_px}"
            )));
        }

        Ok(Self {
            beginning,
            ending,
            range_start_px,
            range_end_px,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.beginning, self.ending)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start_px, self.range_end_px)
    }

    /// Pixels per millisecond.
    #[must_use]
    pub fn scale_factor(self) -> f64 {
        (self.range_end_px - self.range_start_px) / (self.ending - self.beginning)
    }

    pub fn time_to_pixel(self, time: f64) -> TimelineResult<f64> {
        if !time.is_finite() {
            return Err(TimelineError::Data("time must be finite".to_owned()));
        }
        Ok(self.range_start_px + (time - self.beginning) * self.scale_factor())
    }

    pub fn pixel_to_time(self, pixel: f64) -> TimelineResult<f64> {
        if !pixel.is_finite() {
            return Err(TimelineError::Data("pixel must be finite".to_owned()));
        }
        Ok(self.beginning + (pixel - self.range_start_px) / self.scale_factor())
    }
}
