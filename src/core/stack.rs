use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

/// Vertical arrangement of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StackMode {
    /// Each row gets its own lane, in input order.
    Stacked,
    /// Every row shares lane 0.
    #[default]
    Overlaid,
}

/// Lane assignment for one render pass.
///
/// Assignment is positional: re-rendering with a reordered row set
/// reassigns lanes accordingly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneLayout {
    lanes: Vec<usize>,
    max_stack: usize,
}

impl LaneLayout {
    #[must_use]
    pub fn lane(&self, row_index: usize) -> usize {
        self.lanes.get(row_index).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn max_stack(&self) -> usize {
        self.max_stack
    }
}

#[must_use]
pub fn assign_lanes(row_count: usize, mode: StackMode) -> LaneLayout {
    match mode {
        StackMode::Stacked => LaneLayout {
            lanes: (0..row_count).collect(),
            max_stack: row_count.max(1),
        },
        StackMode::Overlaid => LaneLayout {
            lanes: vec![0; row_count],
            max_stack: 1,
        },
    }
}

/// Vertical lane metrics shared by geometry, decorations, and the axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneMetrics {
    pub top: f64,
    pub item_height: f64,
    pub item_margin: f64,
}

impl LaneMetrics {
    pub fn validate(self) -> TimelineResult<()> {
        if !self.top.is_finite() || self.top < 0.0 {
            return Err(TimelineError::Configuration(
                "lane top must be finite and >= 0".to_owned(),
            ));
        }
        if !self.item_height.is_finite() || self.item_height <= 0.0 {
            return Err(TimelineError::Configuration(
                "item height must be finite and > 0".to_owned(),
            ));
        }
        if !self.item_margin.is_finite() || self.item_margin < 0.0 {
            return Err(TimelineError::Configuration(
                "item margin must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn lane_step(self) -> f64 {
        self.item_height + self.item_margin
    }

    #[must_use]
    pub fn lane_top(self, lane: usize) -> f64 {
        self.top + self.lane_step() * lane as f64
    }

    #[must_use]
    pub fn lane_center(self, lane: usize) -> f64 {
        self.lane_top(lane) + self.item_height / 2.0
    }

    /// Baseline for bar labels, 75% into the lane height.
    #[must_use]
    pub fn label_baseline(self, lane: usize) -> f64 {
        self.lane_top(lane) + self.item_height * 0.75
    }

    /// First pixel row below the last lane.
    #[must_use]
    pub fn band_bottom(self, max_stack: usize) -> f64 {
        self.top + self.lane_step() * max_stack as f64
    }
}
