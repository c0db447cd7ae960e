use serde::{Deserialize, Serialize};

use crate::core::{TimeInterval, TimeScale, format_instant};
use crate::error::{TimelineError, TimelineResult};

/// Vertical gap between a hovered shape and the tooltip below it.
const TOOLTIP_ANCHOR_GAP_PX: f64 = 3.0;

/// What a pointer position resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitKind {
    Interval {
        row_index: usize,
        /// Index into the source row's interval list (input order).
        interval_index: usize,
    },
    RowLabel {
        row_index: usize,
    },
    NavBackward,
    NavForward,
}

/// Axis-aligned pixel region attached to one interactive scene element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitRegion {
    pub kind: HitKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl HitRegion {
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Resolves the topmost region under the pointer.
///
/// Regions are tested back-to-front, so the last one registered (drawn on
/// top) wins.
#[must_use]
pub fn hit_test(regions: &[HitRegion], x: f64, y: f64) -> Option<&HitRegion> {
    regions.iter().rev().find(|region| region.contains(x, y))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    /// Pointer moved while over the element (continuous).
    Hover,
    /// Pointer entered the element.
    Over,
    /// Pointer left the element.
    Out,
    Click,
}

/// Typed interaction output, the engine-side form of hover/mouseover/
/// mouseout/click/navigate callbacks. The caller resolves targets back to
/// its own row and interval objects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TimelineEvent {
    Pointer {
        phase: PointerPhase,
        target: HitKind,
    },
    NavigateBackward {
        beginning: f64,
    },
    NavigateForward {
        ending: f64,
    },
}

/// Pointer dispatch state for one chart instance.
///
/// Tracks the hovered element so enter/leave transitions fire exactly once
/// per boundary crossing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InteractionState {
    hovered: Option<HitKind>,
}

impl InteractionState {
    #[must_use]
    pub fn hovered(&self) -> Option<HitKind> {
        self.hovered
    }

    /// Dispatches a pointer move, returning transition events in firing
    /// order: `Out` of the previous element, `Over` the new one, then the
    /// continuous `Hover`.
    pub fn on_pointer_move(
        &mut self,
        regions: &[HitRegion],
        x: f64,
        y: f64,
    ) -> Vec<TimelineEvent> {
        let hit = hit_test(regions, x, y).map(|region| region.kind);
        let mut events = Vec::new();

        if hit != self.hovered {
            if let Some(previous) = self.hovered {
                events.push(TimelineEvent::Pointer {
                    phase: PointerPhase::Out,
                    target: previous,
                });
            }
            if let Some(entered) = hit {
                events.push(TimelineEvent::Pointer {
                    phase: PointerPhase::Over,
                    target: entered,
                });
            }
            self.hovered = hit;
        }

        if let Some(target) = hit {
            events.push(TimelineEvent::Pointer {
                phase: PointerPhase::Hover,
                target,
            });
        }

        events
    }

    pub fn on_pointer_leave(&mut self) -> Option<TimelineEvent> {
        self.hovered.take().map(|target| TimelineEvent::Pointer {
            phase: PointerPhase::Out,
            target,
        })
    }

    /// Dispatches a click. Navigation chevrons report the current domain
    /// edge so the caller can re-render with a shifted window.
    pub fn on_click(
        &mut self,
        regions: &[HitRegion],
        domain: (f64, f64),
        x: f64,
        y: f64,
    ) -> Option<TimelineEvent> {
        let region = hit_test(regions, x, y)?;
        let (beginning, ending) = domain;
        Some(match region.kind {
            HitKind::NavBackward => TimelineEvent::NavigateBackward { beginning },
            HitKind::NavForward => TimelineEvent::NavigateForward { ending },
            kind => TimelineEvent::Pointer {
                phase: PointerPhase::Click,
                target: kind,
            },
        })
    }
}

/// Tooltip anchor position in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipPlacement {
    pub x: f64,
    pub y: f64,
}

/// Anchors the tooltip just below the hovered region's bounding box.
///
/// The horizontal position is clamped so the tooltip stays inside the
/// viewport; a wide tooltip (wrapped content) shifts left instead of
/// overflowing the right edge.
#[must_use]
pub fn place_tooltip(anchor: HitRegion, tooltip_width: f64, viewport_width: f64) -> TooltipPlacement {
    let max_left = (viewport_width - tooltip_width).max(0.0);
    TooltipPlacement {
        x: anchor.x.clamp(0.0, max_left),
        y: anchor.bottom() + TOOLTIP_ANCHOR_GAP_PX,
    }
}

/// Tooltip content: formatted start time followed by the description.
#[must_use]
pub fn tooltip_text(interval: &TimeInterval, time_pattern: &str) -> String {
    format!(
        "{} {}",
        format_instant(interval.start_time, time_pattern),
        interval.description
    )
}

/// Horizontal pan offset for charts wider than their container.
///
/// The offset is an explicit value owned by the caller; every drag yields
/// the clamped result (paired with the scale) for synchronizing other UI,
/// e.g. a fixed axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PanState {
    offset_px: f64,
}

/// Offset + scale pair reported after each pan change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollUpdate {
    pub offset_px: f64,
    pub scale: TimeScale,
}

impl PanState {
    #[must_use]
    pub fn offset_px(&self) -> f64 {
        self.offset_px
    }

    /// Pan is available only when the content overflows the container.
    #[must_use]
    pub fn is_active(container_width: f64, content_width: f64) -> bool {
        content_width > container_width
    }

    /// Applies a horizontal drag delta, clamping the offset to
    /// `[container_width - content_width, 0]`.
    pub fn apply_drag(
        &mut self,
        delta_px: f64,
        container_width: f64,
        content_width: f64,
    ) -> TimelineResult<f64> {
        if !delta_px.is_finite() {
            return Err(TimelineError::Data(
                "pan delta must be finite".to_owned(),
            ));
        }
        if !Self::is_active(container_width, content_width) {
            self.offset_px = 0.0;
            return Ok(0.0);
        }

        let min_offset = container_width - content_width;
        self.offset_px = (self.offset_px + delta_px).clamp(min_offset, 0.0);
        Ok(self.offset_px)
    }
}
