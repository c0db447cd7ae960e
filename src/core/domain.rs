use serde::{Deserialize, Serialize};

use crate::core::Row;
use crate::error::{TimelineError, TimelineResult};

/// Explicit domain overrides.
///
/// Unset sides are inferred from the data. `Option` is used instead of a
/// zero sentinel so `0.0` stays a legitimate instant (relative-time charts
/// start there).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DomainBounds {
    pub beginning: Option<f64>,
    pub ending: Option<f64>,
}

impl DomainBounds {
    #[must_use]
    pub fn with_beginning(mut self, beginning: f64) -> Self {
        self.beginning = Some(beginning);
        self
    }

    #[must_use]
    pub fn with_ending(mut self, ending: f64) -> Self {
        self.ending = Some(ending);
        self
    }
}

/// Rebases every instant against the first interval's start time.
///
/// The first interval encountered in traversal order (first row, first
/// interval in input order) becomes the origin `0`; every other time shifts
/// by the same offset. Returns the subtracted origin, or `None` when there
/// is no interval to anchor on.
///
/// This pass runs before domain inference.
pub fn shift_to_relative_origin(rows: &mut [Row]) -> Option<f64> {
    let origin = rows
        .iter()
        .find_map(|row| row.intervals.first())
        .map(|interval| interval.start_time)?;

    for row in rows.iter_mut() {
        for interval in &mut row.intervals {
            interval.start_time -= origin;
            interval.end_time -= origin;
        }
    }

    Some(origin)
}

/// Resolves the `[beginning, ending]` domain from explicit bounds and data.
///
/// Unset sides become the minimum start / maximum end across all intervals.
/// Fails with a `Domain` error when the resolved span is not strictly
/// positive (e.g. a single zero-duration interval and no override).
pub fn resolve_domain(rows: &[Row], bounds: DomainBounds) -> TimelineResult<(f64, f64)> {
    for side in [bounds.beginning, bounds.ending].into_iter().flatten() {
        if !side.is_finite() {
            return Err(TimelineError::Data(
                "explicit domain bounds must be finite".to_owned(),
            ));
        }
    }

    let needs_scan = bounds.beginning.is_none() || bounds.ending.is_none();
    let mut min_start = f64::INFINITY;
    let mut max_end = f64::NEG_INFINITY;

    if needs_scan {
        let mut seen = false;
        for row in rows {
            for interval in &row.intervals {
                interval.validate()?;
                seen = true;
                min_start = min_start.min(interval.start_time);
                max_end = max_end.max(interval.end_time);
            }
        }
        if !seen {
            return Err(TimelineError::Data(
                "cannot infer a time domain from empty rows".to_owned(),
            ));
        }
    }

    let beginning = bounds.beginning.unwrap_or(min_start);
    let ending = bounds.ending.unwrap_or(max_end);
    if ending <= beginning {
        return Err(TimelineError::Domain { beginning, ending });
    }

    Ok((beginning, ending))
}

#[cfg(test)]
mod tests {
    use super::{DomainBounds, resolve_domain, shift_to_relative_origin};
    use crate::core::{Row, TimeInterval};
    use crate::error::TimelineError;

    fn rows(intervals: &[(f64, f64)]) -> Vec<Row> {
        vec![Row::new(
            "row",
            intervals
                .iter()
                .map(|&(start, end)| TimeInterval::new(start, end, "segment").expect("interval"))
                .collect(),
        )]
    }

    #[test]
    fn infers_min_start_and_max_end() {
        let rows = rows(&[(10.0, 20.0), (5.0, 30.0), (40.0, 40.0)]);
        let (beginning, ending) =
            resolve_domain(&rows, DomainBounds::default()).expect("inferred domain");
        assert_eq!(beginning, 5.0);
        assert_eq!(ending, 40.0);
    }

    #[test]
    fn explicit_bounds_skip_inference() {
        let rows = rows(&[(10.0, 20.0)]);
        let bounds = DomainBounds::default().with_beginning(0.0).with_ending(100.0);
        let (beginning, ending) = resolve_domain(&rows, bounds).expect("explicit domain");
        assert_eq!((beginning, ending), (0.0, 100.0));
    }

    #[test]
    fn zero_is_a_legitimate_explicit_beginning() {
        let rows = rows(&[(10.0, 20.0)]);
        let bounds = DomainBounds::default().with_beginning(0.0);
        let (beginning, ending) = resolve_domain(&rows, bounds).expect("mixed domain");
        assert_eq!((beginning, ending), (0.0, 20.0));
    }

    #[test]
    fn single_point_dataset_is_a_domain_error() {
        let rows = rows(&[(40.0, 40.0)]);
        let result = resolve_domain(&rows, DomainBounds::default());
        assert!(matches!(result, Err(TimelineError::Domain { .. })));
    }

    #[test]
    fn relative_origin_rebases_every_instant() {
        let mut data = vec![
            Row::new(
                "first",
                vec![
                    TimeInterval::new(1_000.0, 1_500.0, "drive").expect("interval"),
                    TimeInterval::new(1_500.0, 1_800.0, "wait").expect("interval"),
                ],
            ),
            Row::new(
                "second",
                vec![TimeInterval::new(1_200.0, 1_900.0, "ferry").expect("interval")],
            ),
        ];

        let origin = shift_to_relative_origin(&mut data).expect("origin");
        assert_eq!(origin, 1_000.0);
        assert_eq!(data[0].intervals[0].start_time, 0.0);
        assert_eq!(data[0].intervals[1].end_time, 800.0);
        assert_eq!(data[1].intervals[0].start_time, 200.0);
    }
}
