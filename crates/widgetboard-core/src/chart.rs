//! Chart math for donut and progress charts.
//!
//! Both charts take proportions from the stored `total`, not from the segment
//! sum. A zero total yields zero-length arcs and zero-width bars.

use crate::model::{ChartWidgetData, Segment};
use std::f64::consts::PI;

/// Share of `total` taken by `value`, in [0, 1] for consistent data.
///
/// Returns 0.0 when `total` is zero.
#[must_use]
pub fn fraction(value: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        value as f64 / total as f64
    }
}

/// Ring dimensions of a donut chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DonutGeometry {
    /// Outer size (width and height)
    pub size: f64,
    /// Ring thickness
    pub stroke_width: f64,
}

impl Default for DonutGeometry {
    fn default() -> Self {
        Self {
            size: 120.0,
            stroke_width: 20.0,
        }
    }
}

impl DonutGeometry {
    /// Create a geometry.
    #[must_use]
    pub const fn new(size: f64, stroke_width: f64) -> Self {
        Self { size, stroke_width }
    }

    /// Radius of the ring's center line.
    #[must_use]
    pub fn radius(&self) -> f64 {
        ((self.size - self.stroke_width) / 2.0).max(0.0)
    }

    /// Length of the ring's center line.
    #[must_use]
    pub fn circumference(&self) -> f64 {
        2.0 * PI * self.radius()
    }
}

/// One arc of a donut chart, in circumference units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DonutArc {
    /// Share of the ring, [0, 1] for consistent data
    pub fraction: f64,
    /// Arc length
    pub length: f64,
    /// Distance from the 12 o'clock reference to the arc start
    pub offset: f64,
}

impl DonutArc {
    /// SVG `stroke-dasharray` pair: visible length, then gap.
    #[must_use]
    pub const fn dash_array(&self, circumference: f64) -> (f64, f64) {
        (self.length, circumference)
    }

    /// SVG `stroke-dashoffset`; negative so the arc starts after its predecessors.
    #[must_use]
    pub fn dash_offset(&self) -> f64 {
        -self.offset
    }

    /// Start angle in radians, clockwise from 12 o'clock.
    #[must_use]
    pub fn start_angle(&self, circumference: f64) -> f64 {
        if circumference == 0.0 {
            0.0
        } else {
            self.offset / circumference * 2.0 * PI
        }
    }
}

/// Compute donut arcs for `segments` in list order.
#[must_use]
pub fn donut_arcs(segments: &[Segment], total: i64, circumference: f64) -> Vec<DonutArc> {
    let mut accumulated = 0.0;
    segments
        .iter()
        .map(|segment| {
            let share = fraction(segment.value, total);
            let arc = DonutArc {
                fraction: share,
                length: share * circumference,
                offset: accumulated * circumference,
            };
            accumulated += share;
            arc
        })
        .collect()
}

/// Bar width percentages for `segments`, left to right.
#[must_use]
pub fn progress_widths(segments: &[Segment], total: i64) -> Vec<f64> {
    segments
        .iter()
        .map(|segment| fraction(segment.value, total) * 100.0)
        .collect()
}

impl ChartWidgetData {
    /// Donut arcs for this chart using `geometry`.
    #[must_use]
    pub fn donut_arcs(&self, geometry: &DonutGeometry) -> Vec<DonutArc> {
        donut_arcs(&self.segments, self.total, geometry.circumference())
    }

    /// Progress bar widths (percent) for this chart.
    #[must_use]
    pub fn progress_widths(&self) -> Vec<f64> {
        progress_widths(&self.segments, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorToken;
    use crate::model::ChartKind;
    use proptest::prelude::*;

    fn segments(values: &[i64]) -> Vec<Segment> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Segment::with_token(format!("s{i}"), *v, ColorToken::Primary))
            .collect()
    }

    #[test]
    fn test_fraction_zero_total() {
        assert_eq!(fraction(5, 0), 0.0);
        assert_eq!(fraction(0, 0), 0.0);
    }

    #[test]
    fn test_geometry_default() {
        let g = DonutGeometry::default();
        assert_eq!(g.radius(), 50.0);
        assert!((g.circumference() - 100.0 * PI).abs() < 1e-9);
    }

    #[test]
    fn test_geometry_degenerate() {
        let g = DonutGeometry::new(10.0, 40.0);
        assert_eq!(g.radius(), 0.0);
        assert_eq!(g.circumference(), 0.0);
    }

    #[test]
    fn test_donut_arcs_offsets() {
        let arcs = donut_arcs(&segments(&[1, 1, 2]), 4, 100.0);
        assert_eq!(arcs.len(), 3);
        assert!((arcs[0].length - 25.0).abs() < 1e-9);
        assert_eq!(arcs[0].offset, 0.0);
        assert!((arcs[1].offset - 25.0).abs() < 1e-9);
        assert!((arcs[2].offset - 50.0).abs() < 1e-9);
        assert!((arcs[2].length - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_donut_dash_values() {
        let arcs = donut_arcs(&segments(&[1, 3]), 4, 200.0);
        assert_eq!(arcs[1].dash_array(200.0), (150.0, 200.0));
        assert_eq!(arcs[1].dash_offset(), -50.0);
        assert!((arcs[1].start_angle(200.0) - PI / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_donut_zero_total() {
        let arcs = donut_arcs(&segments(&[0, 0]), 0, 100.0);
        assert!(arcs.iter().all(|a| a.length == 0.0 && a.offset == 0.0));
    }

    #[test]
    fn test_progress_widths() {
        let widths = progress_widths(&segments(&[9, 150]), 1470);
        assert!((widths[0] - 9.0 / 1470.0 * 100.0).abs() < 1e-9);
        assert!((widths[1] - 150.0 / 1470.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_progress_zero_total() {
        let widths = progress_widths(&segments(&[3, 4]), 0);
        assert_eq!(widths, vec![0.0, 0.0]);
    }

    #[test]
    fn test_chart_methods() {
        let data = ChartWidgetData::from_segments(ChartKind::Donut, segments(&[2, 2]));
        let arcs = data.donut_arcs(&DonutGeometry::default());
        assert!((arcs[0].fraction - 0.5).abs() < 1e-9);
        assert_eq!(data.progress_widths(), vec![50.0, 50.0]);
    }

    proptest! {
        #[test]
        fn prop_progress_sums_to_100(values in prop::collection::vec(0i64..10_000, 1..8)) {
            let total: i64 = values.iter().sum();
            prop_assume!(total > 0);
            let sum: f64 = progress_widths(&segments(&values), total).iter().sum();
            prop_assert!((sum - 100.0).abs() < 1e-6);
        }

        #[test]
        fn prop_donut_covers_circle(values in prop::collection::vec(0i64..10_000, 1..8)) {
            let total: i64 = values.iter().sum();
            prop_assume!(total > 0);
            let circumference = DonutGeometry::default().circumference();
            let arcs = donut_arcs(&segments(&values), total, circumference);
            let covered: f64 = arcs.iter().map(|a| a.length).sum();
            prop_assert!((covered - circumference).abs() < 1e-6);
            let last = arcs.last().unwrap();
            prop_assert!((last.offset + last.length - circumference).abs() < 1e-6);
        }

        #[test]
        fn prop_zero_total_never_nan(values in prop::collection::vec(-100i64..100, 0..8)) {
            let segs = segments(&values);
            prop_assert!(progress_widths(&segs, 0).iter().all(|w| *w == 0.0));
            prop_assert!(donut_arcs(&segs, 0, 10.0).iter().all(|a| a.length == 0.0));
        }
    }
}
