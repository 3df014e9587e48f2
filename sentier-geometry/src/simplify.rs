//! Polyline simplification.
//!
//! A recursive Douglas–Peucker pass over `[lon, lat]` coordinates. The
//! tolerance is expressed in coordinate degrees and validated up front;
//! the presets used by the pipeline are [`AREA_TOLERANCE`] for area
//! boundaries (~20 m) and [`ROUTE_TOLERANCE`] for route lines (~10 m).

use geo::Coord;
use thiserror::Error;

/// A validated simplification tolerance in coordinate degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance(f64);

/// Preset for area boundaries, roughly twenty metres.
pub const AREA_TOLERANCE: Tolerance = Tolerance(0.0002);

/// Preset for route lines, roughly ten metres.
pub const ROUTE_TOLERANCE: Tolerance = Tolerance(0.0001);

/// Errors returned by [`Tolerance::new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToleranceError {
    /// The value was negative, NaN, or infinite.
    #[error("simplification tolerance must be finite and non-negative")]
    OutOfRange,
}

impl Tolerance {
    /// Validate and construct a tolerance.
    ///
    /// # Errors
    /// Returns [`ToleranceError::OutOfRange`] for negative or non-finite
    /// values.
    pub const fn new(degrees: f64) -> Result<Self, ToleranceError> {
        if degrees.is_finite() && degrees >= 0.0 {
            Ok(Self(degrees))
        } else {
            Err(ToleranceError::OutOfRange)
        }
    }

    /// The tolerance in degrees.
    #[must_use]
    pub const fn degrees(self) -> f64 {
        self.0
    }
}

/// Reduce a polyline's point count while preserving its shape.
///
/// Runs of two or fewer points are returned unchanged, and the endpoints of
/// the input always survive. The point farthest from the first-to-last
/// segment decides whether the run splits recursively or collapses to its
/// endpoints.
#[must_use]
pub fn simplify(points: &[Coord<f64>], tolerance: Tolerance) -> Vec<Coord<f64>> {
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return Vec::new();
    };
    if points.len() <= 2 {
        return points.to_vec();
    }
    let Some((split, distance)) = farthest_interior_point(points, first, last) else {
        return points.to_vec();
    };
    if distance <= tolerance.degrees() {
        return vec![first, last];
    }
    let (head, _) = points.split_at(split + 1);
    let (_, tail) = points.split_at(split);
    let mut simplified = simplify(head, tolerance);
    // The split point would otherwise appear twice at the junction.
    simplified.pop();
    simplified.extend(simplify(tail, tolerance));
    simplified
}

fn farthest_interior_point(
    points: &[Coord<f64>],
    first: Coord<f64>,
    last: Coord<f64>,
) -> Option<(usize, f64)> {
    let interior_len = points.len().checked_sub(2)?;
    let mut farthest: Option<(usize, f64)> = None;
    for (offset, &point) in points.iter().skip(1).take(interior_len).enumerate() {
        let distance = segment_distance(point, first, last);
        if farthest.is_none_or(|(_, best)| distance > best) {
            farthest = Some((offset + 1, distance));
        }
    }
    farthest
}

/// Distance from `point` to the segment `start`–`end`, falling back to the
/// point-to-point distance when the segment is degenerate.
#[expect(
    clippy::float_arithmetic,
    reason = "point-to-segment projection is floating-point geometry"
)]
fn segment_distance(point: Coord<f64>, start: Coord<f64>, end: Coord<f64>) -> f64 {
    let run = Coord {
        x: end.x - start.x,
        y: end.y - start.y,
    };
    let length_squared = run.x * run.x + run.y * run.y;
    if length_squared == 0.0 {
        return euclidean(point, start);
    }
    let along = ((point.x - start.x) * run.x + (point.y - start.y) * run.y) / length_squared;
    let clamped = along.clamp(0.0, 1.0);
    let projection = Coord {
        x: start.x + clamped * run.x,
        y: start.y + clamped * run.y,
    };
    euclidean(point, projection)
}

#[expect(
    clippy::float_arithmetic,
    reason = "Euclidean distance is floating-point geometry"
)]
fn euclidean(a: Coord<f64>, b: Coord<f64>) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord { x, y }
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![c(1.0, 2.0)])]
    #[case(vec![c(1.0, 2.0), c(3.0, 4.0)])]
    fn short_runs_are_unchanged(#[case] points: Vec<Coord<f64>>) {
        assert_eq!(simplify(&points, AREA_TOLERANCE), points);
    }

    #[test]
    fn collinear_input_collapses_to_endpoints_at_zero_tolerance() {
        let points = vec![c(0.0, 0.0), c(1.0, 1.0), c(2.0, 2.0)];
        let zero = Tolerance::new(0.0).expect("zero is a valid tolerance");
        assert_eq!(simplify(&points, zero), vec![c(0.0, 0.0), c(2.0, 2.0)]);
    }

    #[test]
    fn significant_detours_survive() {
        let points = vec![c(0.0, 0.0), c(1.0, 5.0), c(2.0, 0.0)];
        let tolerance = Tolerance::new(0.5).expect("valid tolerance");
        assert_eq!(simplify(&points, tolerance), points);
    }

    #[test]
    fn endpoints_always_survive() {
        let points = vec![c(0.0, 0.0), c(0.5, 0.00001), c(1.0, 0.00002), c(2.0, 0.0)];
        let simplified = simplify(&points, AREA_TOLERANCE);
        assert_eq!(simplified.first(), Some(&c(0.0, 0.0)));
        assert_eq!(simplified.last(), Some(&c(2.0, 0.0)));
        assert!(simplified.len() <= points.len());
    }

    #[test]
    fn closed_rings_stay_closed() {
        let points = vec![
            c(2.0, 48.0),
            c(2.0, 48.1),
            c(2.1, 48.1),
            c(2.1, 48.0),
            c(2.0, 48.0),
        ];
        let simplified = simplify(&points, AREA_TOLERANCE);
        assert_eq!(simplified.first(), simplified.last());
        assert!(simplified.len() >= 4);
    }

    #[rstest]
    #[case(-0.1)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn invalid_tolerances_are_rejected(#[case] degrees: f64) {
        assert_eq!(Tolerance::new(degrees), Err(ToleranceError::OutOfRange));
    }

    #[test]
    fn degenerate_segment_falls_back_to_point_distance() {
        // First and last point coincide, so the baseline segment has zero
        // length and distances degrade to point-to-point.
        let points = vec![c(0.0, 0.0), c(3.0, 4.0), c(0.0, 0.0)];
        let tolerance = Tolerance::new(1.0).expect("valid tolerance");
        assert_eq!(simplify(&points, tolerance), points);
    }
}
