//! Planar-corrected surface area.
//!
//! Areas are computed with the shoelace formula on `[lon, lat]` rings, then
//! scaled to square metres with a local metres-per-degree factor derived
//! from the ring's mean latitude. Good enough for inclusion thresholds;
//! this is not a geodesic area.

use geo::{LineString, Polygon};
use sentier_core::OutputGeometry;

/// Metres per degree of latitude (and of longitude at the equator).
const METRES_PER_DEGREE: f64 = 111_320.0;

/// Planar-corrected area of `geometry` in square metres.
///
/// Only polygonal variants have an area: a `Polygon` contributes its outer
/// ring (holes are not subtracted), a `MultiPolygon` sums the outer-ring
/// area of each constituent. Everything else yields `None`.
#[must_use]
pub fn geometry_area_m2(geometry: &OutputGeometry) -> Option<f64> {
    match geometry {
        OutputGeometry::Polygon(polygon) => Some(polygon_area_m2(polygon)),
        OutputGeometry::MultiPolygon(polygons) => {
            Some(polygons.iter().map(polygon_area_m2).sum())
        }
        OutputGeometry::Point(_)
        | OutputGeometry::LineString(_)
        | OutputGeometry::MultiLineString(_) => None,
    }
}

/// Outer-ring area of `polygon` in square metres.
#[must_use]
pub fn polygon_area_m2(polygon: &Polygon<f64>) -> f64 {
    ring_area_m2(polygon.exterior())
}

#[expect(
    clippy::float_arithmetic,
    reason = "area scaling multiplies degrees by a metres-per-degree factor"
)]
fn ring_area_m2(ring: &LineString<f64>) -> f64 {
    let metres_per_degree = METRES_PER_DEGREE * mean_latitude(ring).to_radians().cos();
    shoelace_degrees_squared(ring) * metres_per_degree * metres_per_degree
}

/// Absolute planar ring area in square degrees.
#[expect(clippy::float_arithmetic, reason = "shoelace cross products")]
fn shoelace_degrees_squared(ring: &LineString<f64>) -> f64 {
    let mut doubled = 0.0;
    for line in ring.lines() {
        doubled += line.start.x * line.end.y - line.end.x * line.start.y;
    }
    (doubled / 2.0).abs()
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "mean latitude averages over a small point count"
)]
fn mean_latitude(ring: &LineString<f64>) -> f64 {
    let points = &ring.0;
    if points.is_empty() {
        return 0.0;
    }
    let total: f64 = points.iter().map(|coord| coord.y).sum();
    total / (points.len() as f64)
}

#[cfg(test)]
mod tests {
    use geo::{Coord, LineString, MultiPolygon};

    use super::*;

    fn square_ring(west: f64, south: f64, size: f64) -> LineString<f64> {
        LineString::new(vec![
            Coord { x: west, y: south },
            Coord {
                x: west + size,
                y: south,
            },
            Coord {
                x: west + size,
                y: south + size,
            },
            Coord {
                x: west,
                y: south + size,
            },
            Coord { x: west, y: south },
        ])
    }

    #[test]
    fn unit_square_at_equator_matches_the_degree_scale() {
        let polygon = Polygon::new(square_ring(-0.5, -0.5, 1.0), Vec::new());
        let expected = METRES_PER_DEGREE * METRES_PER_DEGREE;
        let area = polygon_area_m2(&polygon);
        assert!((area - expected).abs() / expected < 0.01);
    }

    #[test]
    fn area_shrinks_with_latitude() {
        let equator = polygon_area_m2(&Polygon::new(square_ring(0.0, -0.5, 1.0), Vec::new()));
        let at_sixty = polygon_area_m2(&Polygon::new(square_ring(0.0, 59.5, 1.0), Vec::new()));
        let ratio = at_sixty / equator;
        // The scale factor applies to both axes, so the ratio is cos²(60°).
        assert!((ratio - 0.25).abs() < 0.01);
    }

    #[test]
    fn holes_are_not_subtracted() {
        let outer = square_ring(0.0, 0.0, 1.0);
        let hole = square_ring(0.25, 0.25, 0.5);
        let holed = Polygon::new(outer.clone(), vec![hole]);
        let solid = Polygon::new(outer, Vec::new());
        assert_eq!(polygon_area_m2(&holed), polygon_area_m2(&solid));
    }

    #[test]
    fn multi_polygon_sums_outer_rings() {
        let first = Polygon::new(square_ring(0.0, 0.0, 1.0), Vec::new());
        let second = Polygon::new(square_ring(5.0, 0.0, 1.0), Vec::new());
        let multi = OutputGeometry::MultiPolygon(MultiPolygon::new(vec![
            first.clone(),
            second.clone(),
        ]));
        let summed = geometry_area_m2(&multi).expect("polygonal geometry has an area");
        let expected = polygon_area_m2(&first) + polygon_area_m2(&second);
        assert!((summed - expected).abs() < 1.0e-6);
    }

    #[test]
    fn lines_and_points_have_no_area() {
        let point = OutputGeometry::Point(Coord { x: 0.0, y: 0.0 });
        let line =
            OutputGeometry::LineString(LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]));
        assert_eq!(geometry_area_m2(&point), None);
        assert_eq!(geometry_area_m2(&line), None);
    }
}
