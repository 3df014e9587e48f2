//! Property-based tests for polyline simplification.
//!
//! These tests use `proptest` to assert invariants that must hold for all
//! valid inputs, complementing the example-driven unit tests.
//!
//! # Invariants tested
//!
//! - **Never grows:** Simplification never adds points.
//! - **Endpoints survive:** The first and last input point are preserved.
//! - **Subsequence:** Every output point existed in the input.
//! - **Closure:** Closed rings stay closed.

use geo::Coord;
use proptest::prelude::*;
use sentier_geometry::{Tolerance, simplify};

fn coord_strategy() -> impl Strategy<Value = Coord<f64>> {
    (-180.0..180.0_f64, -90.0..90.0_f64).prop_map(|(x, y)| Coord { x, y })
}

fn polyline_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<Coord<f64>>> {
    prop::collection::vec(coord_strategy(), min_len..max_len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: the output never has more points than the input.
    #[test]
    fn simplification_never_grows(
        points in polyline_strategy(0, 40),
        degrees in 0.0..1.0_f64,
    ) {
        let tolerance = Tolerance::new(degrees).expect("finite non-negative tolerance");
        let simplified = simplify(&points, tolerance);
        prop_assert!(
            simplified.len() <= points.len(),
            "simplification grew {} points into {}",
            points.len(),
            simplified.len()
        );
    }

    /// Property: the endpoints of the input always survive.
    #[test]
    fn endpoints_survive(
        points in polyline_strategy(2, 40),
        degrees in 0.0..1.0_f64,
    ) {
        let tolerance = Tolerance::new(degrees).expect("finite non-negative tolerance");
        let simplified = simplify(&points, tolerance);
        prop_assert_eq!(simplified.first(), points.first());
        prop_assert_eq!(simplified.last(), points.last());
    }

    /// Property: simplification only removes points, so every output point
    /// must be present in the input.
    #[test]
    fn output_is_a_subset_of_the_input(
        points in polyline_strategy(0, 40),
        degrees in 0.0..1.0_f64,
    ) {
        let tolerance = Tolerance::new(degrees).expect("finite non-negative tolerance");
        let simplified = simplify(&points, tolerance);
        for point in &simplified {
            prop_assert!(
                points.contains(point),
                "output point {:?} does not exist in the input",
                point
            );
        }
    }

    /// Property: a ring that enters simplification closed leaves it closed.
    #[test]
    fn closed_rings_stay_closed(
        mut points in polyline_strategy(3, 40),
        degrees in 0.0..1.0_f64,
    ) {
        let first = *points.first().expect("at least three points");
        points.push(first);
        let tolerance = Tolerance::new(degrees).expect("finite non-negative tolerance");
        let simplified = simplify(&points, tolerance);
        prop_assert_eq!(simplified.first(), simplified.last());
    }
}
