//! Coordinate-system detection and normalization.
//!
//! Some upstream sources hand back coordinates in the French national grid
//! (Lambert-93, metre-based) instead of geographic degrees. Detection is a
//! heuristic: a pair is treated as projected when it falls outside valid
//! longitude/latitude ranges *and* inside the grid's practical bounds.
//! Conversion is the inverse Lambert Conformal Conic projection on the
//! GRS80 ellipsoid, with iterative latitude recovery.
//!
//! Normalization fails open: a pair the transform cannot convert keeps its
//! original value, so degraded geometry is still emitted rather than
//! crashing the pipeline.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use std::ops::RangeInclusive;
use std::sync::OnceLock;

use geo::Coord;
use log::warn;
use sentier_core::OutputGeometry;

/// Practical easting bounds of the French grid, in metres.
const EASTING_RANGE: RangeInclusive<f64> = 50_000.0..=1_500_000.0;

/// Practical northing bounds of the French grid, in metres.
const NORTHING_RANGE: RangeInclusive<f64> = 5_500_000.0..=7_500_000.0;

/// GRS80 semi-major axis in metres.
const GRS80_SEMI_MAJOR: f64 = 6_378_137.0;

/// GRS80 inverse flattening.
const GRS80_INVERSE_FLATTENING: f64 = 298.257_222_101;

/// Latitude-recovery convergence threshold, in radians.
const CONVERGENCE: f64 = 1.0e-11;

const MAX_ITERATIONS: usize = 10;

/// An inverse Lambert Conformal Conic projection with fixed parameters.
///
/// Field names follow the conventional projection formulas: `n` is the cone
/// constant, `big_f` the scaled mapping radius, `rho_0` the radius at the
/// reference latitude, and `lambda_0` the reference longitude in radians.
#[derive(Debug, Clone)]
struct LambertConformalConic {
    eccentricity: f64,
    n: f64,
    big_f: f64,
    rho_0: f64,
    lambda_0: f64,
    false_easting: f64,
    false_northing: f64,
}

impl LambertConformalConic {
    /// Derive the projection constants from two standard parallels.
    ///
    /// Angles are in degrees, offsets in metres.
    #[expect(
        clippy::float_arithmetic,
        reason = "projection constants are closed-form ellipsoid math"
    )]
    fn new(
        reference_lat: f64,
        reference_lon: f64,
        parallel_south: f64,
        parallel_north: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        let flattening = 1.0 / GRS80_INVERSE_FLATTENING;
        let eccentricity = (flattening * (2.0 - flattening)).sqrt();

        let phi_0 = reference_lat.to_radians();
        let phi_1 = parallel_south.to_radians();
        let phi_2 = parallel_north.to_radians();

        let m_1 = parallel_radius(eccentricity, phi_1);
        let m_2 = parallel_radius(eccentricity, phi_2);
        let t_0 = isometric_t(eccentricity, phi_0);
        let t_1 = isometric_t(eccentricity, phi_1);
        let t_2 = isometric_t(eccentricity, phi_2);

        let n = (m_1.ln() - m_2.ln()) / (t_1.ln() - t_2.ln());
        let big_f = m_1 / (n * t_1.powf(n));
        let rho_0 = GRS80_SEMI_MAJOR * big_f * t_0.powf(n);

        Self {
            eccentricity,
            n,
            big_f,
            rho_0,
            lambda_0: reference_lon.to_radians(),
            false_easting,
            false_northing,
        }
    }

    /// Invert one easting/northing pair to geographic degrees.
    #[expect(
        clippy::float_arithmetic,
        reason = "the inverse projection is closed-form ellipsoid math"
    )]
    fn inverse(&self, easting: f64, northing: f64) -> Option<Coord<f64>> {
        let x = easting - self.false_easting;
        let y = self.rho_0 - (northing - self.false_northing);
        let rho = x.hypot(y) * self.n.signum();
        if rho == 0.0 {
            return None;
        }
        let t = (rho / (GRS80_SEMI_MAJOR * self.big_f)).powf(1.0 / self.n);
        let theta = x.atan2(y);
        let lambda = theta / self.n + self.lambda_0;
        let phi = recover_latitude(self.eccentricity, t)?;
        let coord = Coord {
            x: lambda.to_degrees(),
            y: phi.to_degrees(),
        };
        (coord.x.is_finite() && coord.y.is_finite()).then_some(coord)
    }
}

/// Radius of the parallel at `phi`, scaled to the unit ellipsoid.
#[expect(clippy::float_arithmetic, reason = "ellipsoid math")]
fn parallel_radius(eccentricity: f64, phi: f64) -> f64 {
    let e_sin = eccentricity * phi.sin();
    phi.cos() / (1.0 - e_sin * e_sin).sqrt()
}

/// The isometric-latitude function `t` of the conformal mapping.
#[expect(clippy::float_arithmetic, reason = "ellipsoid math")]
fn isometric_t(eccentricity: f64, phi: f64) -> f64 {
    let e_sin = eccentricity * phi.sin();
    (FRAC_PI_4 - phi / 2.0).tan() / ((1.0 - e_sin) / (1.0 + e_sin)).powf(eccentricity / 2.0)
}

/// Iteratively recover the geodetic latitude from `t`.
///
/// Returns `None` when the iteration fails to converge.
#[expect(clippy::float_arithmetic, reason = "ellipsoid math")]
fn recover_latitude(eccentricity: f64, t: f64) -> Option<f64> {
    let mut phi = FRAC_PI_2 - 2.0 * t.atan();
    for _ in 0..MAX_ITERATIONS {
        let e_sin = eccentricity * phi.sin();
        let next =
            FRAC_PI_2 - 2.0 * (t * ((1.0 - e_sin) / (1.0 + e_sin)).powf(eccentricity / 2.0)).atan();
        if (next - phi).abs() < CONVERGENCE {
            return Some(next);
        }
        phi = next;
    }
    None
}

/// The Lambert-93 projection: reference 46.5°N / 3°E, standard parallels
/// 44° and 49°, false easting 700 000 m, false northing 6 600 000 m.
fn lambert_93() -> &'static LambertConformalConic {
    static PROJECTION: OnceLock<LambertConformalConic> = OnceLock::new();
    PROJECTION
        .get_or_init(|| LambertConformalConic::new(46.5, 3.0, 44.0, 49.0, 700_000.0, 6_600_000.0))
}

/// True when the pair looks like a French-grid projected coordinate.
///
/// The pair must be outside valid longitude/latitude ranges and inside the
/// grid's practical bounds.
#[must_use]
pub fn is_projected(x: f64, y: f64) -> bool {
    let out_of_geographic_range = x.abs() > 180.0 || y.abs() > 90.0;
    out_of_geographic_range && EASTING_RANGE.contains(&x) && NORTHING_RANGE.contains(&y)
}

/// Convert a coordinate pair to geographic degrees.
///
/// Pairs that do not look projected are assumed geographic already and pass
/// through unchanged (`x` before `y`; the caller owns axis-order
/// consistency). Returns `None` when the transform fails.
#[must_use]
pub fn to_geographic(x: f64, y: f64) -> Option<Coord<f64>> {
    if is_projected(x, y) {
        lambert_93().inverse(x, y)
    } else {
        Some(Coord { x, y })
    }
}

/// Fail-open normalization of a single coordinate.
///
/// Projected pairs convert to degrees; a failed transform keeps the
/// original value so the feature is still emitted, degraded rather than
/// dropped. The grid's practical bounds keep the inverse transform
/// convergent, so the fallback only fires for inputs outside them.
#[must_use]
pub fn normalize_coord(coord: Coord<f64>) -> Coord<f64> {
    match to_geographic(coord.x, coord.y) {
        Some(converted) => converted,
        None => {
            warn!(
                "projection failed for ({}, {}), keeping original coordinates",
                coord.x, coord.y
            );
            coord
        }
    }
}

/// Normalize every coordinate of `geometry`, preserving its shape.
#[must_use]
pub fn normalize_geometry(geometry: &OutputGeometry) -> OutputGeometry {
    geometry.map_coords(normalize_coord)
}
