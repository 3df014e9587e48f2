//! Representative-centre resolution.
//!
//! Every feature gets at most one representative coordinate, derived from
//! whatever partial location data the record carries. Each source is tried
//! only when the previous one produced nothing.

use geo::Coord;
use sentier_core::FeatureRecord;

/// Derive a single representative coordinate for `record`.
///
/// Resolution order: direct lat/lon, supplier-computed centre, bounding-box
/// midpoint, the envelope midpoint of the record's own geometry, and
/// finally the envelope midpoint across all member geometry. Returns `None`
/// when no source yields a finite coordinate pair.
///
/// # Examples
/// ```
/// use sentier_core::FeatureRecord;
/// use sentier_geometry::resolve_center;
///
/// let node = FeatureRecord::node(1, 46.5, 3.0);
/// let centre = resolve_center(&node).unwrap();
/// assert_eq!((centre.x, centre.y), (3.0, 46.5));
/// ```
#[must_use]
pub fn resolve_center(record: &FeatureRecord) -> Option<Coord<f64>> {
    direct(record)
        .or_else(|| supplied_center(record))
        .or_else(|| bounds_midpoint(record))
        .or_else(|| own_geometry_midpoint(record))
        .or_else(|| member_geometry_midpoint(record))
}

fn direct(record: &FeatureRecord) -> Option<Coord<f64>> {
    let (lat, lon) = record.lat.zip(record.lon)?;
    finite_coord(Coord { x: lon, y: lat })
}

fn supplied_center(record: &FeatureRecord) -> Option<Coord<f64>> {
    record.center.and_then(|point| finite_coord(point.coord()))
}

#[expect(
    clippy::float_arithmetic,
    reason = "the bounding-box midpoint is an average per axis"
)]
fn bounds_midpoint(record: &FeatureRecord) -> Option<Coord<f64>> {
    let bounds = record.bounds?;
    finite_coord(Coord {
        x: (bounds.west + bounds.east) / 2.0,
        y: (bounds.south + bounds.north) / 2.0,
    })
}

fn own_geometry_midpoint(record: &FeatureRecord) -> Option<Coord<f64>> {
    let points = record.geometry.as_deref().unwrap_or_default();
    envelope_midpoint(points.iter().map(|point| point.coord()))
}

fn member_geometry_midpoint(record: &FeatureRecord) -> Option<Coord<f64>> {
    envelope_midpoint(
        record
            .members
            .iter()
            .flat_map(|member| member.geometry.iter())
            .map(|point| point.coord()),
    )
}

/// Midpoint of the min/max envelope over the finite coordinates of `coords`.
#[expect(
    clippy::float_arithmetic,
    reason = "envelope accumulation and midpoint are coordinate math"
)]
fn envelope_midpoint<I>(coords: I) -> Option<Coord<f64>>
where
    I: Iterator<Item = Coord<f64>>,
{
    let mut envelope: Option<(Coord<f64>, Coord<f64>)> = None;
    for coord in coords.filter(|point| point.x.is_finite() && point.y.is_finite()) {
        envelope = match envelope {
            None => Some((coord, coord)),
            Some((min, max)) => Some((
                Coord {
                    x: min.x.min(coord.x),
                    y: min.y.min(coord.y),
                },
                Coord {
                    x: max.x.max(coord.x),
                    y: max.y.max(coord.y),
                },
            )),
        };
    }
    let (min, max) = envelope?;
    Some(Coord {
        x: (min.x + max.x) / 2.0,
        y: (min.y + max.y) / 2.0,
    })
}

fn finite_coord(coord: Coord<f64>) -> Option<Coord<f64>> {
    (coord.x.is_finite() && coord.y.is_finite()).then_some(coord)
}
