//! Render-ready output geometry.
//!
//! Exactly one [`OutputGeometry`] variant is produced per processed feature.
//! Coordinates follow the exchange-format convention everywhere: `x` is
//! longitude and `y` is latitude, serialized as `[lon, lat]`.

use geo::{Coord, LineString, MapCoords, MultiLineString, MultiPolygon, Polygon};

/// A reconstructed geometry ready for rendering or storage.
///
/// For the `Polygon` variant the exterior ring is the boundary and the
/// interior rings are holes. `MultiPolygon` is only produced when two or
/// more independent closed outer rings exist that share no endpoints.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputGeometry {
    /// A single representative coordinate.
    Point(Coord<f64>),
    /// An open (or incidentally closed) path.
    LineString(LineString<f64>),
    /// A closed boundary with optional holes.
    Polygon(Polygon<f64>),
    /// Disjoint paths that could not be merged into one.
    MultiLineString(MultiLineString<f64>),
    /// Independent outer rings, one polygon each.
    MultiPolygon(MultiPolygon<f64>),
}

impl OutputGeometry {
    /// The exchange-format type name of this variant.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Point(_) => "Point",
            Self::LineString(_) => "LineString",
            Self::Polygon(_) => "Polygon",
            Self::MultiLineString(_) => "MultiLineString",
            Self::MultiPolygon(_) => "MultiPolygon",
        }
    }

    /// Apply `func` to every coordinate, preserving the variant.
    ///
    /// Used by the coordinate-system normalizer to convert projected pairs
    /// in place without reshaping the geometry.
    #[must_use]
    pub fn map_coords<F>(&self, func: F) -> Self
    where
        F: Fn(Coord<f64>) -> Coord<f64> + Copy,
    {
        match self {
            Self::Point(coord) => Self::Point(func(*coord)),
            Self::LineString(line) => Self::LineString(line.map_coords(func)),
            Self::Polygon(polygon) => Self::Polygon(polygon.map_coords(func)),
            Self::MultiLineString(lines) => Self::MultiLineString(lines.map_coords(func)),
            Self::MultiPolygon(polygons) => Self::MultiPolygon(polygons.map_coords(func)),
        }
    }
}

impl From<&OutputGeometry> for geojson::Geometry {
    fn from(geometry: &OutputGeometry) -> Self {
        let value = match geometry {
            OutputGeometry::Point(coord) => geojson::Value::Point(vec![coord.x, coord.y]),
            OutputGeometry::LineString(line) => geojson::Value::from(line),
            OutputGeometry::Polygon(polygon) => geojson::Value::from(polygon),
            OutputGeometry::MultiLineString(lines) => geojson::Value::from(lines),
            OutputGeometry::MultiPolygon(polygons) => geojson::Value::from(polygons),
        };
        Self::new(value)
    }
}
