//! Geometry synthesis.
//!
//! The dispatcher that turns one feature record into one output geometry,
//! keyed by element kind and tags. Failures never propagate beyond the
//! feature that caused them: the batch keeps going.

use geo::{Coord, LineString, MultiLineString, MultiPolygon, Polygon};
use log::warn;
use sentier_core::{ElementKind, FeatureRecord, Member, MemberRole, OutputGeometry};
use thiserror::Error;

use crate::center::resolve_center;
use crate::rings::{assemble_rings, is_closed, splice_chains};
use crate::simplify::{AREA_TOLERANCE, ROUTE_TOLERANCE, simplify};

/// Route values that mark a feature as a line regardless of closure.
const ROUTE_KINDS: [&str; 3] = ["hiking", "bicycle", "mtb"];

/// Errors raised while converting a single feature record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    /// No location data was derivable from the record.
    #[error("no usable geometry")]
    MissingGeometry,
    /// A relation had no usable members and no fallback centre.
    #[error("no usable members and no fallback centre")]
    UnrecognizedShape,
}

/// Produce the output geometry for one feature record.
///
/// Failures are contained to the single feature: they are logged at
/// warning level and yield `None`, never aborting processing of sibling
/// features.
#[must_use]
pub fn to_geometry(record: &FeatureRecord) -> Option<OutputGeometry> {
    match build_geometry(record) {
        Ok(geometry) => Some(geometry),
        Err(error) => {
            warn!("skipping {:?} {}: {error}", record.kind, record.id);
            None
        }
    }
}

/// Fallible synthesis, for callers that need the failure reason.
///
/// # Errors
/// Returns [`GeometryError::MissingGeometry`] when the record carries no
/// usable location data, and [`GeometryError::UnrecognizedShape`] for a
/// relation with no usable members and no fallback centre.
pub fn build_geometry(record: &FeatureRecord) -> Result<OutputGeometry, GeometryError> {
    match record.kind {
        ElementKind::Node => node_point(record),
        ElementKind::Way => way_geometry(record),
        ElementKind::Relation => {
            if route_kind(record).is_some() {
                route_geometry(record)
            } else {
                area_geometry(record)
            }
        }
    }
}

fn route_kind(record: &FeatureRecord) -> Option<&str> {
    record
        .tags
        .get("route")
        .map(String::as_str)
        .filter(|value| ROUTE_KINDS.contains(value))
}

fn node_point(record: &FeatureRecord) -> Result<OutputGeometry, GeometryError> {
    record
        .lat
        .zip(record.lon)
        .map(|(lat, lon)| Coord { x: lon, y: lat })
        .filter(|coord| coord.x.is_finite() && coord.y.is_finite())
        .map(OutputGeometry::Point)
        .ok_or(GeometryError::MissingGeometry)
}

/// Ways become polygons when their simplified geometry closes on itself,
/// unless tagged as a route; everything else stays a line.
fn way_geometry(record: &FeatureRecord) -> Result<OutputGeometry, GeometryError> {
    let points: Vec<Coord<f64>> = record
        .geometry
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|point| point.coord())
        .collect();
    if points.is_empty() {
        return Err(GeometryError::MissingGeometry);
    }
    let simplified = simplify(&points, AREA_TOLERANCE);
    let is_route = route_kind(record).is_some();
    if !is_route && is_closed(&simplified) && simplified.len() >= 4 {
        return Ok(OutputGeometry::Polygon(Polygon::new(
            LineString::new(simplified),
            Vec::new(),
        )));
    }
    Ok(OutputGeometry::LineString(LineString::new(simplified)))
}

/// Route relations merge their members end-to-end; disjoint remainders
/// stay separate lines.
fn route_geometry(record: &FeatureRecord) -> Result<OutputGeometry, GeometryError> {
    let segments: Vec<Vec<Coord<f64>>> = record
        .members
        .iter()
        .map(|member| simplify(&member_coords(member), ROUTE_TOLERANCE))
        .filter(|segment| segment.len() >= 2)
        .collect();
    let mut chains = splice_chains(segments);
    let Some(last_chain) = chains.pop() else {
        return Err(GeometryError::MissingGeometry);
    };
    if chains.is_empty() {
        return Ok(OutputGeometry::LineString(LineString::new(last_chain)));
    }
    chains.push(last_chain);
    Ok(OutputGeometry::MultiLineString(MultiLineString::new(
        chains.into_iter().map(LineString::new).collect(),
    )))
}

/// Area relations assemble explicitly-roled members into rings; members
/// without an `outer`/`inner` role do not contribute.
fn area_geometry(record: &FeatureRecord) -> Result<OutputGeometry, GeometryError> {
    let mut outer_rings = assemble_rings(role_segments(record, MemberRole::Outer));
    let inner_rings = assemble_rings(role_segments(record, MemberRole::Inner));

    if outer_rings.len() >= 2 {
        if !inner_rings.is_empty() {
            // Compatibility with the historic output: inner rings are not
            // distributed among multiple outer rings. Likely a correctness
            // gap upstream; kept, but made visible.
            warn!(
                "relation {}: dropping {} inner ring(s) across {} outer rings",
                record.id,
                inner_rings.len(),
                outer_rings.len()
            );
        }
        let polygons = outer_rings
            .into_iter()
            .map(|ring| Polygon::new(LineString::new(ring), Vec::new()))
            .collect();
        return Ok(OutputGeometry::MultiPolygon(MultiPolygon::new(polygons)));
    }
    if let Some(outer) = outer_rings.pop() {
        let holes = inner_rings.into_iter().map(LineString::new).collect();
        return Ok(OutputGeometry::Polygon(Polygon::new(
            LineString::new(outer),
            holes,
        )));
    }
    resolve_center(record)
        .map(OutputGeometry::Point)
        .ok_or(GeometryError::UnrecognizedShape)
}

fn role_segments(record: &FeatureRecord, role: MemberRole) -> Vec<Vec<Coord<f64>>> {
    record
        .members
        .iter()
        .filter(|member| member.role == role)
        .map(|member| simplify(&member_coords(member), AREA_TOLERANCE))
        .collect()
}

fn member_coords(member: &Member) -> Vec<Coord<f64>> {
    member.geometry.iter().map(|point| point.coord()).collect()
}
