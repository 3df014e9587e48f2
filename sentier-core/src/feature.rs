//! Raw feature records as delivered by the crowd-sourced mapping supplier.
//!
//! A [`FeatureRecord`] is one mapped object: a node (single point), a way
//! (ordered point sequence), or a relation (collection of members with
//! roles). Records deserialize directly from the supplier's JSON element
//! shape and are immutable once received; the geometry engine only reads
//! them.

use std::collections::HashMap;

use geo::Coord;
use serde::Deserialize;

/// Free-form key/value tags attached to a feature.
pub type Tags = HashMap<String, String>;

/// The three element kinds a feature record can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A single point.
    Node,
    /// An ordered point sequence.
    Way,
    /// A collection of members referencing other elements with roles.
    Relation,
}

/// Role of a relation member in area semantics.
///
/// Only `outer` and `inner` carry meaning for ring assembly; every other
/// role (including the empty string) maps to [`MemberRole::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// Boundary ring of an area.
    Outer,
    /// Excluded hole inside an outer ring.
    Inner,
    /// No area semantics.
    #[default]
    #[serde(other)]
    None,
}

/// A latitude/longitude pair as it appears on the wire.
///
/// The wire format is `lat`-first; every in-memory and output boundary uses
/// the lon-first convention via [`LatLon::coord`] (`x = longitude`,
/// `y = latitude`).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LatLon {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl LatLon {
    /// Convert to the engine's coordinate convention (`x = lon`, `y = lat`).
    #[must_use]
    pub const fn coord(self) -> Coord<f64> {
        Coord {
            x: self.lon,
            y: self.lat,
        }
    }
}

/// Bounding box of a feature, used only as a fallback centre source.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BoundingBox {
    /// Southern latitude bound in degrees.
    #[serde(rename = "minlat")]
    pub south: f64,
    /// Western longitude bound in degrees.
    #[serde(rename = "minlon")]
    pub west: f64,
    /// Northern latitude bound in degrees.
    #[serde(rename = "maxlat")]
    pub north: f64,
    /// Eastern longitude bound in degrees.
    #[serde(rename = "maxlon")]
    pub east: f64,
}

/// One member of a relation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Member {
    /// Kind of the referenced element.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Area role of the member, if any.
    #[serde(default)]
    pub role: MemberRole,
    /// Resolved point sequence of the member, when the supplier provides it.
    #[serde(default)]
    pub geometry: Vec<LatLon>,
}

/// One raw feature record from the mapping data supplier.
///
/// All location fields are optional; which of them are populated depends on
/// the element kind and on the supplier's output mode. The engine derives a
/// representative centre and a render-ready geometry from whatever is
/// present.
///
/// # Examples
/// ```
/// use sentier_core::FeatureRecord;
///
/// let record: FeatureRecord = serde_json::from_str(
///     r#"{"type": "node", "id": 7, "lat": 46.5, "lon": 3.0, "tags": {"name": "Puy de Sancy"}}"#,
/// )
/// .unwrap();
/// assert_eq!(record.id, 7);
/// assert_eq!(record.name(), Some("Puy de Sancy"));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeatureRecord {
    /// Element kind of the record.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Supplier-assigned identifier.
    pub id: i64,
    /// Direct latitude, present on nodes.
    #[serde(default)]
    pub lat: Option<f64>,
    /// Direct longitude, present on nodes.
    #[serde(default)]
    pub lon: Option<f64>,
    /// Supplier-computed centre point, when requested upstream.
    #[serde(default)]
    pub center: Option<LatLon>,
    /// Bounding box of the feature's own geometry.
    #[serde(default)]
    pub bounds: Option<BoundingBox>,
    /// Ordered point sequence, present on ways.
    #[serde(default)]
    pub geometry: Option<Vec<LatLon>>,
    /// Key/value tags.
    #[serde(default)]
    pub tags: Tags,
    /// Relation members; empty for nodes and ways.
    #[serde(default)]
    pub members: Vec<Member>,
}

impl FeatureRecord {
    /// Construct a node record with a direct coordinate.
    #[must_use]
    pub fn node(id: i64, lat: f64, lon: f64) -> Self {
        Self {
            lat: Some(lat),
            lon: Some(lon),
            ..Self::empty(ElementKind::Node, id)
        }
    }

    /// Construct a way record from its point sequence.
    #[must_use]
    pub fn way(id: i64, geometry: Vec<LatLon>) -> Self {
        Self {
            geometry: Some(geometry),
            ..Self::empty(ElementKind::Way, id)
        }
    }

    /// Construct a relation record from its members.
    #[must_use]
    pub fn relation(id: i64, members: Vec<Member>) -> Self {
        Self {
            members,
            ..Self::empty(ElementKind::Relation, id)
        }
    }

    /// Attach a single tag, consuming and returning the record.
    #[must_use]
    pub fn with_tag(mut self, key: &str, value: &str) -> Self {
        self.tags.insert(key.to_owned(), value.to_owned());
        self
    }

    /// The feature's `name` tag, if present.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.tags.get("name").map(String::as_str)
    }

    fn empty(kind: ElementKind, id: i64) -> Self {
        Self {
            kind,
            id,
            lat: None,
            lon: None,
            center: None,
            bounds: None,
            geometry: None,
            tags: Tags::new(),
            members: Vec::new(),
        }
    }
}
