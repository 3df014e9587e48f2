//! Processed features handed to downstream persistence.

use geojson::JsonObject;

use crate::feature::Tags;
use crate::geometry::OutputGeometry;

/// The unit of output for one reconstructed feature.
///
/// Created once per kept feature and never mutated; update and deletion
/// lifecycles belong to the persistence collaborator. `lat`/`lon` hold the
/// resolved representative centre, which exists independently of the full
/// geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedFeature {
    /// Supplier-assigned identifier of the source record.
    pub id: i64,
    /// Display name taken from the feature's tags.
    pub name: String,
    /// Category of the batch this feature was processed under.
    pub category: String,
    /// Latitude of the representative centre, in degrees.
    pub lat: f64,
    /// Longitude of the representative centre, in degrees.
    pub lon: f64,
    /// Reconstructed geometry.
    pub geometry: OutputGeometry,
    /// Tags carried over from the source record.
    pub tags: Tags,
}

impl ProcessedFeature {
    /// Textual point representation of the resolved centre, for systems
    /// that index only a representative location.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use sentier_core::{OutputGeometry, ProcessedFeature, Tags};
    ///
    /// let feature = ProcessedFeature {
    ///     id: 1,
    ///     name: "Lac Vert".into(),
    ///     category: "lake".into(),
    ///     lat: 45.5,
    ///     lon: 6.25,
    ///     geometry: OutputGeometry::Point(Coord { x: 6.25, y: 45.5 }),
    ///     tags: Tags::new(),
    /// };
    /// assert_eq!(feature.wkt_point(), "POINT(6.25 45.5)");
    /// ```
    #[must_use]
    pub fn wkt_point(&self) -> String {
        format!("POINT({} {})", self.lon, self.lat)
    }

    /// Serialize to an exchange-format feature with `name`, `category`, and
    /// the source tags as properties.
    #[must_use]
    pub fn to_geojson_feature(&self) -> geojson::Feature {
        let mut properties = JsonObject::new();
        properties.insert("name".to_owned(), self.name.clone().into());
        properties.insert("category".to_owned(), self.category.clone().into());
        let tags: JsonObject = self
            .tags
            .iter()
            .map(|(key, value)| (key.clone(), value.clone().into()))
            .collect();
        properties.insert("tags".to_owned(), tags.into());

        geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::from(&self.geometry)),
            id: Some(geojson::feature::Id::Number(self.id.into())),
            properties: Some(properties),
            foreign_members: None,
        }
    }
}
