//! Facade crate for the Sentier geometry reconstruction engine.
//!
//! Re-exports the domain model from `sentier-core` and the reconstruction
//! pipeline from `sentier-geometry`. The engine is a pure library: the
//! ingestion batch job feeds it feature records and persists the processed
//! features it returns.

#![forbid(unsafe_code)]

pub use sentier_core::{
    BoundingBox, ElementKind, FeatureRecord, LatLon, Member, MemberRole, OutputGeometry,
    ProcessedFeature, Tags,
};
pub use sentier_geometry::{
    AREA_TOLERANCE, CategoryRule, FilterConfig, GeometryError, ROUTE_TOLERANCE, Tolerance,
    ToleranceError, geometry_area_m2, is_projected, process_batch, resolve_center, should_include,
    simplify, to_geographic, to_geometry,
};
