//! Domain model for the Sentier geometry reconstruction engine.
//!
//! This crate defines the records the engine consumes
//! ([`FeatureRecord`] and friends), the geometry it produces
//! ([`OutputGeometry`]), and the processed unit handed to persistence
//! ([`ProcessedFeature`]), together with serialization to the geographic
//! exchange format. The reconstruction algorithms themselves live in
//! `sentier-geometry`.

#![forbid(unsafe_code)]

pub mod feature;
pub mod geometry;
pub mod processed;

pub use feature::{BoundingBox, ElementKind, FeatureRecord, LatLon, Member, MemberRole, Tags};
pub use geometry::OutputGeometry;
pub use processed::ProcessedFeature;
