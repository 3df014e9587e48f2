//! Geometry reconstruction for crowd-sourced feature records.
//!
//! This crate turns fragmentary feature descriptions (nodes, ways, and
//! relations with roled members) into valid, simplified, render-ready
//! geometry. The stages, leaf-first:
//!
//! - [`resolve_center`] derives a representative coordinate from whatever
//!   partial location data is present;
//! - [`simplify`] reduces polylines with Douglas–Peucker;
//! - [`rings`] splices disconnected fragments into paths and closed rings;
//! - [`to_geometry`] dispatches on element kind and tags to synthesize one
//!   output geometry per feature;
//! - [`project`] detects French-grid (Lambert-93) pairs and converts them
//!   to geographic degrees, failing open;
//! - [`geometry_area_m2`] and [`should_include`] apply planar-corrected
//!   area and per-category inclusion rules;
//! - [`process_batch`] wires the stages together for one category batch.
//!
//! Everything is synchronous, in-memory, and deterministic; there is no
//! I/O anywhere in this crate.

#![forbid(unsafe_code)]

pub mod area;
pub mod center;
pub mod filter;
pub mod pipeline;
pub mod project;
pub mod rings;
pub mod simplify;
pub mod synthesize;

pub use area::{geometry_area_m2, polygon_area_m2};
pub use center::resolve_center;
pub use filter::{CategoryRule, FilterConfig, should_include};
pub use pipeline::process_batch;
pub use project::{is_projected, normalize_coord, normalize_geometry, to_geographic};
pub use rings::{assemble_rings, close_ring, is_closed, splice_chains};
pub use simplify::{AREA_TOLERANCE, ROUTE_TOLERANCE, Tolerance, ToleranceError, simplify};
pub use synthesize::{GeometryError, build_geometry, to_geometry};
