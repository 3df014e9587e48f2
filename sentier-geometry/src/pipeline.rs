//! Batch processing entry point.
//!
//! The ingestion job queries the supplier once per category and hands the
//! resulting records here. Each record flows through centre resolution,
//! geometry synthesis, coordinate normalization, and the area/inclusion
//! rules; failures are contained to the record that caused them.

use log::{debug, warn};
use sentier_core::{FeatureRecord, ProcessedFeature};

use crate::area::geometry_area_m2;
use crate::center::resolve_center;
use crate::filter::{FilterConfig, should_include};
use crate::project::{normalize_coord, normalize_geometry};
use crate::synthesize::to_geometry;

/// Process one batch of records under a single category.
///
/// Records with no resolvable centre or no usable geometry are skipped
/// with a warning; records failing the category's inclusion rules are
/// dropped quietly. Pure computation over the in-memory batch, fully
/// deterministic: the same inputs always produce the same outputs, and
/// callers may process independent batches in parallel.
///
/// # Examples
/// ```
/// use sentier_core::FeatureRecord;
/// use sentier_geometry::{FilterConfig, process_batch};
///
/// let records = vec![FeatureRecord::node(1, 45.0, 6.0).with_tag("name", "Lac Blanc")];
/// let processed = process_batch(&records, "lake", &FilterConfig::default());
/// assert_eq!(processed.len(), 1);
/// assert_eq!(processed[0].wkt_point(), "POINT(6 45)");
/// ```
#[must_use]
pub fn process_batch(
    records: &[FeatureRecord],
    category: &str,
    config: &FilterConfig,
) -> Vec<ProcessedFeature> {
    records
        .iter()
        .filter_map(|record| process_record(record, category, config))
        .collect()
}

fn process_record(
    record: &FeatureRecord,
    category: &str,
    config: &FilterConfig,
) -> Option<ProcessedFeature> {
    let Some(raw_centre) = resolve_center(record) else {
        warn!(
            "{:?} {} has no resolvable location, skipping",
            record.kind, record.id
        );
        return None;
    };
    let centre = normalize_coord(raw_centre);
    let geometry = normalize_geometry(&to_geometry(record)?);
    let area_m2 = geometry_area_m2(&geometry);
    if !should_include(record, category, area_m2, config) {
        debug!(
            "{:?} {} filtered out of category {category}",
            record.kind, record.id
        );
        return None;
    }
    Some(ProcessedFeature {
        id: record.id,
        name: record.name()?.to_owned(),
        category: category.to_owned(),
        lat: centre.y,
        lon: centre.x,
        geometry,
        tags: record.tags.clone(),
    })
}
