//! Inclusion rules applied after reconstruction.
//!
//! Rules are keyed by feature category and typically loaded from
//! configuration upstream. Evaluation is a pure function of its inputs, so
//! a feature that passes once always passes again.

use std::collections::HashMap;

use sentier_core::{FeatureRecord, Tags};
use serde::Deserialize;

/// Per-category inclusion rules.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FilterConfig {
    /// Rules keyed by category name. Categories without an entry only get
    /// the unconditional checks.
    #[serde(default)]
    pub categories: HashMap<String, CategoryRule>,
}

/// Thresholds a feature must meet within one category.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CategoryRule {
    /// Minimum planar-corrected area in square metres. Features whose
    /// geometry has no computable area are not filtered by this rule.
    #[serde(default)]
    pub min_area_m2: Option<f64>,
    /// Tag keys that must all be present on the feature.
    #[serde(default)]
    pub required_tags: Vec<String>,
}

/// Decide whether a reconstructed feature is kept.
///
/// Unconditional drops: missing or too-short (< 3 characters) name, and
/// support structures (generic buildings, administrative offices) that are
/// not the geographic feature itself. Category rules then add an optional
/// minimum area and required tags.
#[must_use]
pub fn should_include(
    record: &FeatureRecord,
    category: &str,
    area_m2: Option<f64>,
    config: &FilterConfig,
) -> bool {
    let Some(name) = record.name() else {
        return false;
    };
    if name.chars().count() < 3 {
        return false;
    }
    if is_support_structure(&record.tags) {
        return false;
    }
    let Some(rule) = config.categories.get(category) else {
        return true;
    };
    if let (Some(minimum), Some(area)) = (rule.min_area_m2, area_m2) {
        if area < minimum {
            return false;
        }
    }
    rule.required_tags
        .iter()
        .all(|key| record.tags.contains_key(key))
}

/// Generic buildings and administrative offices are support structures,
/// excluded regardless of category.
fn is_support_structure(tags: &Tags) -> bool {
    let generic_building = tags.get("building").is_some_and(|value| value == "yes");
    generic_building || tags.contains_key("office")
}
