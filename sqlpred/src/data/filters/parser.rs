//! Filter parsing
//!
//! Parses JSON filter definitions into Filter values with validation.

use serde::{Deserialize, Serialize};

use crate::data::error::{FilterError, Result};

use super::types::Filter;

/// Maximum size of filter JSON in bytes (64KB)
pub const MAX_FILTER_JSON_SIZE: usize = 64 * 1024;

/// Maximum number of top-level filters allowed
pub const MAX_FILTERS: usize = 50;

/// Maximum nesting depth of filter groups
pub const MAX_FILTER_DEPTH: usize = 32;

/// Bounds applied to untrusted filter documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParseLimits {
    pub max_json_bytes: usize,
    pub max_filters: usize,
    pub max_depth: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_json_bytes: MAX_FILTER_JSON_SIZE,
            max_filters: MAX_FILTERS,
            max_depth: MAX_FILTER_DEPTH,
        }
    }
}

/// Parse filters from JSON
///
/// Accepts a single filter object or an array of filters. Validates JSON
/// size, filter count and nesting depth.
pub fn parse_filters(json_str: &str, limits: &ParseLimits) -> Result<Vec<Filter>> {
    if json_str.len() > limits.max_json_bytes {
        return Err(FilterError::JsonTooLarge {
            size: json_str.len(),
            max: limits.max_json_bytes,
        });
    }

    let document: serde_json::Value = serde_json::from_str(json_str)?;
    let filters: Vec<Filter> = if document.is_array() {
        serde_json::from_value(document)?
    } else {
        vec![serde_json::from_value(document)?]
    };

    if filters.len() > limits.max_filters {
        return Err(FilterError::TooManyFilters {
            count: filters.len(),
            max: limits.max_filters,
        });
    }

    for filter in &filters {
        let depth = filter.depth();
        if depth > limits.max_depth {
            return Err(FilterError::TooDeep {
                depth,
                max: limits.max_depth,
            });
        }
    }

    tracing::debug!(count = filters.len(), "Parsed filters");
    Ok(filters)
}
