//! Experimental options
//!
//! The `experimental` action input is a JSON object. Known keys are
//! validated strictly; unknown keys only warn so adding or removing an
//! experiment never breaks existing workflows.

use crate::error::ConfigError;
use crate::policy::ConflictResolution;
use log::warn;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Keys that used to be experiments and are no longer read
const DEPRECATED_KEYS: &[&str] = &["downstream_repo"];

/// Experimental configuration with defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Experimental {
    /// Conflict handling policy (default: fail)
    pub conflict_resolution: ConflictResolution,
}

#[derive(Debug, Deserialize)]
struct RawExperimental {
    conflict_resolution: Option<String>,
    #[serde(flatten)]
    rest: BTreeMap<String, serde_json::Value>,
}

impl Experimental {
    /// Parse the `experimental` input
    ///
    /// An empty input yields the defaults. Unknown keys produce a
    /// warning, deprecated keys a removal notice; only an invalid value
    /// for a known key is a fatal configuration error.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        if input.trim().is_empty() || input.trim() == "{}" {
            return Ok(Self::default());
        }

        let raw: RawExperimental = serde_json::from_str(input)
            .map_err(|e| ConfigError::InvalidExperimental(e.to_string()))?;

        for key in raw.rest.keys() {
            if DEPRECATED_KEYS.contains(&key.as_str()) {
                warn!(
                    "Encountered deprecated key '{}' in input 'experimental'. \
                     It is no longer used; remove it from your workflow.",
                    key
                );
            } else {
                warn!(
                    "Encountered unexpected key '{}' in input 'experimental'. \
                     No experimental option is known for it.",
                    key
                );
            }
        }

        let conflict_resolution = match raw.conflict_resolution {
            Some(value) => value.parse()?,
            None => ConflictResolution::default(),
        };

        Ok(Self {
            conflict_resolution,
        })
    }
}
