//! Label Set Model
//!
//! In-memory snapshot of one repository's labels

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single GitHub issue label
///
/// Names are case-sensitive and unique within a repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Label {
    /// Label name
    pub name: String,

    /// Label color (6-digit hexadecimal, without #)
    pub color: String,

    /// Label description
    pub description: Option<String>,
}

impl Label {
    /// Create a new label with a normalized color
    ///
    /// # Errors
    /// Returns an error if the name is empty or the color is not 6 hex digits
    pub fn new(name: impl Into<String>, color: &str) -> Result<Self> {
        let label = Self {
            name: name.into(),
            color: normalize_color(color),
            description: None,
        };

        label.validate()?;
        Ok(label)
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validate the label
    ///
    /// # Errors
    /// - If the name is empty
    /// - If the color is not a 6-digit hex code
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::label_validation("Label name cannot be empty"));
        }

        if !is_valid_hex_color(&normalize_color(&self.color)) {
            return Err(Error::InvalidLabelColor(self.color.clone()));
        }

        Ok(())
    }
}

/// Normalize a color code (strip leading # and lowercase)
pub fn normalize_color(color: &str) -> String {
    color.trim_start_matches('#').to_lowercase()
}

/// Validate a 6-digit hex color code (without #)
fn is_valid_hex_color(color: &str) -> bool {
    if color.len() != 6 {
        return false;
    }

    color.chars().all(|c| c.is_ascii_hexdigit())
}

/// Immutable snapshot of a repository's full label state
///
/// Backed by a sorted map so iteration order is deterministic, which keeps
/// diff plans and report output reproducible across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    labels: BTreeMap<String, Label>,
}

impl LabelSet {
    /// Create an empty label set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a label set from raw gateway records
    ///
    /// A well-behaved gateway never returns two labels with the same name,
    /// but the invariant is checked before any diffing happens.
    ///
    /// # Arguments
    /// - `labels`: Label records as returned by the gateway
    /// - `repository`: Repository the records came from, for error reporting
    ///
    /// # Errors
    /// Returns `DuplicateLabel` if two records share a name
    pub fn from_labels(labels: Vec<Label>, repository: &str) -> Result<Self> {
        let mut map = BTreeMap::new();

        for label in labels {
            let name = label.name.clone();
            if map.insert(name.clone(), label).is_some() {
                return Err(Error::DuplicateLabel {
                    name,
                    repository: repository.to_string(),
                });
            }
        }

        Ok(Self { labels: map })
    }

    /// Look up a label by name
    pub fn get(&self, name: &str) -> Option<&Label> {
        self.labels.get(name)
    }

    /// Whether a label with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.labels.contains_key(name)
    }

    /// Iterate over labels sorted by name
    pub fn iter(&self) -> btree_map::Values<'_, String, Label> {
        self.labels.values()
    }

    /// Number of labels in the set
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = &'a Label;
    type IntoIter = btree_map::Values<'a, String, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
