//! Root of the dashboard dataset

use super::{ExecSummary, RadialGraph, SchoolRow, ThemeStats};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical theme order used for matrix columns and the coverage summary
pub const DEFAULT_THEMES: [&str; 7] = [
    "Infrastructure & Facilities",
    "Academic Quality & Curriculum",
    "Parent–Teacher Communication",
    "Student Experience & Wellbeing",
    "Teacher Quality & Stability",
    "School Leadership & Community",
    "Resources & Capacity",
];

/// The precomputed dashboard document, treated as read-only
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// KPIs and narrative insights
    #[serde(default)]
    pub exec_summary: Option<ExecSummary>,
    /// Aggregates keyed by theme name
    #[serde(default)]
    pub themes: BTreeMap<String, ThemeStats>,
    /// Graph for the radial view
    #[serde(default)]
    pub radial_graph: RadialGraph,
    /// One row per school
    #[serde(default)]
    pub matrix: Vec<SchoolRow>,
}

impl Dataset {
    /// Parse a dataset from JSON text
    ///
    /// # Errors
    /// Returns the JSON error when the document does not match the schema
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Aggregates for a theme
    #[must_use]
    pub fn theme(&self, name: &str) -> Option<&ThemeStats> {
        self.themes.get(name)
    }

    /// Number of schools in the matrix
    #[must_use]
    pub fn school_count(&self) -> usize {
        self.matrix.len()
    }

    /// Find a school row by name (case-insensitive)
    #[must_use]
    pub fn school(&self, name: &str) -> Option<&SchoolRow> {
        self.matrix
            .iter()
            .find(|row| row.name.eq_ignore_ascii_case(name.trim()))
    }
}

/// Resolve the theme column order: the configured list, or the canonical seven
#[must_use]
pub fn theme_order(configured: &[String]) -> Vec<String> {
    if configured.is_empty() {
        DEFAULT_THEMES.iter().map(|t| (*t).to_string()).collect()
    } else {
        configured.to_vec()
    }
}
