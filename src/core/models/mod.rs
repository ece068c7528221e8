//! Data models for the dashboard dataset

pub mod dataset;
pub mod graph;
pub mod school;
pub mod summary;
pub mod theme;

pub use dataset::{theme_order, Dataset, DEFAULT_THEMES};
pub use graph::{Link, Node, NodeGroup, RadialGraph};
pub use school::{Breakdown, SchoolRow, ThemeCell, Verbatim};
pub use summary::{Driver, ExampleVerbatim, ExecSummary, Insights, Kpi, TopicInsight};
pub use theme::{SentimentCounts, ThemeStats};

/// Convert a mean score on the upstream -2..+2 scale to a percentage
#[must_use]
pub fn score_to_percent(score: f64) -> f64 {
    score / 2.0 * 100.0
}

/// Round to one decimal place
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
