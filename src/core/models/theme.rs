//! Per-theme aggregate model

use super::score_to_percent;
use serde::{Deserialize, Serialize};

/// Comment counts by coarse sentiment
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SentimentCounts {
    /// Positive comments (including very positive)
    #[serde(default)]
    pub positive: u64,
    /// Neutral comments
    #[serde(default)]
    pub neutral: u64,
    /// Negative comments (including very negative)
    #[serde(default)]
    pub negative: u64,
}

impl SentimentCounts {
    /// Sum of all three buckets
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.positive + self.neutral + self.negative
    }

    /// Negative share in percent, 0 when there are no comments
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn negative_share(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.negative as f64 / total as f64 * 100.0
        }
    }
}

/// Aggregate statistics for one theme across all schools
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeStats {
    /// Number of comments tagged with the theme
    #[serde(default)]
    pub volume: u64,
    /// Number of schools with at least one comment on the theme
    #[serde(default)]
    pub school_count: u64,
    /// Comment counts by sentiment
    #[serde(default)]
    pub sentiment_breakdown: SentimentCounts,
    /// Mean sentiment on the -2..+2 scale
    #[serde(default)]
    pub score: f64,
    /// Net score in percent, when provided precomputed
    #[serde(default)]
    pub score_pct: Option<f64>,
    /// Sentiment bucket label for the mean score
    #[serde(default)]
    pub bucket: String,
    /// Frequent phrases in the theme's negative comments
    #[serde(default)]
    pub neg_phrases: Vec<String>,
}

impl ThemeStats {
    /// Net score in percent, derived from `score` when not provided
    #[must_use]
    pub fn score_pct(&self) -> f64 {
        self.score_pct.unwrap_or_else(|| score_to_percent(self.score))
    }
}
