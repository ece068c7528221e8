//! School row model for the matrix view

use super::{round1, score_to_percent};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single survey quote attached to a matrix cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verbatim {
    /// Quote text as recorded upstream (may carry stray quote marks)
    #[serde(default)]
    pub text: String,
    /// Sentiment label of the quote
    #[serde(default)]
    pub bucket: String,
    /// Sentiment score of the quote on the -2..+2 scale
    #[serde(default)]
    pub score: Option<f64>,
}

/// Per-cell comment counts (short keys, as emitted upstream)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Breakdown {
    /// Positive comments
    #[serde(default)]
    pub pos: u64,
    /// Neutral comments
    #[serde(default)]
    pub neu: u64,
    /// Negative comments
    #[serde(default)]
    pub neg: u64,
}

/// Sentiment for one school on one theme
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeCell {
    /// Number of comments
    #[serde(default)]
    pub count: u64,
    /// Mean sentiment on the -2..+2 scale
    #[serde(default)]
    pub avg_sentiment: Option<f64>,
    /// Net score in percent, when provided precomputed
    #[serde(default)]
    pub sentiment_pct: Option<f64>,
    /// Sentiment bucket label of the mean
    #[serde(default)]
    pub sentiment_bucket: Option<String>,
    /// Comment counts by sentiment
    #[serde(default)]
    pub sentiment_breakdown: Option<Breakdown>,
    /// JSON-encoded array of [`Verbatim`] records
    #[serde(default)]
    pub example_verbatims: Option<String>,
}

impl ThemeCell {
    /// Net score in percent: `sentiment_pct`, else the mean rescaled to one decimal, else 0
    #[must_use]
    pub fn score_pct(&self) -> f64 {
        self.sentiment_pct
            .or_else(|| self.avg_sentiment.map(|avg| round1(score_to_percent(avg))))
            .unwrap_or(0.0)
    }

    /// Bucket label, empty when absent
    #[must_use]
    pub fn bucket_label(&self) -> &str {
        self.sentiment_bucket.as_deref().unwrap_or("")
    }

    /// Counts by sentiment, zeros when absent
    #[must_use]
    pub fn breakdown(&self) -> Breakdown {
        self.sentiment_breakdown.unwrap_or_default()
    }

    /// Decode the embedded verbatim list
    ///
    /// # Errors
    /// Returns the JSON error when the payload is not an array of quotes
    pub fn verbatims(&self) -> Result<Vec<Verbatim>, serde_json::Error> {
        match self.example_verbatims.as_deref() {
            None => Ok(Vec::new()),
            Some(raw) if raw.trim().is_empty() => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(raw),
        }
    }
}

/// One school's row of the matrix
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchoolRow {
    /// School name
    pub name: String,
    /// City or country
    #[serde(default)]
    pub city: Option<String>,
    /// Number of comments for the school
    #[serde(default)]
    pub count: u64,
    /// Cells keyed by theme name; `None` means no comments on that theme
    #[serde(default)]
    pub themes: HashMap<String, Option<ThemeCell>>,
    /// Mean of the per-theme scores (missing themes count as 0)
    #[serde(default)]
    pub overall_raw: Option<f64>,
    /// `overall_raw` in percent
    #[serde(default)]
    pub overall_percent: Option<f64>,
}

impl SchoolRow {
    /// The cell for a theme, if the school has comments on it
    #[must_use]
    pub fn cell(&self, theme: &str) -> Option<&ThemeCell> {
        self.themes.get(theme).and_then(Option::as_ref)
    }

    /// City, empty when absent
    #[must_use]
    pub fn city(&self) -> &str {
        self.city.as_deref().unwrap_or("")
    }

    /// Overall score in percent, 0 when absent
    #[must_use]
    pub fn overall_percent(&self) -> f64 {
        self.overall_percent.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell_with(payload: &str) -> ThemeCell {
        ThemeCell {
            example_verbatims: Some(payload.to_string()),
            ..ThemeCell::default()
        }
    }

    #[test]
    fn score_pct_rounds_rescaled_mean() {
        let cell = ThemeCell {
            avg_sentiment: Some(0.333),
            ..ThemeCell::default()
        };
        assert!((cell.score_pct() - 16.7).abs() < 1e-9);
        assert!(ThemeCell::default().score_pct().abs() < f64::EPSILON);
    }

    #[test]
    fn verbatims_decode_embedded_json() {
        let cell = cell_with(r#"[{"text": "\"Great staff\"", "bucket": "Positive", "score": 1.0}]"#);
        let quotes = cell.verbatims().expect("valid payload");
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].bucket, "Positive");
    }

    #[test]
    fn verbatims_reject_malformed_payload() {
        assert!(cell_with("not json").verbatims().is_err());
        assert!(cell_with("  ").verbatims().expect("blank").is_empty());
        assert!(ThemeCell::default().verbatims().expect("absent").is_empty());
    }

    #[test]
    fn null_theme_entries_are_missing_cells() {
        let row: SchoolRow = serde_json::from_str(
            r#"{"name": "Alpha", "themes": {"Resources & Capacity": null}}"#,
        )
        .expect("row parses");
        assert!(row.cell("Resources & Capacity").is_none());
        assert_eq!(row.city(), "");
        assert!(row.overall_percent().abs() < f64::EPSILON);
    }
}
