//! Executive summary model (KPIs and narrative insights)

use super::score_to_percent;
use serde::{Deserialize, Serialize};

/// Headline numbers for the narrative view
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Kpi {
    /// Total number of survey comments
    #[serde(default)]
    pub total: u64,
    /// Net sentiment as a percentage, when provided precomputed
    #[serde(default)]
    pub net_score: Option<f64>,
    /// Mean sentiment on the -2..+2 scale
    #[serde(default)]
    pub score: Option<f64>,
    /// Share of negative comments, in percent
    #[serde(default)]
    pub neg_pct: f64,
}

impl Kpi {
    /// Net score in percent: `net_score`, else `score` rescaled, else 0
    #[must_use]
    pub fn net_score_pct(&self) -> f64 {
        self.net_score
            .or_else(|| self.score.map(score_to_percent))
            .unwrap_or(0.0)
    }
}

/// A quoted comment attributed to a school
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExampleVerbatim {
    /// Comment text
    #[serde(default)]
    pub text: String,
    /// School the comment came from
    #[serde(default)]
    pub school: String,
    /// City or country of the school
    #[serde(default)]
    pub city: String,
}

/// Insight about a single topic
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopicInsight {
    /// Share of the topic's comments that are negative, in percent
    #[serde(default)]
    pub neg_pct_of_topic: f64,
    /// Share of negative comments mentioning staff turnover, in percent
    #[serde(default)]
    pub turnover_mention_pct: Option<f64>,
    /// Representative quote
    #[serde(default)]
    pub example_verbatim: Option<ExampleVerbatim>,
}

/// Communication insight
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommunicationInsight {
    /// Mean sentiment on the -2..+2 scale
    #[serde(default)]
    pub score: f64,
    /// Negative comments mentioning response times
    #[serde(default)]
    pub response_issue_count: u64,
}

/// Value-for-money insight
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValueInsight {
    /// Share of value comments that also mention facilities, in percent
    #[serde(default)]
    pub facilities_overlap_pct: f64,
}

/// A phrase that recurs in negative comments
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Driver {
    /// The phrase
    #[serde(default)]
    pub phrase: String,
    /// Example comment containing the phrase
    #[serde(default)]
    pub context: String,
    /// Number of negative comments containing the phrase
    #[serde(default)]
    pub count: u64,
}

/// Narrative insights
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Insights {
    /// Teacher stability insight
    #[serde(default)]
    pub stability: Option<TopicInsight>,
    /// Resources insight
    #[serde(default)]
    pub resources: Option<TopicInsight>,
    /// Communication insight
    #[serde(default)]
    pub communication: Option<CommunicationInsight>,
    /// Value-for-money insight
    #[serde(default)]
    pub value: Option<ValueInsight>,
    /// Top negative drivers, in display order
    #[serde(default)]
    pub drivers: Vec<Driver>,
}

/// Root of the narrative section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecSummary {
    /// Headline numbers
    #[serde(default)]
    pub kpi: Kpi,
    /// Narrative insights
    #[serde(default)]
    pub insights: Option<Insights>,
}
