//! Narrative view: KPI cards, insight callouts, theme bars and negative drivers

use crate::core::models::Dataset;
use crate::core::sentiment::{
    clean_quote, format_number, group_thousands, round_half_up, signed_rounded_percent,
};

/// Bar color for themes with a negative net score
pub const NEGATIVE_BAR: &str = "#ef4444";
/// Bar color for themes with a zero or positive net score
pub const POSITIVE_BAR: &str = "#10b981";

/// Formatted headline numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiCards {
    /// Total comments with digit grouping
    pub total: String,
    /// Rounded net score, e.g. `18%`
    pub net_score: String,
    /// Negative share, e.g. `21.4%`
    pub risk: String,
}

/// A quote highlighted in the narrative
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callout {
    /// Quote text wrapped in double quotes
    pub text: String,
    /// School name
    pub school: String,
    /// City or country
    pub city: String,
}

/// One row of the theme bar list
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeBar {
    /// Theme name
    pub name: String,
    /// Net score in percent
    pub score_pct: f64,
    /// Rounded signed label, e.g. `+12%`
    pub label: String,
    /// Bar width in percent of the track (0..=100)
    pub width: f64,
    /// Bar color
    pub color: &'static str,
    /// Share of negative comments in percent
    pub negative_share: f64,
}

/// One bar of the negative-driver chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverBar {
    /// Recurring phrase
    pub phrase: String,
    /// Number of negative comments containing it
    pub count: u64,
    /// Example comment
    pub context: String,
}

impl DriverBar {
    /// Tooltip text shown on hover
    #[must_use]
    pub fn tooltip(&self) -> String {
        format!(" {} citations", self.count)
    }
}

/// Everything the narrative tab shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoryView {
    /// Headline numbers; `None` without an executive summary
    pub kpis: Option<KpiCards>,
    /// Negative share of the teacher stability topic
    pub stability_stat: Option<String>,
    /// Negative share of the resources topic
    pub resources_stat: Option<String>,
    /// Stability example quote
    pub stability_quote: Option<Callout>,
    /// Theme bars, weakest first
    pub theme_bars: Vec<ThemeBar>,
    /// Negative drivers, in dataset order
    pub drivers: Vec<DriverBar>,
}

impl StoryView {
    /// Build the narrative view from the dataset
    #[must_use]
    pub fn build(data: &Dataset) -> Self {
        let mut view = Self {
            theme_bars: theme_bars(data),
            ..Self::default()
        };

        let Some(summary) = &data.exec_summary else {
            return view;
        };

        let kpi = &summary.kpi;
        view.kpis = Some(KpiCards {
            total: group_thousands(kpi.total),
            net_score: format!("{}%", format_number(round_half_up(kpi.net_score_pct()))),
            risk: format!("{}%", format_number(kpi.neg_pct)),
        });

        if let Some(insights) = &summary.insights {
            if let Some(stability) = &insights.stability {
                view.stability_stat =
                    Some(format!("{}%", format_number(stability.neg_pct_of_topic)));
                view.stability_quote = stability.example_verbatim.as_ref().map(|v| Callout {
                    text: format!("\"{}\"", clean_quote(&v.text)),
                    school: v.school.clone(),
                    city: v.city.clone(),
                });
            }
            view.resources_stat = insights
                .resources
                .as_ref()
                .map(|r| r.neg_pct_of_topic)
                .or_else(|| insights.value.as_ref().map(|v| v.facilities_overlap_pct))
                .map(|pct| format!("{}%", format_number(pct)));
            view.drivers = insights
                .drivers
                .iter()
                .map(|d| DriverBar {
                    phrase: d.phrase.clone(),
                    count: d.count,
                    context: d.context.clone(),
                })
                .collect();
        }

        view
    }
}

/// Largest driver count, used to scale the chart
#[must_use]
pub fn max_driver_count(drivers: &[DriverBar]) -> u64 {
    drivers.iter().map(|d| d.count).max().unwrap_or(0)
}

/// Theme bars sorted ascending by net score
fn theme_bars(data: &Dataset) -> Vec<ThemeBar> {
    let mut bars: Vec<ThemeBar> = data
        .themes
        .iter()
        .map(|(name, stats)| {
            let score_pct = stats.score_pct();
            ThemeBar {
                name: name.clone(),
                score_pct,
                label: signed_rounded_percent(score_pct),
                width: score_pct.abs().min(100.0),
                color: if score_pct < 0.0 {
                    NEGATIVE_BAR
                } else {
                    POSITIVE_BAR
                },
                negative_share: stats.sentiment_breakdown.negative_share(),
            }
        })
        .collect();
    bars.sort_by(|a, b| a.score_pct.total_cmp(&b.score_pct));
    bars
}
