//! Modal contents: one school × theme cell, or all themes of a school

use crate::core::models::{Breakdown, SchoolRow, ThemeCell, Verbatim};
use crate::core::sentiment::{badge_tone, clean_quote, featured_background, quote_tone, signed_percent, Tone};

/// Shown when a school has no cell for the theme
pub const NO_THEME_FEEDBACK: &str = "No feedback recorded for this theme.";
/// Shown when a cell carries an empty quote list
pub const NO_VERBATIMS: &str = "No specific verbatims available.";
/// Shown when the embedded quote list cannot be decoded
pub const VERBATIM_ERROR: &str = "Error loading verbatims.";
/// Shown when a school has no quotes on any theme
pub const NO_SCHOOL_FEEDBACK: &str = "No feedback recorded for this school.";
/// Heading above the non-featured quotes
pub const SUPPORTING_HEADING: &str = "Supporting Context";

/// A cleaned quote ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// Quote text without stray quote marks
    pub text: String,
    /// Sentiment label
    pub bucket: String,
    /// Accent color
    pub tone: Tone,
    /// Theme the quote belongs to, in the all-themes view
    pub theme: Option<String>,
}

impl Quote {
    fn from_verbatim(v: &Verbatim, theme: Option<&str>) -> Self {
        Self {
            text: clean_quote(&v.text),
            bucket: v.bucket.clone(),
            tone: quote_tone(&v.bucket),
            theme: theme.map(str::to_string),
        }
    }

    /// Background of the box when this quote is featured
    #[must_use]
    pub fn featured_background(&self) -> &'static str {
        featured_background(&self.bucket)
    }
}

/// Quote section of a cell detail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Quotes {
    /// The payload could not be decoded
    Error,
    /// The payload decoded to an empty list
    Empty,
    /// First quote featured, the rest supporting
    List {
        /// Highlighted quote
        featured: Quote,
        /// Remaining quotes, in payload order
        supporting: Vec<Quote>,
    },
}

impl Quotes {
    fn from_cell(school: &str, theme: &str, cell: &ThemeCell) -> Self {
        match cell.verbatims() {
            Err(e) => {
                crate::debug!("Failed to decode verbatims of {school} / {theme}: {e}");
                Self::Error
            }
            Ok(list) => {
                let mut quotes = list.iter().map(|v| Quote::from_verbatim(v, None));
                match quotes.next() {
                    None => Self::Empty,
                    Some(featured) => Self::List {
                        featured,
                        supporting: quotes.collect(),
                    },
                }
            }
        }
    }

    /// Placeholder text for the non-list cases
    #[must_use]
    pub const fn message(&self) -> Option<&'static str> {
        match self {
            Self::Error => Some(VERBATIM_ERROR),
            Self::Empty => Some(NO_VERBATIMS),
            Self::List { .. } => None,
        }
    }

    /// The featured quote
    #[must_use]
    pub const fn featured(&self) -> Option<&Quote> {
        match self {
            Self::List { featured, .. } => Some(featured),
            _ => None,
        }
    }

    /// Quotes after the featured one
    #[must_use]
    pub fn supporting(&self) -> &[Quote] {
        match self {
            Self::List { supporting, .. } => supporting,
            _ => &[],
        }
    }
}

/// Figures and quotes for a cell that has data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellData {
    /// Signed score, e.g. `+35%`
    pub score: String,
    /// Bucket label
    pub bucket: String,
    /// Badge accent
    pub badge: Tone,
    /// Number of comments
    pub volume: u64,
    /// Positive comments
    pub positive: u64,
    /// Neutral comments
    pub neutral: u64,
    /// Negative comments
    pub negative: u64,
    /// Quote section
    pub quotes: Quotes,
}

/// Detail for one school × theme cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellDetail {
    /// School name
    pub school: String,
    /// Theme name
    pub theme: String,
    /// `None` when the school has no comments on the theme
    pub data: Option<CellData>,
}

impl CellDetail {
    /// Build the detail of `school` on `theme`
    #[must_use]
    pub fn build(school: &SchoolRow, theme: &str) -> Self {
        let data = school.cell(theme).map(|cell| {
            let Breakdown { pos, neu, neg } = cell.breakdown();
            CellData {
                score: signed_percent(cell.score_pct()),
                bucket: cell.bucket_label().to_string(),
                badge: badge_tone(cell.bucket_label()),
                volume: cell.count,
                positive: pos,
                neutral: neu,
                negative: neg,
                quotes: Quotes::from_cell(&school.name, theme, cell),
            }
        });
        Self {
            school: school.name.clone(),
            theme: theme.to_string(),
            data,
        }
    }

    /// Modal title
    #[must_use]
    pub fn title(&self) -> String {
        format!("{}: {}", self.school, self.theme)
    }

    /// Text shown instead of quotes, if any
    #[must_use]
    pub fn placeholder(&self) -> Option<&'static str> {
        self.data
            .as_ref()
            .map_or(Some(NO_THEME_FEEDBACK), |d| d.quotes.message())
    }
}

/// Every quote of one school across all themes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverallDetail {
    /// School name
    pub school: String,
    /// Quotes tagged with their theme, in theme order
    pub quotes: Vec<Quote>,
}

impl OverallDetail {
    /// Build the all-themes detail; undecodable payloads are skipped
    #[must_use]
    pub fn build(school: &SchoolRow, themes: &[String]) -> Self {
        let mut quotes = Vec::new();
        for theme in themes {
            let Some(cell) = school.cell(theme) else {
                continue;
            };
            match cell.verbatims() {
                Ok(list) => quotes.extend(list.iter().map(|v| Quote::from_verbatim(v, Some(theme)))),
                Err(e) => crate::debug!("Skipping verbatims of {} / {}: {}", school.name, theme, e),
            }
        }
        Self {
            school: school.name.clone(),
            quotes,
        }
    }

    /// Modal title
    #[must_use]
    pub fn title(&self) -> String {
        format!("{}: All Themes", self.school)
    }

    /// Section heading, or `None` when there is nothing to show
    #[must_use]
    pub fn heading(&self) -> Option<String> {
        (!self.quotes.is_empty())
            .then(|| format!("Consolidated Verbatims ({} quotes)", self.quotes.len()))
    }

    /// Text shown when the school has no quotes
    #[must_use]
    pub fn placeholder(&self) -> Option<&'static str> {
        self.quotes.is_empty().then_some(NO_SCHOOL_FEEDBACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn school(cells: &[(&str, Option<ThemeCell>)]) -> SchoolRow {
        SchoolRow {
            name: "Lakeside".to_string(),
            themes: cells
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
            ..SchoolRow::default()
        }
    }

    fn cell(payload: Option<&str>) -> ThemeCell {
        ThemeCell {
            count: 3,
            avg_sentiment: Some(0.7),
            sentiment_bucket: Some("Positive".to_string()),
            sentiment_breakdown: Some(Breakdown { pos: 2, neu: 1, neg: 0 }),
            example_verbatims: payload.map(str::to_string),
            ..ThemeCell::default()
        }
    }

    #[test]
    fn missing_cell_has_no_data() {
        let row = school(&[("Facilities", None)]);
        let detail = CellDetail::build(&row, "Facilities");
        assert!(detail.data.is_none());
        assert_eq!(detail.placeholder(), Some(NO_THEME_FEEDBACK));
        assert_eq!(detail.title(), "Lakeside: Facilities");
    }

    #[test]
    fn cell_figures_and_featured_quote() {
        let payload = r#"[{"text": "\"Bright rooms\"", "bucket": "Very Positive"},
                          {"text": "Old gym", "bucket": "Negative"}]"#;
        let row = school(&[("Facilities", Some(cell(Some(payload))))]);
        let data = CellDetail::build(&row, "Facilities").data.expect("has data");
        assert_eq!(data.score, "+35%");
        assert_eq!(data.badge, Tone::Positive);
        assert_eq!((data.positive, data.neutral, data.negative), (2, 1, 0));
        let Quotes::List { featured, supporting } = data.quotes else {
            panic!("expected quotes");
        };
        assert_eq!(featured.text, "Bright rooms");
        assert_eq!(featured.tone, Tone::VeryPositive);
        assert_eq!(featured.featured_background(), "#f0fdf4");
        assert_eq!(supporting.len(), 1);
        assert_eq!(supporting[0].tone, Tone::Negative);
    }

    #[test]
    fn empty_and_malformed_payloads() {
        let row = school(&[
            ("Empty", Some(cell(Some("[]")))),
            ("Broken", Some(cell(Some("{oops")))),
        ]);
        let empty = CellDetail::build(&row, "Empty").data.expect("data");
        assert_eq!(empty.quotes.message(), Some(NO_VERBATIMS));
        let broken = CellDetail::build(&row, "Broken").data.expect("data");
        assert_eq!(broken.quotes, Quotes::Error);
        assert_eq!(broken.quotes.message(), Some(VERBATIM_ERROR));
    }

    #[test]
    fn overall_detail_tags_quotes_and_skips_bad_payloads() {
        let row = school(&[
            ("A", Some(cell(Some(r#"[{"text": "one", "bucket": "Neutral"}]"#)))),
            ("B", Some(cell(Some("garbage")))),
            ("C", Some(cell(Some(r#"[{"text": "two"}, {"text": "three"}]"#)))),
            ("D", None),
        ]);
        let themes: Vec<String> = ["C", "A", "B", "D"].iter().map(|s| (*s).to_string()).collect();
        let detail = OverallDetail::build(&row, &themes);
        let tagged: Vec<(&str, &str)> = detail
            .quotes
            .iter()
            .map(|q| (q.theme.as_deref().unwrap_or(""), q.text.as_str()))
            .collect();
        assert_eq!(tagged, vec![("C", "two"), ("C", "three"), ("A", "one")]);
        assert_eq!(detail.heading().as_deref(), Some("Consolidated Verbatims (3 quotes)"));
    }

    #[test]
    fn overall_detail_without_quotes() {
        let row = school(&[("A", None)]);
        let detail = OverallDetail::build(&row, &["A".to_string()]);
        assert!(detail.heading().is_none());
        assert_eq!(detail.placeholder(), Some(NO_SCHOOL_FEEDBACK));
        assert_eq!(detail.title(), "Lakeside: All Themes");
    }
}
