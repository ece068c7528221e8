//! Sortable school × theme matrix with a coverage summary and per-cell details

pub mod detail;
pub mod sort;
pub mod state;

pub use detail::{CellData, CellDetail, OverallDetail, Quote, Quotes};
pub use sort::{compare_rows, sort_rows, SortColumn, SortDirection, SortState};
pub use state::{Key, MatrixState, Modal};

use crate::core::models::{Dataset, SchoolRow};
use crate::core::sentiment::{encode_uri_component, score_fill, signed_percent, Bucket, OverallBand};

/// Placeholder for a missing city
pub const NO_CITY: &str = "—";

/// One column header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Sort target of the header
    pub sort: SortColumn,
    /// Header text
    pub label: String,
    /// CSS width
    pub width: &'static str,
    /// ▲ / ▼ on the active column
    pub marker: Option<&'static str>,
}

/// One line of the coverage summary
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageRow {
    /// 1-based position
    pub index: usize,
    /// Theme name
    pub theme: String,
    /// Bar width in percent
    pub width: f64,
    /// Fill class from the theme's mean score
    pub fill: &'static str,
    /// `"{count} / {total}"`
    pub label: String,
}

/// One rendered cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixCell {
    /// `cell-{row}-{col}`
    pub id: String,
    /// Sentiment class
    pub bucket: Bucket,
    /// Hover title
    pub title: String,
    /// Modal content
    pub detail: CellDetail,
}

/// One rendered school row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow {
    /// 1-based position in display order
    pub rank: usize,
    /// School name
    pub name: String,
    /// Link to the school's PDF report
    pub report_href: String,
    /// City, or [`NO_CITY`]
    pub city: String,
    /// Overall badge text
    pub overall_label: String,
    /// Overall badge background
    pub overall_bg: &'static str,
    /// Overall badge text color
    pub overall_fg: &'static str,
    /// Cells in theme order
    pub cells: Vec<MatrixCell>,
    /// All-themes modal content
    pub overall: OverallDetail,
}

/// The matrix tab, ready to render
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixView {
    /// Theme columns in order
    pub themes: Vec<String>,
    /// Active sort
    pub sort: SortState,
    /// Header cells
    pub columns: Vec<Column>,
    /// Coverage summary lines
    pub coverage: Vec<CoverageRow>,
    /// Rows in display order
    pub rows: Vec<MatrixRow>,
}

impl MatrixView {
    /// Sort the schools and build every row, cell and detail
    #[must_use]
    pub fn build(data: &Dataset, themes: &[String], sort: &SortState, school_reports: &str) -> Self {
        let mut schools: Vec<&SchoolRow> = data.matrix.iter().collect();
        sort_rows(&mut schools, sort);

        let rows = schools
            .iter()
            .enumerate()
            .map(|(r, school)| build_row(r, school, themes, school_reports))
            .collect();

        Self {
            themes: themes.to_vec(),
            sort: sort.clone(),
            columns: columns(themes, sort),
            coverage: coverage(data, themes),
            rows,
        }
    }

    /// Row count
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Theme column count
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.themes.len()
    }

    /// Cell at a position
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&MatrixCell> {
        self.rows.get(row).and_then(|r| r.cells.get(col))
    }

    /// Modal title for the current state, `None` when closed
    #[must_use]
    pub fn modal_title(&self, state: &MatrixState) -> Option<String> {
        match state.modal()? {
            Modal::Cell { row, col } => self.cell(row, col).map(|c| c.detail.title()),
            Modal::Overall { row } => self.rows.get(row).map(|r| r.overall.title()),
        }
    }
}

fn columns(themes: &[String], sort: &SortState) -> Vec<Column> {
    let fixed = [
        (SortColumn::Name, "# School", "260px"),
        (SortColumn::City, "City/Country", "180px"),
        (SortColumn::Overall, "Overall Score", "180px"),
    ];
    fixed
        .into_iter()
        .map(|(col, label, width)| (col, label.to_string(), width))
        .chain(
            themes
                .iter()
                .map(|t| (SortColumn::Theme(t.clone()), t.clone(), "110px")),
        )
        .map(|(col, label, width)| Column {
            marker: sort.marker_for(&col),
            sort: col,
            label,
            width,
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn coverage(data: &Dataset, themes: &[String]) -> Vec<CoverageRow> {
    let total = data.school_count();
    themes
        .iter()
        .filter_map(|name| data.theme(name).map(|stats| (name, stats)))
        .enumerate()
        .map(|(i, (name, stats))| CoverageRow {
            index: i + 1,
            theme: name.clone(),
            width: if total == 0 {
                0.0
            } else {
                stats.school_count as f64 / total as f64 * 100.0
            },
            fill: score_fill(stats.score),
            label: format!("{} / {}", stats.school_count, total),
        })
        .collect()
}

fn build_row(index: usize, school: &SchoolRow, themes: &[String], school_reports: &str) -> MatrixRow {
    let overall = school.overall_percent();
    let (overall_bg, overall_fg) = OverallBand::from_percent(overall).colors();
    let cells = themes
        .iter()
        .enumerate()
        .map(|(c, theme)| {
            let cell = school.cell(theme);
            MatrixCell {
                id: format!("cell-{index}-{c}"),
                bucket: cell.map_or(Bucket::Missing, |cell| {
                    Bucket::classify_opt(cell.sentiment_bucket.as_deref())
                }),
                title: cell.map_or_else(
                    || "No Data".to_string(),
                    |cell| format!("Score: {}", signed_percent(cell.score_pct())),
                ),
                detail: CellDetail::build(school, theme),
            }
        })
        .collect();

    MatrixRow {
        rank: index + 1,
        name: school.name.clone(),
        report_href: format!("{school_reports}/{}.pdf", encode_uri_component(&school.name)),
        city: school
            .city
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(NO_CITY)
            .to_string(),
        overall_label: signed_percent(overall),
        overall_bg,
        overall_fg,
        cells,
        overall: OverallDetail::build(school, themes),
    }
}
