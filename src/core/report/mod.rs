//! Dashboard generation
//!
//! Gathers the narrative, radial and matrix views of a dataset into one
//! [`DashboardContext`] and renders it through a [`ReportGenerator`]
//! (self-contained HTML or Markdown).

pub mod formats;
pub mod visualization;

use crate::core::matrix::{MatrixView, SortState};
use crate::core::models::{theme_order, Dataset};
use crate::core::radial::RadialLayout;
use crate::core::story::StoryView;
use std::error::Error;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};
pub use visualization::DriverChart;

/// Width of the driver chart in pixels
pub const DRIVER_CHART_WIDTH: f64 = 560.0;

/// Dashboard tab
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    /// Narrative summary
    #[default]
    Story,
    /// Radial diagram
    Connect,
    /// Matrix table
    Matrix,
}

impl Tab {
    /// Section id in the HTML page
    #[must_use]
    pub const fn section_id(self) -> &'static str {
        match self {
            Self::Story => "view-story",
            Self::Connect => "view-connect",
            Self::Matrix => "view-matrix",
        }
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "story" | "view-story" => Ok(Self::Story),
            "connect" | "radial" | "view-connect" => Ok(Self::Connect),
            "matrix" | "view-matrix" => Ok(Self::Matrix),
            _ => Err(format!("Unknown tab: {s}")),
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Story => write!(f, "story"),
            Self::Connect => write!(f, "connect"),
            Self::Matrix => write!(f, "matrix"),
        }
    }
}

/// Rendering choices that do not come from the dataset
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Label of the data source shown in the page footer
    pub source: String,
    /// Radial canvas width
    pub width: u32,
    /// Radial canvas height
    pub height: u32,
    /// Configured theme columns; empty means the canonical seven
    pub themes: Vec<String>,
    /// Matrix sort
    pub sort: SortState,
    /// Directory (or URL prefix) of the per-school PDF reports
    pub school_reports: String,
    /// Tab shown on load
    pub tab: Tab,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            source: String::new(),
            width: 960,
            height: 720,
            themes: Vec::new(),
            sort: SortState::default(),
            school_reports: "School_Reports".to_string(),
            tab: Tab::Story,
        }
    }
}

/// Everything a report needs, computed once from the dataset
#[derive(Debug, Clone)]
pub struct DashboardContext<'a> {
    /// The loaded dataset
    pub dataset: &'a Dataset,
    /// Data source label
    pub source: String,
    /// Narrative tab
    pub story: StoryView,
    /// Negative-driver bar chart
    pub drivers: DriverChart,
    /// Radial diagram geometry
    pub radial: RadialLayout,
    /// Sorted matrix with details
    pub matrix: MatrixView,
    /// Tab shown on load
    pub tab: Tab,
}

impl<'a> DashboardContext<'a> {
    /// Build every view of the dashboard
    #[must_use]
    pub fn build(dataset: &'a Dataset, options: &RenderOptions) -> Self {
        let themes = theme_order(&options.themes);
        let story = StoryView::build(dataset);
        let drivers = DriverChart::layout(&story.drivers, DRIVER_CHART_WIDTH);
        Self {
            dataset,
            source: options.source.clone(),
            drivers,
            story,
            radial: RadialLayout::compute(
                &dataset.radial_graph,
                f64::from(options.width),
                f64::from(options.height),
            ),
            matrix: MatrixView::build(dataset, &themes, &options.sort, &options.school_reports),
            tab: options.tab,
        }
    }

    /// Number of schools
    #[must_use]
    pub fn school_count(&self) -> usize {
        self.dataset.school_count()
    }

    /// Number of themes with aggregates
    #[must_use]
    pub fn theme_count(&self) -> usize {
        self.dataset.themes.len()
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &DashboardContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &DashboardContext) -> Result<String, Box<dyn Error>>;
}
