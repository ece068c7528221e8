//! HTML dashboard generator
//!
//! Renders the `dashboard.html` askama template into a single self-contained
//! page: inline CSS, inline SVG charts, hidden detail blocks for the modal and
//! a small script for tabs, hover and keyboard navigation. Dataset text is
//! HTML-escaped by the template engine.

use crate::core::matrix::{Key, MatrixView};
use crate::core::radial::RadialLayout;
use crate::core::report::visualization::driver_chart::{
    AXIS_TITLE, BAR_FILL, BAR_HEIGHT, BAR_STROKE, LABEL_WIDTH,
};
use crate::core::report::visualization::DriverChart;
use crate::core::report::{DashboardContext, ReportGenerator};
use crate::core::story::StoryView;
use askama::Template;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Page title
pub const PAGE_TITLE: &str = "School Pulse Dashboard";

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardPage<'a> {
    title: &'a str,
    version: &'a str,
    source: &'a str,
    active: &'a str,
    story: &'a StoryView,
    chart: &'a DriverChart,
    label_width: f64,
    bar_height: f64,
    bar_fill: &'a str,
    bar_stroke: &'a str,
    axis_title: &'a str,
    radial: &'a RadialLayout,
    cx: f64,
    cy: f64,
    matrix: &'a MatrixView,
    key_moves: String,
    escape_key: &'a str,
}

/// Arrow-key step table for the inline script, keyed by `KeyboardEvent.key`
fn key_moves() -> String {
    let entries: Vec<String> = Key::ARROWS
        .iter()
        .map(|key| {
            let (row, col) = key.delta();
            format!("{}: [{row}, {col}]", key.dom_name())
        })
        .collect();
    format!("{{ {} }}", entries.join(", "))
}

/// HTML report generator with interactive views
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &DashboardContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &DashboardContext) -> Result<String, Box<dyn Error>> {
        let page = DashboardPage {
            title: PAGE_TITLE,
            version: env!("CARGO_PKG_VERSION"),
            source: &ctx.source,
            active: ctx.tab.section_id(),
            story: &ctx.story,
            chart: &ctx.drivers,
            label_width: LABEL_WIDTH,
            bar_height: BAR_HEIGHT,
            bar_fill: BAR_FILL,
            bar_stroke: BAR_STROKE,
            axis_title: AXIS_TITLE,
            radial: &ctx.radial,
            cx: ctx.radial.center.0,
            cy: ctx.radial.center.1,
            matrix: &ctx.matrix,
            key_moves: key_moves(),
            escape_key: Key::Escape.dom_name(),
        };
        Ok(page.render()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Dataset;
    use crate::core::report::{RenderOptions, Tab};

    const DATA: &str = r#"{
        "exec_summary": {
            "kpi": {"total": 4200, "net_score": 12.4, "neg_pct": 18.0},
            "insights": {"drivers": [{"phrase": "Class <size>", "context": "Too many", "count": 9}]}
        },
        "themes": {"Resources & Capacity": {"school_count": 1, "score": -0.4, "volume": 3}},
        "radial_graph": {
            "nodes": [{"id": "Resources & Capacity", "group": "theme"}, {"id": "Lakeside", "group": "school", "score": -0.3}],
            "links": [{"source": "Lakeside", "target": "Resources & Capacity", "value": 3, "sentiment": -0.4}]
        },
        "matrix": [{
            "name": "Lakeside", "city": "Oslo", "overall_percent": -20,
            "themes": {"Resources & Capacity": {
                "count": 3, "avg_sentiment": -0.4, "sentiment_bucket": "Negative",
                "example_verbatims": "[{\"text\": \"Not enough books\", \"bucket\": \"Negative\"}]"
            }}
        }]
    }"#;

    fn render(tab: Tab) -> String {
        let data = Dataset::from_json(DATA).expect("fixture parses");
        let options = RenderOptions {
            source: "fixture.json".to_string(),
            tab,
            ..RenderOptions::default()
        };
        let ctx = DashboardContext::build(&data, &options);
        HtmlReporter::new().render(&ctx).expect("renders")
    }

    #[test]
    fn page_has_tabs_and_modal() {
        let html = render(Tab::Story);
        for id in ["view-story", "view-connect", "view-matrix", "m-title", "m-close"] {
            assert!(html.contains(&format!("id=\"{id}\"")), "missing #{id}");
        }
        assert!(html.contains("class=\"modal-overlay\""));
        assert!(html.contains("class=\"modal-body\""));
        assert!(html.contains("id=\"view-story\" class=\"view-section active\""));
        assert!(html.contains("id=\"view-matrix\" class=\"view-section\""));
    }

    #[test]
    fn active_tab_follows_options() {
        let html = render(Tab::Matrix);
        assert!(html.contains("id=\"view-matrix\" class=\"view-section active\""));
    }

    #[test]
    fn story_and_matrix_content() {
        let html = render(Tab::Story);
        assert!(html.contains("4,200"));
        assert!(html.contains("12%"));
        assert!(html.contains("id=\"cell-0-6\""));
        assert!(html.contains("id=\"detail-0-6\""));
        assert!(html.contains("id=\"overall-0\""));
        assert!(html.contains("Not enough books"));
        assert!(html.contains("Consolidated Verbatims (1 quotes)"));
        assert!(html.contains("No feedback recorded for this theme."));
        assert!(html.contains(" 9 citations"));
    }

    #[test]
    fn script_reads_key_table() {
        let html = render(Tab::Story);
        assert!(html.contains(
            "var moves = { ArrowUp: [-1, 0], ArrowDown: [1, 0], ArrowLeft: [0, -1], ArrowRight: [0, 1] };"
        ));
        assert!(html.contains("if (e.key === 'Escape')"));
        assert!(html.contains("data-view=\"view-matrix\""));
    }

    #[test]
    fn dataset_text_is_escaped() {
        let html = render(Tab::Story);
        assert!(!html.contains("Class <size>"));
        assert!(html.contains("Class &lt;size&gt;"));
    }
}
