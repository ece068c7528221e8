//! Markdown report generator
//!
//! Generates a plain summary of the dashboard: KPIs, theme table, drivers,
//! coverage and the sorted matrix. Diagrams are left to the HTML output.

use crate::core::report::{DashboardContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/dashboard.md");

/// Markdown report generator
pub struct MarkdownReporter;

/// Escape characters that would break a table cell
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Replace each `{{name}}` in `template` with `value(name)`
///
/// Unknown names and an unterminated `{{` are copied through unchanged.
fn fill_placeholders(template: &str, value: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };
        let name = &after[..close];
        match value(name) {
            Some(text) => out.push_str(&text),
            None => out.push_str(&rest[open..open + close + 4]),
        }
        rest = &after[close + 2..];
    }
    out.push_str(rest);
    out
}

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    ///
    /// Placeholders are looked up in one pass over the template, so dataset
    /// text containing `{{...}}` is never expanded.
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &DashboardContext) -> String {
        fill_placeholders(MARKDOWN_TEMPLATE, |name| {
            Some(match name {
                "source" => ctx.source.clone(),
                "school_count" => ctx.school_count().to_string(),
                "theme_count" => ctx.theme_count().to_string(),
                "kpis" => Self::generate_kpis(ctx),
                "insights" => Self::generate_insights(ctx),
                "theme_table" => Self::generate_theme_table(ctx),
                "drivers" => Self::generate_drivers(ctx),
                "coverage" => Self::generate_coverage(ctx),
                "sort_column" => ctx.matrix.sort.column.key().to_string(),
                "sort_direction" => ctx.matrix.sort.direction.as_str().to_string(),
                "matrix" => Self::generate_matrix(ctx),
                "version" => env!("CARGO_PKG_VERSION").to_string(),
                _ => return None,
            })
        })
    }

    fn generate_kpis(ctx: &DashboardContext) -> String {
        ctx.story.kpis.as_ref().map_or_else(
            || "_No executive summary in this dataset._".to_string(),
            |k| {
                format!(
                    "| Total Comments | Net Sentiment | Negative Risk |\n|---|---|---|\n| {} | {} | {} |",
                    k.total, k.net_score, k.risk
                )
            },
        )
    }

    fn generate_insights(ctx: &DashboardContext) -> String {
        let mut out = String::new();
        if let Some(stat) = &ctx.story.stability_stat {
            let _ = writeln!(out, "- Teacher stability: **{stat}** of comments are negative.");
        }
        if let Some(stat) = &ctx.story.resources_stat {
            let _ = writeln!(out, "- Resources: **{stat}** of comments are negative.");
        }
        if let Some(quote) = &ctx.story.stability_quote {
            let _ = writeln!(out, "\n> {}\n> _{}, {}_", quote.text, quote.school, quote.city);
        }
        if out.is_empty() {
            out.push_str("_No insights in this dataset._");
        }
        out
    }

    fn generate_theme_table(ctx: &DashboardContext) -> String {
        if ctx.story.theme_bars.is_empty() {
            return "_No theme aggregates._".to_string();
        }
        let mut table = String::from("| Theme | Net Score | Negative Share |\n|---|---|---|\n");
        for bar in &ctx.story.theme_bars {
            let _ = writeln!(
                table,
                "| {} | {} | {:.1}% |",
                cell(&bar.name),
                bar.label,
                bar.negative_share
            );
        }
        table
    }

    fn generate_drivers(ctx: &DashboardContext) -> String {
        if ctx.story.drivers.is_empty() {
            return "_No negative drivers._".to_string();
        }
        let mut table = String::from("| Phrase | Citations | Example |\n|---|---|---|\n");
        for d in &ctx.story.drivers {
            let _ = writeln!(
                table,
                "| {} | {} | {} |",
                cell(&d.phrase),
                d.count,
                cell(&d.context)
            );
        }
        table
    }

    fn generate_coverage(ctx: &DashboardContext) -> String {
        if ctx.matrix.coverage.is_empty() {
            return "_No coverage data._".to_string();
        }
        let mut table = String::from("| # | Theme | Schools | Coverage |\n|---|---|---|---|\n");
        for row in &ctx.matrix.coverage {
            let _ = writeln!(
                table,
                "| {} | {} | {} | {:.0}% |",
                row.index,
                cell(&row.theme),
                row.label,
                row.width
            );
        }
        table
    }

    fn generate_matrix(ctx: &DashboardContext) -> String {
        if ctx.matrix.rows.is_empty() {
            return "_No schools in this dataset._".to_string();
        }
        let mut table = String::new();
        let headers: Vec<String> = ctx.matrix.columns.iter().map(|c| cell(&c.label)).collect();
        let _ = writeln!(table, "| {} |", headers.join(" | "));
        let _ = writeln!(table, "|{}", "---|".repeat(headers.len()));

        for row in &ctx.matrix.rows {
            let cells: Vec<String> = row
                .cells
                .iter()
                .map(|c| {
                    c.detail.data.as_ref().map_or_else(
                        || "—".to_string(),
                        |d| format!("{} ({})", d.score, d.bucket),
                    )
                })
                .collect();
            let _ = writeln!(
                table,
                "| {}. {} | {} | {} | {} |",
                row.rank,
                cell(&row.name),
                cell(&row.city),
                row.overall_label,
                cells.join(" | ")
            );
        }
        table
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &DashboardContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &DashboardContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
