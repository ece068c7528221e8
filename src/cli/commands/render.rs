//! Render command handler
//!
//! Loads the dataset and writes the dashboard as HTML or Markdown.

use pulse_dashboard::config::Config;
use pulse_dashboard::core::matrix::{SortColumn, SortState};
use pulse_dashboard::core::models::theme_order;
use pulse_dashboard::core::report::{
    DashboardContext, HtmlReporter, MarkdownReporter, RenderOptions, ReportFormat,
    ReportGenerator, Tab,
};
use pulse_dashboard::{error, info, verbose};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Parsed `render` arguments
#[derive(Debug)]
pub struct RenderRequest {
    /// Dataset location; config `dataset` when `None`
    pub source: Option<String>,
    /// Output path; derived from the reports directory when `None`
    pub output: Option<PathBuf>,
    /// Format name
    pub format: String,
    /// Sort columns, applied as successive header clicks
    pub sort: Vec<String>,
    /// Radial canvas width
    pub width: Option<u32>,
    /// Radial canvas height
    pub height: Option<u32>,
    /// Tab shown on load
    pub tab: Tab,
}

/// Resolve the matrix sort: the configured column, then each `--sort` as a header click
///
/// # Errors
/// Returns a message when a column matches nothing
pub fn resolve_sort(configured: &str, clicks: &[String], themes: &[String]) -> Result<SortState, String> {
    let mut state = SortState::by(SortColumn::resolve(configured, themes)?);
    for click in clicks {
        state.toggle(SortColumn::resolve(click, themes)?);
    }
    Ok(state)
}

/// Default output path: `{reports_dir}/{stem}_dashboard.{ext}`
#[must_use]
pub fn default_output_path(reports_dir: &str, stem: &str, format: ReportFormat) -> PathBuf {
    Path::new(reports_dir).join(format!("{stem}_dashboard.{}", format.extension()))
}

/// Run the render command and return a short summary for stdout
///
/// # Errors
/// Returns a `✗`-prefixed message for any failed step
pub fn run(request: &RenderRequest, config: &Config) -> Result<String, String> {
    let format = ReportFormat::from_str(&request.format).map_err(|e| format!("✗ {e}"))?;
    let themes = theme_order(&config.render.themes);
    let sort = resolve_sort(&config.render.sort, &request.sort, &themes)
        .map_err(|e| format!("✗ {e}"))?;

    let (source, dataset) = super::load_source(request.source.as_deref(), config)?;

    let output_path = request.output.clone().unwrap_or_else(|| {
        default_output_path(&config.paths.reports_dir, &source.stem(), format)
    });
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            format!("✗ Failed to create output directory {}: {e}", parent.display())
        })?;
    }

    let options = RenderOptions {
        source: source.to_string(),
        width: request.width.unwrap_or(config.render.width),
        height: request.height.unwrap_or(config.render.height),
        themes,
        sort,
        school_reports: config.paths.school_reports.clone(),
        tab: request.tab,
    };
    verbose!(
        "Rendering {format} for {source} ({}x{}, sort {} {})",
        options.width,
        options.height,
        options.sort.column,
        options.sort.direction.as_str()
    );

    let ctx = DashboardContext::build(&dataset, &options);
    let result = match format {
        ReportFormat::Html => HtmlReporter::new().generate(&ctx, &output_path),
        ReportFormat::Markdown => MarkdownReporter::new().generate(&ctx, &output_path),
    };
    result.map_err(|e| {
        error!("Dashboard generation failed for {source}: {e}");
        format!("✗ Failed to generate {format} dashboard: {e}")
    })?;

    info!("Dashboard written to {}", output_path.display());
    Ok(format!(
        "✓ Dashboard generated: {}\n  {} schools, {} themes, {} links, sorted by {} ({})",
        output_path.display(),
        ctx.school_count(),
        ctx.theme_count(),
        ctx.radial.links.len(),
        ctx.matrix.sort.column,
        ctx.matrix.sort.direction.as_str()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_dashboard::core::matrix::SortDirection;

    fn themes() -> Vec<String> {
        vec!["Resources & Capacity".to_string()]
    }

    #[test]
    fn sort_starts_from_config_and_toggles() {
        let state = resolve_sort("name", &[], &themes()).expect("valid");
        assert_eq!(state, SortState::default());

        let state = resolve_sort("name", &["overall".to_string()], &themes()).expect("valid");
        assert_eq!(state.column, SortColumn::Overall);
        assert_eq!(state.direction, SortDirection::Descending);

        let clicks = vec!["resources & capacity".to_string(), "Resources & Capacity".to_string()];
        let state = resolve_sort("name", &clicks, &themes()).expect("valid");
        assert_eq!(state.column, SortColumn::Theme("Resources & Capacity".to_string()));
        assert_eq!(state.direction, SortDirection::Ascending);

        assert!(resolve_sort("bogus", &[], &themes()).is_err());
    }

    #[test]
    fn default_output_uses_stem_and_extension() {
        let path = default_output_path("reports", "full_dashboard_data", ReportFormat::Markdown);
        assert_eq!(path, Path::new("reports").join("full_dashboard_data_dashboard.md"));
    }
}
