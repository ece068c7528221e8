//! Detail command handler
//!
//! Prints the modal content of one school (all themes) or one school × theme
//! cell as plain text.

use pulse_dashboard::config::Config;
use pulse_dashboard::core::matrix::detail::{CellDetail, OverallDetail, Quote, SUPPORTING_HEADING};
use pulse_dashboard::core::matrix::{MatrixState, MatrixView, Modal, SortState};
use pulse_dashboard::core::models::theme_order;
use std::fmt::Write;

/// Run the detail command and return the text to print
///
/// The school and theme are looked up in the matrix and the matching modal is
/// opened, so the output carries the same title and content as the dashboard.
///
/// # Errors
/// Returns a `✗`-prefixed message when loading fails or the school/theme is unknown
pub fn run(
    source: Option<&str>,
    school: &str,
    theme: Option<&str>,
    config: &Config,
) -> Result<String, String> {
    let (_, dataset) = super::load_source(source, config)?;
    let themes = theme_order(&config.render.themes);
    let view = MatrixView::build(
        &dataset,
        &themes,
        &SortState::default(),
        &config.paths.school_reports,
    );
    let state = open_modal(&view, school, theme)?;
    Ok(format_modal(&view, &state))
}

/// Select the school's row (and the theme's column) and open the modal on it
///
/// # Errors
/// Returns a `✗`-prefixed message when the school or theme is not in the matrix
pub fn open_modal(view: &MatrixView, school: &str, theme: Option<&str>) -> Result<MatrixState, String> {
    let row = view
        .rows
        .iter()
        .position(|r| r.name.eq_ignore_ascii_case(school.trim()))
        .ok_or_else(|| format!("✗ Unknown school: {school}"))?;

    let mut state = MatrixState::new();
    match theme {
        Some(name) => {
            let col = view
                .themes
                .iter()
                .position(|t| t.eq_ignore_ascii_case(name.trim()))
                .ok_or_else(|| format!("✗ Unknown theme: {name}"))?;
            state.select_and_open(row, col, true);
        }
        None => state.open_overall(row),
    }
    Ok(state)
}

/// Title line plus body of the open modal; empty when it is closed
#[must_use]
pub fn format_modal(view: &MatrixView, state: &MatrixState) -> String {
    let body = match state.modal() {
        Some(Modal::Cell { row, col }) => view.cell(row, col).map(|c| format_cell(&c.detail)),
        Some(Modal::Overall { row }) => view.rows.get(row).map(|r| format_overall(&r.overall)),
        None => None,
    };
    match (view.modal_title(state), body) {
        (Some(title), Some(body)) => format!("{title}\n{body}"),
        _ => String::new(),
    }
}

fn write_quote(out: &mut String, quote: &Quote, indent: &str) {
    let label = match &quote.theme {
        Some(theme) => format!("{theme} · {}", quote.bucket),
        None => quote.bucket.clone(),
    };
    let _ = writeln!(out, "{indent}[{label}] \"{}\"", quote.text);
}

/// Plain-text body of a cell detail
#[must_use]
pub fn format_cell(detail: &CellDetail) -> String {
    let mut out = String::new();
    if let Some(data) = &detail.data {
        let _ = writeln!(out, "Sentiment Score: ({}) {}", data.bucket, data.score);
        let _ = writeln!(
            out,
            "Volume: {} quotes ({} positive, {} neutral, {} negative)",
            data.volume, data.positive, data.neutral, data.negative
        );
        if let Some(featured) = data.quotes.featured() {
            let _ = writeln!(out);
            write_quote(&mut out, featured, "");
        }
        if !data.quotes.supporting().is_empty() {
            let _ = writeln!(out, "\n{SUPPORTING_HEADING}");
            for quote in data.quotes.supporting() {
                write_quote(&mut out, quote, "  ");
            }
        }
    }
    if let Some(message) = detail.placeholder() {
        let _ = writeln!(out, "{message}");
    }
    out
}

/// Plain-text body of a school's all-themes detail
#[must_use]
pub fn format_overall(detail: &OverallDetail) -> String {
    let mut out = String::new();
    if let Some(heading) = detail.heading() {
        let _ = writeln!(out, "{heading}");
        for quote in &detail.quotes {
            write_quote(&mut out, quote, "  ");
        }
    }
    if let Some(message) = detail.placeholder() {
        let _ = writeln!(out, "{message}");
    }
    out
}
