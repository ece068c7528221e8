//! Matrix sort state and row ordering

use crate::core::models::SchoolRow;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

/// Sort value for a missing theme cell, below any real score
pub const MISSING_SCORE: f64 = -999.0;

/// Sortable matrix column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortColumn {
    /// School name
    Name,
    /// City or country
    City,
    /// Overall percentage
    Overall,
    /// Mean sentiment of one theme
    Theme(String),
}

impl SortColumn {
    /// Parse a column key without validating theme names
    #[must_use]
    pub fn parse(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "name" | "school" | "" => Self::Name,
            "city" => Self::City,
            "overall" => Self::Overall,
            _ => Self::Theme(key.trim().to_string()),
        }
    }

    /// Parse a column key, matching theme names case-insensitively against `themes`
    ///
    /// # Errors
    /// Returns an error naming the valid keys when the key matches nothing
    pub fn resolve(key: &str, themes: &[String]) -> Result<Self, String> {
        match Self::parse(key) {
            Self::Theme(name) => themes
                .iter()
                .find(|t| t.eq_ignore_ascii_case(&name))
                .map(|t| Self::Theme(t.clone()))
                .ok_or_else(|| {
                    format!(
                        "Unknown sort column '{name}'. Use name, city, overall or one of: {}",
                        themes.join(", ")
                    )
                }),
            column => Ok(column),
        }
    }

    /// Key used in markup and config
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Name => "name",
            Self::City => "city",
            Self::Overall => "overall",
            Self::Theme(name) => name,
        }
    }

    /// Direction chosen when the column is first selected
    #[must_use]
    pub const fn initial_direction(&self) -> SortDirection {
        match self {
            Self::Name | Self::City => SortDirection::Ascending,
            Self::Overall | Self::Theme(_) => SortDirection::Descending,
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first
    Ascending,
    /// Largest first
    Descending,
}

impl SortDirection {
    /// The opposite direction
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Header marker
    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }

    /// Short name (`asc` / `desc`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Active sort column and direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    /// Column being sorted
    pub column: SortColumn,
    /// Direction
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: SortColumn::Name,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortState {
    /// Sort by `column` in its initial direction
    #[must_use]
    pub fn by(column: SortColumn) -> Self {
        let direction = column.initial_direction();
        Self { column, direction }
    }

    /// Header click: the same column flips direction, a new column starts in its initial direction
    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == column {
            self.direction = self.direction.flipped();
        } else {
            *self = Self::by(column);
        }
    }

    /// Marker for a column header, if it is the active one
    #[must_use]
    pub fn marker_for(&self, column: &SortColumn) -> Option<&'static str> {
        (self.column == *column).then(|| self.direction.arrow())
    }
}

/// Locale-style string comparison: case-insensitive first, then exact
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn theme_score(row: &SchoolRow, theme: &str) -> f64 {
    row.cell(theme)
        .and_then(|c| c.avg_sentiment)
        .unwrap_or(MISSING_SCORE)
}

/// Compare two rows under a sort state
#[must_use]
pub fn compare_rows(a: &SchoolRow, b: &SchoolRow, state: &SortState) -> Ordering {
    let ascending = match &state.column {
        SortColumn::Name => compare_text(&a.name, &b.name),
        SortColumn::City => compare_text(a.city(), b.city()),
        SortColumn::Overall => a.overall_percent().total_cmp(&b.overall_percent()),
        SortColumn::Theme(theme) => theme_score(a, theme).total_cmp(&theme_score(b, theme)),
    };
    match state.direction {
        SortDirection::Ascending => ascending,
        SortDirection::Descending => ascending.reverse(),
    }
}

/// Stable in-place sort of rows (owned or borrowed)
pub fn sort_rows<R: Borrow<SchoolRow>>(rows: &mut [R], state: &SortState) {
    rows.sort_by(|a, b| compare_rows(a.borrow(), b.borrow(), state));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ThemeCell;

    fn row(name: &str, city: Option<&str>, overall: Option<f64>, facilities: Option<f64>) -> SchoolRow {
        let mut r = SchoolRow {
            name: name.to_string(),
            city: city.map(str::to_string),
            overall_percent: overall,
            ..SchoolRow::default()
        };
        r.themes.insert(
            "Facilities".to_string(),
            facilities.map(|avg| ThemeCell {
                avg_sentiment: Some(avg),
                ..ThemeCell::default()
            }),
        );
        r
    }

    fn names(rows: &[SchoolRow]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn toggle_flips_same_column_and_resets_new_one() {
        let mut state = SortState::default();
        state.toggle(SortColumn::Name);
        assert_eq!(state.direction, SortDirection::Descending);
        state.toggle(SortColumn::Overall);
        assert_eq!(state, SortState::by(SortColumn::Overall));
        assert_eq!(state.direction, SortDirection::Descending);
        state.toggle(SortColumn::City);
        assert_eq!(state.direction, SortDirection::Ascending);
        state.toggle(SortColumn::Theme("Facilities".to_string()));
        assert_eq!(state.direction, SortDirection::Descending);
    }

    #[test]
    fn resolve_matches_theme_names() {
        let themes = vec!["Resources & Capacity".to_string()];
        assert_eq!(
            SortColumn::resolve("resources & capacity", &themes),
            Ok(SortColumn::Theme("Resources & Capacity".to_string()))
        );
        assert_eq!(SortColumn::resolve("Overall", &themes), Ok(SortColumn::Overall));
        assert!(SortColumn::resolve("Nope", &themes).is_err());
    }

    #[test]
    fn sorts_by_name_case_insensitively() {
        let mut rows = vec![
            row("beta", None, None, None),
            row("Alpha", None, None, None),
            row("Gamma", None, None, None),
        ];
        sort_rows(&mut rows, &SortState::default());
        assert_eq!(names(&rows), vec!["Alpha", "beta", "Gamma"]);
    }

    #[test]
    fn missing_city_sorts_first_ascending() {
        let mut rows = vec![
            row("A", Some("Zurich"), None, None),
            row("B", None, None, None),
            row("C", Some("Berlin"), None, None),
        ];
        sort_rows(&mut rows, &SortState::by(SortColumn::City));
        assert_eq!(names(&rows), vec!["B", "C", "A"]);
    }

    #[test]
    fn overall_and_theme_sort_descending_with_missing_last() {
        let mut rows = vec![
            row("A", None, Some(5.0), Some(0.5)),
            row("B", None, None, None),
            row("C", None, Some(-20.0), Some(-1.5)),
            row("D", None, Some(42.0), Some(1.2)),
        ];
        sort_rows(&mut rows, &SortState::by(SortColumn::Overall));
        assert_eq!(names(&rows), vec!["D", "A", "B", "C"]);

        sort_rows(&mut rows, &SortState::by(SortColumn::Theme("Facilities".into())));
        assert_eq!(names(&rows), vec!["D", "A", "C", "B"]);
    }

    #[test]
    fn borrowed_rows_sort_too() {
        let a = row("b", None, None, None);
        let b = row("a", None, None, None);
        let mut refs = vec![&a, &b];
        sort_rows(&mut refs, &SortState::default());
        assert_eq!(refs[0].name, "a");
    }
}
