//! Integration tests for the matrix view and its keyboard/modal state

use pulse_dashboard::core::loader::{load_dataset, DataSource};
use pulse_dashboard::core::matrix::detail::{NO_SCHOOL_FEEDBACK, NO_THEME_FEEDBACK, VERBATIM_ERROR};
use pulse_dashboard::core::matrix::{
    Key, MatrixState, MatrixView, Modal, SortColumn, SortDirection, SortState,
};
use pulse_dashboard::core::models::{theme_order, Dataset};
use std::path::PathBuf;
use std::time::Duration;

const RESOURCES: &str = "Resources & Capacity";

fn dataset() -> Dataset {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample_dashboard.json");
    load_dataset(&DataSource::File(path), Duration::from_secs(5)).expect("fixture loads")
}

fn view(data: &Dataset, sort: &SortState) -> MatrixView {
    MatrixView::build(data, &theme_order(&[]), sort, "School_Reports")
}

fn names(view: &MatrixView) -> Vec<&str> {
    view.rows.iter().map(|r| r.name.as_str()).collect()
}

fn resources_col(view: &MatrixView) -> usize {
    view.themes
        .iter()
        .position(|t| t == RESOURCES)
        .expect("canonical theme present")
}

#[test]
fn test_default_sort_is_name_ascending() {
    let data = dataset();
    let v = view(&data, &SortState::default());

    assert_eq!(names(&v), ["Hillview School", "Oak Park", "Riverside Academy"]);
    assert_eq!(v.row_count(), 3);
    assert_eq!(v.column_count(), 7);
    assert_eq!(v.rows[0].rank, 1);
}

#[test]
fn test_header_clicks_toggle_direction() {
    let data = dataset();
    let mut sort = SortState::default();

    sort.toggle(SortColumn::Overall);
    assert_eq!(sort.direction, SortDirection::Descending);
    assert_eq!(
        names(&view(&data, &sort)),
        ["Hillview School", "Oak Park", "Riverside Academy"]
    );

    sort.toggle(SortColumn::Overall);
    assert_eq!(
        names(&view(&data, &sort)),
        ["Riverside Academy", "Oak Park", "Hillview School"]
    );
}

#[test]
fn test_theme_sort_puts_missing_last() {
    let data = dataset();
    let sort = SortState::by(SortColumn::Theme(RESOURCES.to_string()));

    // Oak Park 0.0, Riverside -1.2, Hillview has no cell
    assert_eq!(
        names(&view(&data, &sort)),
        ["Oak Park", "Riverside Academy", "Hillview School"]
    );
}

#[test]
fn test_city_sort_places_missing_city_first() {
    let data = dataset();
    let v = view(&data, &SortState::by(SortColumn::City));

    assert_eq!(names(&v), ["Oak Park", "Riverside Academy", "Hillview School"]);
}

#[test]
fn test_cell_details_follow_data() {
    let data = dataset();
    let v = view(&data, &SortState::default());
    let col = resources_col(&v);

    let riverside = &v.cell(2, col).expect("cell").detail;
    let quotes = &riverside.data.as_ref().expect("data present").quotes;
    assert_eq!(
        usize::from(quotes.featured().is_some()) + quotes.supporting().len(),
        3
    );
    assert!(riverside.placeholder().is_none());

    let oak = &v.cell(1, col).expect("cell").detail;
    assert_eq!(oak.placeholder(), Some(VERBATIM_ERROR));

    let hillview = &v.cell(0, col).expect("cell").detail;
    assert!(hillview.data.is_none());
    assert_eq!(hillview.placeholder(), Some(NO_THEME_FEEDBACK));

    assert_eq!(v.rows[1].overall.placeholder(), Some(NO_SCHOOL_FEEDBACK));
    assert_eq!(v.rows[2].overall.quotes.len(), 3);
}

#[test]
fn test_keyboard_navigation_clamps_to_table() {
    let data = dataset();
    let v = view(&data, &SortState::default());
    let (rows, cols) = (v.row_count(), v.column_count());
    let mut state = MatrixState::new();

    assert!(state.handle_key(Key::Down, rows, cols));
    assert_eq!(state.selected(), Some((0, 0)));
    assert!(!state.is_modal_open());

    for _ in 0..10 {
        state.handle_key(Key::Right, rows, cols);
        state.handle_key(Key::Down, rows, cols);
    }
    assert_eq!(state.selected(), Some((rows - 1, cols - 1)));
    assert!(!state.handle_key(Key::Down, rows, cols));
    assert!(!state.handle_key(Key::Other, rows, cols));
}

#[test]
fn test_open_modal_follows_selection() {
    let data = dataset();
    let v = view(&data, &SortState::default());
    let (rows, cols) = (v.row_count(), v.column_count());
    let col = resources_col(&v);
    let mut state = MatrixState::new();

    state.select_and_open(0, col, true);
    assert_eq!(
        v.modal_title(&state).as_deref(),
        Some("Hillview School: Resources & Capacity")
    );

    assert!(state.handle_key(Key::Down, rows, cols));
    assert_eq!(state.modal(), Some(Modal::Cell { row: 1, col }));
    assert_eq!(
        v.modal_title(&state).as_deref(),
        Some("Oak Park: Resources & Capacity")
    );

    assert!(state.handle_key(Key::Escape, rows, cols));
    assert!(v.modal_title(&state).is_none());
    assert_eq!(state.selected(), Some((1, col)));
    assert!(!state.handle_key(Key::Escape, rows, cols));
}

#[test]
fn test_overall_modal_title() {
    let data = dataset();
    let v = view(&data, &SortState::default());
    let mut state = MatrixState::new();

    state.open_overall(2);

    assert_eq!(
        v.modal_title(&state).as_deref(),
        Some("Riverside Academy: All Themes")
    );
}
