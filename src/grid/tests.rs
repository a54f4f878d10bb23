use super::*;
use crate::error::CallbackError;
use crate::identity::{RowKey, RowKeyConfig};
use crate::key::KeyMap;
use crate::pagination::{DataMode, Pagination};
use crate::state::{FilterState, SortDirection};
use crossterm::event::KeyModifiers;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
struct Person {
    id: u32,
    name: &'static str,
    age: Option<u32>,
    city: &'static str,
}

fn people() -> Vec<Person> {
    vec![
        Person { id: 1, name: "Bob", age: Some(30), city: "Paris" },
        Person { id: 2, name: "alice", age: Some(25), city: "Lyon" },
        Person { id: 3, name: "Amy", age: None, city: "Paris" },
        Person { id: 4, name: "Carl", age: Some(41), city: "Lyon" },
        Person { id: 5, name: "dana", age: Some(25), city: "Nice" },
    ]
}

fn columns() -> Vec<Column<Person>> {
    vec![
        Column::new("id").accessor(|p: &Person| p.id.into()).sortable(true),
        Column::new("name")
            .header("Name")
            .accessor(|p: &Person| p.name.into())
            .sortable(true)
            .filterable(true),
        Column::new("age")
            .header("Age")
            .accessor(|p: &Person| p.age.into())
            .sortable(true),
        Column::new("city")
            .header("City")
            .accessor(|p: &Person| p.city.into())
            .filterable(true),
    ]
}

fn grid() -> Model<Person> {
    Model::new(columns()).with_rows(people())
}

fn ids(grid: &Model<Person>) -> Vec<u32> {
    grid.visible_rows().iter().map(|p| p.id).collect()
}

fn key(code: KeyCode) -> Msg {
    Box::new(KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    }) as Msg
}

fn plain(s: &str) -> String {
    lipgloss_extras::lipgloss::strip_ansi(s)
}

fn recorder<V: Send + 'static>() -> (Arc<Mutex<Vec<V>>>, Arc<Mutex<Vec<V>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    (Arc::clone(&log), log)
}

fn failing_comparator() -> Column<Person> {
    Column::new("rank").sortable(true).try_comparator(
        |_: &Person, _: &Person, _| -> std::result::Result<std::cmp::Ordering, CallbackError> {
            Err("rank service unavailable".into())
        },
    )
}

#[test]
fn test_sort_cycle_reports_each_step() {
    let (log, sink) = recorder();
    let mut grid = grid().on_sort(move |column, direction| {
        sink.lock()
            .unwrap()
            .push((column.map(str::to_string), direction));
    });

    grid.toggle_sort("name").unwrap();
    assert_eq!(ids(&grid), vec![2, 3, 1, 4, 5]);
    grid.toggle_sort("name").unwrap();
    assert_eq!(ids(&grid), vec![5, 4, 1, 3, 2]);
    grid.toggle_sort("name").unwrap();
    assert_eq!(ids(&grid), vec![1, 2, 3, 4, 5]);

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            (Some("name".to_string()), Some(SortDirection::Ascending)),
            (Some("name".to_string()), Some(SortDirection::Descending)),
            (None, None),
        ]
    );
    assert!(!grid.sort_state().is_active());
}

#[test]
fn test_sorting_other_column_starts_ascending() {
    let mut grid = grid();
    grid.toggle_sort("name").unwrap();
    grid.toggle_sort("name").unwrap();
    grid.toggle_sort("age").unwrap();
    assert_eq!(grid.sort_state().column(), Some("age"));
    assert_eq!(grid.sort_state().direction(), SortDirection::Ascending);
}

#[test]
fn test_non_sortable_column_ignores_clicks() {
    let (log, sink) = recorder::<()>();
    let mut grid = grid().on_sort(move |_, _| sink.lock().unwrap().push(()));
    grid.toggle_sort("city").unwrap();
    assert!(!grid.sort_state().is_active());
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_unknown_column_is_an_error() {
    let mut grid = grid();
    assert!(matches!(
        grid.toggle_sort("salary"),
        Err(GridError::UnknownColumn(id)) if id == "salary"
    ));
    assert!(matches!(
        grid.set_filter("salary", "1"),
        Err(GridError::UnknownColumn(_))
    ));
}

#[test]
fn test_initial_sort_does_not_call_back() {
    let (log, sink) = recorder::<()>();
    let grid = grid()
        .on_sort(move |_, _| sink.lock().unwrap().push(()))
        .with_initial_sort("age", SortDirection::Descending);
    assert_eq!(ids(&grid), vec![4, 1, 2, 5, 3]);
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_set_sort_clears_with_none() {
    let (log, sink) = recorder();
    let mut grid = grid().on_sort(move |column, direction| {
        sink.lock()
            .unwrap()
            .push((column.map(str::to_string), direction));
    });
    grid.set_sort(Some("age"), SortDirection::Ascending).unwrap();
    grid.set_sort(Some("age"), SortDirection::Ascending).unwrap();
    grid.set_sort(None, SortDirection::Ascending).unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            (Some("age".to_string()), Some(SortDirection::Ascending)),
            (None, None),
        ]
    );
}

#[test]
fn test_empty_filter_values_are_not_counted() {
    let (log, sink) = recorder::<FilterState>();
    let mut grid = grid().on_filter(move |state| sink.lock().unwrap().push(state.clone()));

    grid.set_filter("name", "a").unwrap();
    assert_eq!(grid.active_filter_count(), 1);
    grid.set_filter("city", "").unwrap();
    assert_eq!(grid.active_filter_count(), 1);
    grid.set_filter("name", "").unwrap();
    assert_eq!(grid.active_filter_count(), 0);

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].get("name"), Some("a"));
    assert!(log[1].is_empty());
}

#[test]
fn test_filter_then_sort() {
    let mut grid = grid();
    grid.set_filter("name", "A").unwrap();
    grid.toggle_sort("age").unwrap();
    assert_eq!(ids(&grid), vec![2, 5, 4, 3]);

    grid.toggle_sort("age").unwrap();
    // Equal ages keep their input order; the missing age stays last.
    assert_eq!(ids(&grid), vec![4, 2, 5, 3]);
}

#[test]
fn test_filters_combine() {
    let mut grid = grid();
    grid.set_filter("name", "a").unwrap();
    grid.set_filter("city", "ly").unwrap();
    assert_eq!(ids(&grid), vec![2, 4]);

    grid.clear_filter("name").unwrap();
    assert_eq!(ids(&grid), vec![2, 4]);
    grid.clear_filters().unwrap();
    assert_eq!(ids(&grid), vec![1, 2, 3, 4, 5]);
    assert_eq!(grid.active_filter_count(), 0);
}

#[test]
fn test_rows_are_never_mutated() {
    let mut grid = grid();
    grid.set_filter("name", "a").unwrap();
    grid.toggle_sort("age").unwrap();
    assert_eq!(grid.rows(), people().as_slice());
}

#[test]
fn test_local_pagination() {
    let (pages, sink) = recorder();
    let mut grid = grid()
        .with_pagination(Pagination::new(2))
        .on_page_change(move |page| sink.lock().unwrap().push(page));

    assert_eq!(grid.pagination().map(|p| p.total_pages), Some(3));
    assert_eq!(ids(&grid), vec![1, 2]);
    assert!(grid.next_page());
    assert_eq!(ids(&grid), vec![3, 4]);
    assert!(grid.next_page());
    assert_eq!(ids(&grid), vec![5]);
    assert!(!grid.next_page());

    // A filter change always starts again from the first page.
    grid.set_filter("name", "a").unwrap();
    assert_eq!(ids(&grid), vec![2, 3]);
    assert_eq!(grid.pagination().map(|p| p.total_records), Some(4));

    assert_eq!(*pages.lock().unwrap(), vec![1, 2, 0]);
}

#[test]
fn test_page_size_change_returns_to_first_page() {
    let (sizes, size_sink) = recorder();
    let (pages, page_sink) = recorder();
    let mut grid = grid()
        .with_pagination(Pagination::new(2))
        .on_page_size_change(move |size| size_sink.lock().unwrap().push(size))
        .on_page_change(move |page| page_sink.lock().unwrap().push(page));

    grid.next_page();
    assert!(grid.set_page_size(5));
    assert!(!grid.set_page_size(5));
    assert_eq!(ids(&grid), vec![1, 2, 3, 4, 5]);
    assert_eq!(*sizes.lock().unwrap(), vec![5]);
    assert_eq!(*pages.lock().unwrap(), vec![1, 0]);
}

#[test]
fn test_remote_mode_reports_but_does_not_process() {
    let (log, sink) = recorder::<FilterState>();
    let mut grid = Model::new(columns())
        .with_data_mode(DataMode::Remote)
        .with_pagination(Pagination::new(2))
        .with_rows(people())
        .on_filter(move |state| sink.lock().unwrap().push(state.clone()));
    grid.set_total_records(50);

    grid.set_filter("name", "zzz").unwrap();
    grid.toggle_sort("age").unwrap();

    assert_eq!(ids(&grid), vec![1, 2, 3, 4, 5]);
    assert_eq!(log.lock().unwrap().len(), 1);
    assert_eq!(grid.pagination().map(|p| p.total_pages), Some(25));
    assert!(grid.next_page());
    assert_eq!(grid.pagination().map(|p| p.page), Some(1));
}

#[test]
fn test_failed_sort_keeps_previous_state() {
    let (log, sink) = recorder::<()>();
    let mut cols = columns();
    cols.push(failing_comparator());
    let mut grid = Model::new(cols)
        .with_rows(people())
        .on_sort(move |_, _| sink.lock().unwrap().push(()));
    grid.toggle_sort("age").unwrap();
    let before = ids(&grid);

    let err = grid.toggle_sort("rank").unwrap_err();
    assert!(matches!(err, GridError::Callback { ref column, .. } if column == "rank"));
    assert_eq!(grid.sort_state().column(), Some("age"));
    assert_eq!(ids(&grid), before);
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[test]
fn test_failed_filter_keeps_previous_state() {
    let mut cols = columns();
    cols.push(
        Column::new("tag")
            .filterable(true)
            .try_predicate(|p: &Person, _| {
                if p.id == 3 {
                    Err("bad tag".into())
                } else {
                    Ok(true)
                }
            }),
    );
    let mut grid = Model::new(cols).with_rows(people());

    assert!(grid.set_filter("tag", "x").is_err());
    assert!(grid.filter_state().is_empty());
    assert_eq!(ids(&grid), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_failing_key_press_returns_error_command() {
    let mut cols = vec![failing_comparator()];
    cols.extend(columns());
    let mut grid = Model::new(cols).with_rows(people());
    assert!(grid.update(key(KeyCode::Char('s'))).is_some());
    assert!(!grid.sort_state().is_active());
}

#[test]
fn test_set_rows_rejects_rows_that_fail_processing() {
    let mut cols = columns();
    cols.push(
        Column::new("tag")
            .filterable(true)
            .try_predicate(|p: &Person, _| {
                if p.id == 9 {
                    Err("bad row".into())
                } else {
                    Ok(true)
                }
            }),
    );
    let mut grid = Model::new(cols).with_rows(people());
    grid.set_filter("tag", "x").unwrap();

    let mut bad = people();
    bad.push(Person { id: 9, name: "Zed", age: None, city: "Rome" });
    assert!(grid.set_rows(bad).is_err());
    assert_eq!(grid.rows().len(), 5);
    assert_eq!(ids(&grid), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_set_columns_rejects_duplicates() {
    let mut grid = grid();
    let mut cols = columns();
    cols.push(Column::new("age"));
    assert!(matches!(
        grid.set_columns(cols),
        Err(GridError::DuplicateColumn(id)) if id == "age"
    ));
    assert_eq!(grid.columns().len(), 4);
}

#[test]
fn test_row_click_reports_processed_index() {
    let (log, sink) = recorder();
    let mut grid = grid()
        .with_pagination(Pagination::new(2))
        .with_initial_sort("age", SortDirection::Descending)
        .on_row_click(move |row: &Person, index| sink.lock().unwrap().push((row.id, index)));

    assert!(grid.click_row(0));
    grid.next_page();
    assert!(grid.click_row(1));
    assert!(!grid.click_row(2));

    assert_eq!(*log.lock().unwrap(), vec![(4, 0), (5, 3)]);
}

#[test]
fn test_row_keys() {
    let grid = grid().with_initial_sort("id", SortDirection::Descending);
    assert_eq!(
        grid.row_keys(),
        (1..=5)
            .rev()
            .map(|id| RowKey::Value(id.to_string()))
            .collect::<Vec<_>>()
    );

    let grid = grid.with_row_key(RowKeyConfig::accessor(|p: &Person| p.name.to_lowercase()));
    assert_eq!(grid.row_keys()[0], RowKey::Value("dana".to_string()));
}

#[test]
fn test_row_keys_fall_back_to_position() {
    let grid = Model::new(vec![Column::new("name").accessor(|p: &Person| p.name.into())])
        .with_rows(people());
    assert_eq!(grid.row_keys()[2], RowKey::Index(2));
}

#[test]
fn test_keyboard_navigation_and_sort() {
    let mut grid = grid();
    grid.update(key(KeyCode::Char('l')));
    grid.update(key(KeyCode::Char('l')));
    assert_eq!(grid.focused_column(), 2);
    grid.update(key(KeyCode::Char('s')));
    assert_eq!(grid.sort_state().column(), Some("age"));

    grid.update(key(KeyCode::Down));
    grid.update(key(KeyCode::Char('j')));
    assert_eq!(grid.cursor(), 2);
    assert_eq!(grid.selected_row().map(|p| p.id), Some(1));
}

#[test]
fn test_filter_editing_applies_live_and_cancels() {
    let mut grid = grid();
    grid.update(key(KeyCode::Right));
    grid.update(key(KeyCode::Char('/')));
    assert!(grid.is_editing_filter());

    grid.update(key(KeyCode::Char('c')));
    grid.update(key(KeyCode::Char('a')));
    assert_eq!(grid.filter_state().get("name"), Some("ca"));
    assert_eq!(ids(&grid), vec![4]);

    grid.update(key(KeyCode::Esc));
    assert!(!grid.is_editing_filter());
    assert!(grid.filter_state().is_empty());
    assert_eq!(ids(&grid).len(), 5);
}

#[test]
fn test_filter_editing_accepts() {
    let mut grid = grid();
    grid.update(key(KeyCode::Right));
    grid.update(key(KeyCode::Char('/')));
    grid.update(key(KeyCode::Char('b')));
    grid.update(key(KeyCode::Char('x')));
    grid.update(key(KeyCode::Backspace));
    grid.update(key(KeyCode::Enter));

    assert!(!grid.is_editing_filter());
    assert_eq!(grid.filter_state().get("name"), Some("b"));
    assert_eq!(ids(&grid), vec![1]);
}

#[test]
fn test_filter_key_ignored_on_unfilterable_column() {
    let mut grid = grid();
    grid.update(key(KeyCode::Char('/')));
    assert!(!grid.is_editing_filter());
}

#[test]
fn test_blurred_grid_ignores_keys() {
    let mut grid = grid();
    grid.blur();
    assert!(!grid.focused());
    grid.update(key(KeyCode::Char('s')));
    assert!(!grid.sort_state().is_active());
    grid.focus();
    grid.update(key(KeyCode::Char('s')));
    assert!(grid.sort_state().is_active());
}

#[test]
fn test_help_follows_mode() {
    let mut grid = grid().with_pagination(Pagination::new(2));
    assert!(grid
        .short_help()
        .iter()
        .any(|b| b.help().desc == "next page"));

    grid.update(key(KeyCode::Right));
    grid.update(key(KeyCode::Char('/')));
    let help: Vec<&str> = grid
        .short_help()
        .iter()
        .map(|b| b.help().desc.as_str())
        .collect();
    assert_eq!(help, vec!["apply filter", "cancel"]);
}

#[test]
fn test_view_shows_headers_rows_and_footer() {
    let mut grid = grid().with_pagination(Pagination::new(2));
    grid.toggle_sort("name").unwrap();
    grid.set_filter("city", "Paris").unwrap();
    let view = plain(&grid.view());

    assert!(view.contains("Name ▲"), "{view}");
    assert!(view.contains("> 3 "), "{view}");
    assert!(view.contains("  1 "), "{view}");
    assert!(view.contains("Page 1 of 1 · 2 records · 1 filter active"), "{view}");
    assert!(view.contains("Paris"), "{view}");
}

#[test]
fn test_view_descending_indicator_and_placeholder() {
    let mut cols = columns();
    cols[3] = Column::new("city")
        .accessor(|p: &Person| p.city.into())
        .filter_config(crate::FilterConfig::new(crate::FilterKind::Text).placeholder("any city"));
    let mut grid = Model::new(cols).with_rows(people());
    grid.set_sort(Some("age"), SortDirection::Descending).unwrap();
    let view = plain(&grid.view());
    assert!(view.contains("Age ▼"), "{view}");
    assert!(view.contains("any city"), "{view}");
}

#[test]
fn test_view_empty_and_loading() {
    let mut grid = grid().with_empty_message("Nobody here");
    grid.set_filter("name", "zzz").unwrap();
    assert!(plain(&grid.view()).contains("Nobody here"));

    grid.set_loading(true);
    let view = plain(&grid.view());
    assert!(view.contains("Loading…"));
    assert!(!view.contains("Nobody here"));
}

#[test]
fn test_view_truncates_fixed_width_columns() {
    let grid = Model::new(vec![Column::new("name")
        .header("N")
        .width(3)
        .accessor(|p: &Person| p.name.into())])
    .with_rows(people());
    let view = plain(&grid.view());
    assert!(view.contains("al…"), "{view}");
}

#[test]
fn test_view_respects_height() {
    let mut grid = grid().with_height(2);
    for _ in 0..3 {
        grid.select_next();
    }
    let view = plain(&grid.view());
    assert!(view.contains("> 4 "), "{view}");
    assert!(view.contains("  3 "), "{view}");
    assert!(!view.contains("  1 "), "{view}");
}

#[test]
fn test_custom_renderers() {
    let grid = Model::new(vec![Column::new("name")
        .header("Name")
        .header_renderer(|c: &Column<Person>| c.title().to_uppercase())
        .cell_renderer(|p: &Person, index| format!("{index}:{}", p.name))])
    .with_rows(people());
    let view = plain(&grid.view());
    assert!(view.contains("NAME"), "{view}");
    assert!(view.contains("1:alice"), "{view}");
}

#[test]
fn test_processed_view_is_reused_until_inputs_change() {
    let comparisons = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = Arc::clone(&comparisons);
    let mut cols = columns();
    cols.push(
        Column::new("score")
            .sortable(true)
            .comparator(move |a: &Person, b: &Person, _| {
                counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                a.id.cmp(&b.id)
            }),
    );
    let mut grid = Model::new(cols).with_rows(people());
    grid.toggle_sort("score").unwrap();
    let count = || comparisons.load(std::sync::atomic::Ordering::SeqCst);
    let after_sort = count();
    assert!(after_sort > 0);

    grid.view();
    grid.visible_rows();
    grid.set_sort(Some("score"), SortDirection::Ascending).unwrap();
    grid.set_filter("name", "").unwrap();
    let mut grid = grid.with_pagination(Pagination::new(2));
    assert_eq!(count(), after_sort);

    grid.set_rows(people()).unwrap();
    assert!(count() > after_sort);
    let after_rows = count();

    grid.set_columns(grid.columns().to_vec()).unwrap();
    assert!(count() > after_rows);
}
