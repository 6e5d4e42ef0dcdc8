use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use hoops_panels::aggregate::CategoryConfig;
use hoops_panels::catalog::{PlayerCatalog, parse_catalog_json};
use hoops_panels::panel::SelectionPanel;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn catalog() -> Arc<PlayerCatalog> {
    let raw = read_fixture("players.json");
    Arc::new(parse_catalog_json(&raw, "PLAYER").expect("fixture should parse"))
}

fn panel() -> SelectionPanel {
    SelectionPanel::new(catalog(), CategoryConfig::default())
}

fn selected_names(panel: &SelectionPanel) -> Vec<String> {
    panel
        .selected_players()
        .iter()
        .map(|p| p.name().to_string())
        .collect()
}

#[test]
fn select_then_unselect_restores_selection() {
    let mut panel = panel();
    panel.toggle("Alpha Guard", true);
    panel.toggle("Gamma Center", true);
    let before = panel.selection().clone();

    assert!(panel.toggle("Beta Forward", true));
    assert!(panel.toggle("Beta Forward", false));
    assert_eq!(panel.selection(), &before);
}

#[test]
fn selecting_twice_is_a_no_op() {
    let mut panel = panel();
    assert!(panel.toggle("Alpha Guard", true));
    assert!(!panel.toggle("Alpha Guard", true));
    assert_eq!(selected_names(&panel), vec!["Alpha Guard"]);

    assert!(!panel.toggle("Beta Forward", false));
    assert_eq!(panel.selection().len(), 1);
}

#[test]
fn unknown_players_are_ignored() {
    let mut panel = panel();
    assert!(!panel.toggle("Nobody", true));
    assert!(!panel.toggle("alpha guard", true));
    assert!(panel.selection().is_empty());
    assert!(!panel.is_selected("Nobody"));
}

#[test]
fn removal_keeps_selection_order() {
    let mut panel = panel();
    panel.toggle("Gamma Center", true);
    panel.toggle("Alpha Guard", true);
    panel.toggle("Beta Forward", true);
    panel.toggle("Alpha Guard", false);
    assert_eq!(selected_names(&panel), vec!["Gamma Center", "Beta Forward"]);
}

#[test]
fn list_rows_put_selected_players_first() {
    let mut panel = panel();
    panel.toggle("Gamma Center", true);
    panel.set_search_term("alph");

    let rows: Vec<(&str, bool)> = panel
        .list_rows()
        .iter()
        .map(|row| (row.player.name(), row.checked))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Gamma Center", true),
            ("Alpha Guard", false),
            ("Alphonso Delta", false),
        ]
    );
}

#[test]
fn list_rows_do_not_repeat_selected_matches() {
    let mut panel = panel();
    panel.toggle("Alphonso Delta", true);
    panel.set_search_term("ALPHA");

    let rows: Vec<(&str, bool)> = panel
        .list_rows()
        .iter()
        .map(|row| (row.player.name(), row.checked))
        .collect();
    assert_eq!(rows, vec![("Alphonso Delta", true), ("Alpha Guard", false)]);
}

#[test]
fn selected_players_survive_any_search_term() {
    let mut panel = panel();
    panel.toggle("Nikola Jokić", true);
    panel.toggle("Beta Forward", true);

    for term in ["", "zzz", "beta", "GUARD", "ć"] {
        panel.set_search_term(term);
        let rows = panel.list_rows();
        for name in ["Nikola Jokić", "Beta Forward"] {
            assert!(
                rows.iter().any(|row| row.checked && row.player.name() == name),
                "{name} missing for term {term:?}"
            );
        }
        let unchecked: Vec<&str> = rows
            .iter()
            .filter(|row| !row.checked)
            .map(|row| row.player.name())
            .collect();
        let expected: Vec<&str> = panel
            .filter(term)
            .map(|p| p.name())
            .filter(|name| !panel.is_selected(name))
            .collect();
        assert_eq!(unchecked, expected, "term {term:?}");
    }
}

#[test]
fn filter_matches_lowercased_substring() {
    let panel = panel();
    for term in ["", "a", "CENTER", "nik", "q"] {
        let got: Vec<&str> = panel.filter(term).map(|p| p.name()).collect();
        let want: Vec<&str> = panel
            .catalog()
            .iter()
            .filter(|p| p.name().to_lowercase().contains(&term.to_lowercase()))
            .map(|p| p.name())
            .collect();
        assert_eq!(got, want, "term {term:?}");
    }
}

#[test]
fn panels_share_catalog_but_not_selection() {
    let shared = catalog();
    let mut left = SelectionPanel::new(Arc::clone(&shared), CategoryConfig::default());
    let mut right = SelectionPanel::new(Arc::clone(&shared), CategoryConfig::default());

    left.toggle("Alpha Guard", true);
    right.toggle("Beta Forward", true);
    right.set_search_term("gamma");

    assert_eq!(selected_names(&left), vec!["Alpha Guard"]);
    assert_eq!(selected_names(&right), vec!["Beta Forward"]);
    assert_eq!(left.search_term(), "");
    assert_eq!(Arc::strong_count(&shared), 3);
}

#[test]
fn toggle_by_index_ignores_out_of_range_rows() {
    let mut panel = panel();
    assert!(!panel.toggle_index(99, true));
    assert!(panel.selection().is_empty());

    assert!(panel.toggle_index(2, true));
    assert_eq!(selected_names(&panel), vec!["Gamma Center"]);
    assert!(!panel.toggle_index(2, true));
    assert!(panel.toggle_index(2, false));
    assert!(panel.selection().is_empty());
}
