use std::fs;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use hoops_panels::catalog::{PlayerCatalog, parse_catalog_json};
use hoops_panels::chart::ChartSurface;
use hoops_panels::config::AppConfig;
use hoops_panels::feed::{LoadRequest, spawn_catalog_loader};
use hoops_panels::palette::FixedPalette;
use hoops_panels::state::{AppState, CatalogStatus, Delta, apply_delta};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn fixture_catalog() -> PlayerCatalog {
    let raw =
        fs::read_to_string(fixture_path("players.json")).expect("fixture file should be readable");
    parse_catalog_json(&raw, "PLAYER").expect("fixture should parse")
}

fn loaded_state() -> AppState {
    let mut state = AppState::new(&AppConfig::default());
    apply_delta(&mut state, Delta::CatalogLoaded(fixture_catalog()));
    state
}

fn logs_contain(state: &AppState, needle: &str) -> bool {
    state.logs.iter().any(|line| line.contains(needle))
}

#[test]
fn starts_loading_without_panels() {
    let mut state = AppState::new(&AppConfig::default());
    assert!(matches!(state.status, CatalogStatus::Loading { .. }));
    assert!(state.panels.is_empty());

    state.display_focused(&mut FixedPalette::default());
    state.toggle_at_cursor();
    assert!(logs_contain(&state, "not loaded yet"));
}

#[test]
fn catalog_load_creates_configured_panels() {
    let state = loaded_state();
    assert_eq!(state.panels.len(), 2);
    assert!(matches!(state.status, CatalogStatus::Ready { players: 5, .. }));
    assert!(logs_contain(&state, "[INFO] Loaded 5 players into 2 panel(s)"));
    assert!(state.panels.iter().all(|slot| slot.panel.selection().is_empty()));
}

#[test]
fn second_catalog_load_is_ignored() {
    let mut state = loaded_state();
    state.toggle_at_cursor();
    apply_delta(&mut state, Delta::CatalogLoaded(PlayerCatalog::default()));
    assert!(logs_contain(&state, "[WARN]"));
    assert_eq!(state.panels[0].panel.selection().len(), 1);
    assert_eq!(state.panels[0].panel.catalog().len(), 5);
}

#[test]
fn catalog_failure_is_logged_only() {
    let mut state = AppState::new(&AppConfig::default());
    apply_delta(
        &mut state,
        Delta::CatalogFailed("Failed to load player data: http 404".to_string()),
    );
    assert!(state.panels.is_empty());
    assert!(matches!(state.status, CatalogStatus::Failed { .. }));
    assert!(logs_contain(&state, "[ERROR] Failed to load player data"));
}

#[test]
fn toggle_at_cursor_flips_the_row() {
    let mut state = loaded_state();
    state.select_next();
    assert!(state.toggle_at_cursor());
    let slot = &state.panels[0];
    let rows = slot.panel.list_rows();
    assert_eq!(rows[0].player.name(), "Beta Forward");
    assert!(rows[0].checked);

    state.panels[0].cursor = 0;
    assert!(state.toggle_at_cursor());
    assert!(state.panels[0].panel.selection().is_empty());
}

#[test]
fn search_input_narrows_list_and_clamps_cursor() {
    let mut state = loaded_state();
    state.select_prev();
    assert_eq!(state.panels[0].cursor, 4);

    for ch in "gam".chars() {
        state.push_search_char(ch);
    }
    let slot = &state.panels[0];
    assert_eq!(slot.panel.search_term(), "gam");
    assert_eq!(slot.panel.list_rows().len(), 1);
    assert_eq!(slot.cursor, 0);

    state.pop_search_char();
    assert_eq!(state.panels[0].panel.search_term(), "ga");
    state.clear_search();
    assert_eq!(state.panels[0].panel.list_rows().len(), 5);
}

#[test]
fn focus_switches_between_independent_panels() {
    let mut state = loaded_state();
    state.toggle_at_cursor();
    state.focus_next();
    assert_eq!(state.focus, 1);
    state.select_next();
    state.select_next();
    state.toggle_at_cursor();

    assert_eq!(state.panels[0].panel.selected_players()[0].name(), "Alpha Guard");
    assert_eq!(state.panels[1].panel.selected_players()[0].name(), "Gamma Center");

    state.focus_next();
    assert_eq!(state.focus, 0);
    state.focus_prev();
    assert_eq!(state.focus, 1);
}

#[test]
fn display_fills_the_chart_board() {
    let mut state = loaded_state();
    state.toggle_at_cursor();
    state.display_focused(&mut FixedPalette::default());

    let slot = &state.panels[0];
    for surface in ChartSurface::ALL {
        assert!(slot.board.get(surface).is_some(), "{surface:?} missing");
    }
    assert!(state.panels[1].board.is_empty());
    let charts = slot.last_charts.as_ref().expect("charts kept");
    assert_eq!(charts.team_fg.to_string(), "50.00");
    assert!(logs_contain(&state, "Panel 1: charted 1 player(s), FG% 50.00, FT% 80.00"));
}

#[test]
fn loader_reports_catalog_from_disk() {
    let (tx, rx) = mpsc::channel();
    let handle = spawn_catalog_loader(
        tx,
        LoadRequest {
            source: fixture_path("players.json").display().to_string(),
            id_category: "PLAYER".to_string(),
            timeout: None,
        },
    );
    handle.join().expect("loader thread");

    let deltas: Vec<Delta> = rx
        .recv_timeout(Duration::from_secs(1))
        .into_iter()
        .chain(rx.try_iter())
        .collect();
    assert!(matches!(deltas.first(), Some(Delta::Log(_))));
    match deltas.last() {
        Some(Delta::CatalogLoaded(catalog)) => assert_eq!(catalog.len(), 5),
        other => panic!("unexpected delta: {other:?}"),
    }
}

#[test]
fn loader_reports_failure_once() {
    let (tx, rx) = mpsc::channel();
    spawn_catalog_loader(
        tx,
        LoadRequest {
            source: "/missing/sortedPlayers.json".to_string(),
            id_category: "PLAYER".to_string(),
            timeout: None,
        },
    )
    .join()
    .expect("loader thread");

    let failures: Vec<String> = rx
        .try_iter()
        .filter_map(|delta| match delta {
            Delta::CatalogFailed(msg) => Some(msg),
            _ => None,
        })
        .collect();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].starts_with("Failed to load player data"));
}

#[test]
fn toggle_at_cursor_targets_the_exact_row_for_repeated_names() {
    let raw = r#"[
        {"PLAYER": "Twin", "PTS": 10},
        {"PLAYER": "Twin", "PTS": 20},
        {"PLAYER": "Solo", "PTS": 5}
    ]"#;
    let catalog = parse_catalog_json(raw, "PLAYER").expect("inline catalog should parse");
    let mut state = AppState::new(&AppConfig::default());
    apply_delta(&mut state, Delta::CatalogLoaded(catalog));

    state.select_next();
    assert!(state.toggle_at_cursor());
    assert_eq!(state.panels[0].panel.selection().indices(), &[1]);
    assert_eq!(state.panels[0].panel.selected_players()[0].stat("PTS"), Some(20.0));

    let rows = state.panels[0].panel.list_rows();
    assert_eq!(rows[0].index, 1);
    assert!(rows[0].checked);
    assert_eq!(rows[1].index, 0);
    assert!(!rows[1].checked);

    state.panels[0].cursor = 0;
    assert!(state.toggle_at_cursor());
    assert!(state.panels[0].panel.selection().is_empty());
}
