use std::collections::HashMap;
use std::time::Duration;

use hoops_panels::aggregate::{CategoryConfig, EXCLUDED_CATEGORIES};
use hoops_panels::config::{AppConfig, DEFAULT_DATA_SOURCE, PaletteMode};

fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AppConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_match_the_reference_deployment() {
    let config = config_from(&[]);
    assert_eq!(config.data_source, DEFAULT_DATA_SOURCE);
    assert_eq!(config.panel_count, 2);
    assert_eq!(config.categories, CategoryConfig::default());
    assert_eq!(config.categories.id_category, "PLAYER");
    assert_eq!(config.categories.excluded.len(), EXCLUDED_CATEGORIES.len());
    assert_eq!(config.palette, PaletteMode::Random);
    assert_eq!(config.color_seed, None);
    assert_eq!(config.http_timeout, None);
}

#[test]
fn reads_overrides() {
    let config = config_from(&[
        ("HOOPS_DATA_SOURCE", " https://example.com/players.json "),
        ("HOOPS_PANELS", "3"),
        ("HOOPS_ID_CATEGORY", "NAME"),
        ("HOOPS_EXCLUDED_CATEGORIES", "POS, TEAM,,GP "),
        ("HOOPS_PALETTE", "Fixed"),
        ("HOOPS_COLOR_SEED", "42"),
        ("HOOPS_HTTP_TIMEOUT_SECS", "15"),
    ]);
    assert_eq!(config.data_source, "https://example.com/players.json");
    assert_eq!(config.panel_count, 3);
    assert_eq!(config.categories.id_category, "NAME");
    assert_eq!(config.categories.excluded, vec!["POS", "TEAM", "GP"]);
    assert_eq!(config.palette, PaletteMode::Fixed);
    assert_eq!(config.color_seed, Some(42));
    assert_eq!(config.http_timeout, Some(Duration::from_secs(15)));
}

#[test]
fn clamps_and_ignores_bad_values() {
    let config = config_from(&[
        ("HOOPS_PANELS", "12"),
        ("HOOPS_COLOR_SEED", "not-a-number"),
        ("HOOPS_HTTP_TIMEOUT_SECS", "0"),
        ("HOOPS_DATA_SOURCE", "   "),
    ]);
    assert_eq!(config.panel_count, 4);
    assert_eq!(config.color_seed, None);
    assert_eq!(config.http_timeout, None);
    assert_eq!(config.data_source, DEFAULT_DATA_SOURCE);

    assert_eq!(config_from(&[("HOOPS_PANELS", "0")]).panel_count, 1);
}
