use std::env;
use std::time::Duration;

use crate::aggregate::CategoryConfig;

pub const DEFAULT_DATA_SOURCE: &str = "sortedPlayers.json";
pub const DEFAULT_PANEL_COUNT: usize = 2;
pub const MAX_PANEL_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteMode {
    Random,
    Fixed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_source: String,
    pub panel_count: usize,
    pub categories: CategoryConfig,
    pub palette: PaletteMode,
    pub color_seed: Option<u64>,
    pub http_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    pub fn load_dotenv() {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let data_source = var("HOOPS_DATA_SOURCE").unwrap_or_else(|| DEFAULT_DATA_SOURCE.to_string());
        let panel_count = var("HOOPS_PANELS")
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(DEFAULT_PANEL_COUNT)
            .clamp(1, MAX_PANEL_COUNT);

        let mut categories = CategoryConfig::default();
        if let Some(id) = var("HOOPS_ID_CATEGORY") {
            categories.id_category = id;
        }
        if let Some(raw) = var("HOOPS_EXCLUDED_CATEGORIES") {
            categories.excluded = parse_list(&raw);
        }

        let palette = match var("HOOPS_PALETTE").map(|v| v.to_lowercase()).as_deref() {
            Some("fixed") => PaletteMode::Fixed,
            _ => PaletteMode::Random,
        };
        let color_seed = var("HOOPS_COLOR_SEED").and_then(|val| val.parse::<u64>().ok());
        let http_timeout = var("HOOPS_HTTP_TIMEOUT_SECS")
            .and_then(|val| val.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Self {
            data_source,
            panel_count,
            categories,
            palette,
            color_seed,
            http_timeout,
        }
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
