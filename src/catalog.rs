use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde_json::{Map, Value};

use crate::http_client;

/// One roster row. Stat keys keep the order they had in the source document.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    name: String,
    search_key: String,
    stats: Map<String, Value>,
}

impl PlayerRecord {
    pub fn new(name: impl Into<String>, stats: Map<String, Value>) -> Self {
        let name = name.into();
        let search_key = name.to_lowercase();
        Self {
            name,
            search_key,
            stats,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.stats.keys().map(String::as_str)
    }

    pub fn value(&self, category: &str) -> Option<&Value> {
        self.stats.get(category)
    }

    pub fn stat(&self, category: &str) -> Option<f64> {
        self.stats.get(category).and_then(Value::as_f64)
    }

    /// Missing or non-numeric values count as zero.
    pub fn stat_or_zero(&self, category: &str) -> f64 {
        self.stat(category).unwrap_or(0.0)
    }

    pub fn text(&self, category: &str) -> Option<&str> {
        self.stats.get(category).and_then(Value::as_str)
    }

    pub fn matches_search(&self, lowered_term: &str) -> bool {
        self.search_key.contains(lowered_term)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerCatalog {
    players: Vec<PlayerRecord>,
}

impl PlayerCatalog {
    pub fn from_records(players: Vec<PlayerRecord>) -> Self {
        Self { players }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&PlayerRecord> {
        self.players.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlayerRecord> {
        self.players.iter()
    }

    /// First record whose name equals `name` exactly.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.name == name)
    }

    /// Case-insensitive substring match on the player name. The returned iterator is lazy
    /// and can be cloned to walk the matches again.
    pub fn filter<'a>(
        &'a self,
        term: &str,
    ) -> impl Iterator<Item = &'a PlayerRecord> + Clone + use<'a> {
        let needle = term.to_lowercase();
        self.players
            .iter()
            .filter(move |p| p.matches_search(&needle))
    }
}

pub fn parse_catalog_json(raw: &str, id_category: &str) -> Result<PlayerCatalog> {
    let rows: Vec<Map<String, Value>> =
        serde_json::from_str(raw).context("player data is not a JSON array of objects")?;
    let mut players = Vec::with_capacity(rows.len());
    for (idx, row) in rows.into_iter().enumerate() {
        let name = match row.get(id_category) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => return Err(anyhow!("player #{idx} has no {id_category} value")),
        };
        players.push(PlayerRecord::new(name, row));
    }
    Ok(PlayerCatalog::from_records(players))
}

pub fn is_remote_source(source: &str) -> bool {
    let lower = source.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Reads the catalog from an `http(s)://` URL or a local file path.
pub fn load_catalog(
    source: &str,
    id_category: &str,
    timeout: Option<Duration>,
) -> Result<PlayerCatalog> {
    let source = source.trim();
    let raw = if is_remote_source(source) {
        let client = http_client::http_client(timeout)?;
        http_client::fetch_text(client, source)
            .with_context(|| format!("fetch {source}"))?
    } else {
        fs::read_to_string(Path::new(source)).with_context(|| format!("read {source}"))?
    };
    parse_catalog_json(&raw, id_category).with_context(|| format!("parse {source}"))
}
