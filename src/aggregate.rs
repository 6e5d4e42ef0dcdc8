use std::fmt;

use crate::catalog::PlayerRecord;

pub const ID_CATEGORY: &str = "PLAYER";

/// Metadata and derived columns that never take part in the per-category sums.
pub const EXCLUDED_CATEGORIES: [&str; 13] = [
    "POS",
    "TEAM",
    "GP",
    "MPG",
    "FG Volume",
    "FG Volume (Makes)",
    "FG Volume (Attempts)",
    "FT Volume",
    "FT Volume (Makes)",
    "FT Volume (Attempts)",
    "FT%",
    "FG%",
    "TOTAL",
];

pub const FG_MAKES: &str = "FG Volume (Makes)";
pub const FG_ATTEMPTS: &str = "FG Volume (Attempts)";
pub const FT_MAKES: &str = "FT Volume (Makes)";
pub const FT_ATTEMPTS: &str = "FT Volume (Attempts)";

pub const SHOOTING_CATEGORIES: [&str; 4] = [FG_MAKES, FG_ATTEMPTS, FT_MAKES, FT_ATTEMPTS];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryConfig {
    pub id_category: String,
    pub excluded: Vec<String>,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self::new(ID_CATEGORY, EXCLUDED_CATEGORIES)
    }
}

impl CategoryConfig {
    pub fn new<I, S>(id_category: impl Into<String>, excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id_category: id_category.into(),
            excluded: excluded.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_aggregable(&self, category: &str) -> bool {
        category != self.id_category && !self.excluded.iter().any(|c| c == category)
    }
}

/// Aggregable categories in the key order of the first selected record.
pub fn aggregable_categories<'a>(
    selection: &[&'a PlayerRecord],
    config: &CategoryConfig,
) -> Vec<&'a str> {
    let Some(first) = selection.first().copied() else {
        return Vec::new();
    };
    first
        .categories()
        .filter(|c| config.is_aggregable(c))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummedCategories {
    entries: Vec<(String, f64)>,
}

impl SummedCategories {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, sum)| *sum)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, sum)| *sum)
    }
}

pub fn sum_categories(selection: &[&PlayerRecord], config: &CategoryConfig) -> SummedCategories {
    let entries = aggregable_categories(selection, config)
        .into_iter()
        .map(|category| {
            let sum = sum_category(selection, category);
            (category.to_string(), sum)
        })
        .collect();
    SummedCategories { entries }
}

pub fn sum_category(selection: &[&PlayerRecord], category: &str) -> f64 {
    selection.iter().map(|p| p.stat_or_zero(category)).sum()
}

/// Team shooting percentage over a selection. A zero denominator is `Undefined`, never NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TeamPercentage {
    Value(f64),
    Undefined,
}

impl TeamPercentage {
    pub fn value(self) -> Option<f64> {
        match self {
            TeamPercentage::Value(v) => Some(v),
            TeamPercentage::Undefined => None,
        }
    }

    pub fn chart_value(self) -> f64 {
        self.value().unwrap_or(0.0)
    }
}

impl fmt::Display for TeamPercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamPercentage::Value(v) => write!(f, "{v:.2}"),
            TeamPercentage::Undefined => f.write_str("n/a"),
        }
    }
}

pub fn team_percentage(
    selection: &[&PlayerRecord],
    makes_category: &str,
    attempts_category: &str,
) -> TeamPercentage {
    let makes = sum_category(selection, makes_category);
    let attempts = sum_category(selection, attempts_category);
    if attempts == 0.0 {
        return TeamPercentage::Undefined;
    }
    let pct = makes / attempts * 100.0;
    if !pct.is_finite() {
        return TeamPercentage::Undefined;
    }
    TeamPercentage::Value((pct * 100.0).round() / 100.0)
}
