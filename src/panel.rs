use std::sync::Arc;

use crate::aggregate::{self, CategoryConfig, SummedCategories, TeamPercentage};
use crate::catalog::{PlayerCatalog, PlayerRecord};
use crate::chart::{ChartRenderer, PanelCharts};
use crate::palette::ColorSource;
use crate::selection::SelectionSet;

/// A row of the checkbox list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListRow<'a> {
    /// Position of `player` in the catalog.
    pub index: usize,
    pub player: &'a PlayerRecord,
    pub checked: bool,
}

/// One independent selection over the shared catalog.
#[derive(Debug, Clone)]
pub struct SelectionPanel {
    catalog: Arc<PlayerCatalog>,
    categories: CategoryConfig,
    selection: SelectionSet,
    search: String,
}

impl SelectionPanel {
    pub fn new(catalog: Arc<PlayerCatalog>, categories: CategoryConfig) -> Self {
        Self {
            catalog,
            categories,
            selection: SelectionSet::new(),
            search: String::new(),
        }
    }

    pub fn catalog(&self) -> &PlayerCatalog {
        &self.catalog
    }

    pub fn categories(&self) -> &CategoryConfig {
        &self.categories
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn is_selected(&self, player_id: &str) -> bool {
        self.catalog
            .position(player_id)
            .is_some_and(|idx| self.selection.contains(idx))
    }

    /// Applies a checkbox change. Unknown ids and already-consistent states leave the
    /// selection untouched. Returns whether the selection changed.
    pub fn toggle(&mut self, player_id: &str, checked: bool) -> bool {
        let Some(idx) = self.catalog.position(player_id) else {
            return false;
        };
        self.toggle_index(idx, checked)
    }

    /// Same as `toggle`, addressing the record by catalog position.
    pub fn toggle_index(&mut self, idx: usize, checked: bool) -> bool {
        if idx >= self.catalog.len() {
            return false;
        }
        if checked {
            self.selection.insert(idx)
        } else {
            self.selection.remove(idx)
        }
    }

    pub fn selected_players(&self) -> Vec<&PlayerRecord> {
        self.selection
            .indices()
            .iter()
            .filter_map(|idx| self.catalog.get(*idx))
            .collect()
    }

    pub fn filter<'a>(
        &'a self,
        term: &str,
    ) -> impl Iterator<Item = &'a PlayerRecord> + Clone + use<'a> {
        self.catalog.filter(term)
    }

    /// Selected players first, whatever the search term, then unselected matches.
    pub fn list_rows(&self) -> Vec<ListRow<'_>> {
        let selected = self.selection.indices();
        let mut rows: Vec<ListRow<'_>> = selected
            .iter()
            .filter_map(|&index| {
                self.catalog.get(index).map(|player| ListRow {
                    index,
                    player,
                    checked: true,
                })
            })
            .collect();
        let needle = self.search.to_lowercase();
        rows.extend(
            self.catalog
                .iter()
                .enumerate()
                .filter(|(idx, _)| !selected.contains(idx))
                .filter(|(_, p)| p.matches_search(&needle))
                .map(|(index, player)| ListRow {
                    index,
                    player,
                    checked: false,
                }),
        );
        rows
    }

    pub fn summed_categories(&self) -> SummedCategories {
        aggregate::sum_categories(&self.selected_players(), &self.categories)
    }

    pub fn team_percentage(&self, makes_category: &str, attempts_category: &str) -> TeamPercentage {
        aggregate::team_percentage(&self.selected_players(), makes_category, attempts_category)
    }

    pub fn project(&self, colors: &mut dyn ColorSource) -> PanelCharts {
        PanelCharts::build(&self.selected_players(), &self.categories, colors)
    }

    /// Rebuilds all charts from the current selection and hands them to `renderer`.
    pub fn display(
        &self,
        colors: &mut dyn ColorSource,
        renderer: &mut dyn ChartRenderer,
    ) -> PanelCharts {
        let charts = self.project(colors);
        charts.render_into(renderer);
        charts
    }
}
