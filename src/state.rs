use std::collections::VecDeque;
use std::sync::Arc;

use chrono::Local;

use crate::aggregate::CategoryConfig;
use crate::catalog::PlayerCatalog;
use crate::chart::{ChartBoard, PanelCharts};
use crate::config::AppConfig;
use crate::palette::ColorSource;
use crate::panel::SelectionPanel;

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    Loading { source: String },
    Ready { players: usize, loaded_at: String },
    Failed { error: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// A panel plus the UI bits that belong to it.
#[derive(Debug, Clone)]
pub struct PanelSlot {
    pub panel: SelectionPanel,
    pub cursor: usize,
    pub board: ChartBoard,
    pub last_charts: Option<PanelCharts>,
}

impl PanelSlot {
    fn new(panel: SelectionPanel) -> Self {
        Self {
            panel,
            cursor: 0,
            board: ChartBoard::default(),
            last_charts: None,
        }
    }

    pub fn clamp_cursor(&mut self) {
        let total = self.panel.list_rows().len();
        if total == 0 {
            self.cursor = 0;
        } else if self.cursor >= total {
            self.cursor = total - 1;
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub status: CatalogStatus,
    pub panel_count: usize,
    pub categories: CategoryConfig,
    pub panels: Vec<PanelSlot>,
    pub focus: usize,
    pub input_mode: InputMode,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            status: CatalogStatus::Loading {
                source: config.data_source.clone(),
            },
            panel_count: config.panel_count,
            categories: config.categories.clone(),
            panels: Vec::with_capacity(config.panel_count),
            focus: 0,
            input_mode: InputMode::Normal,
            logs: VecDeque::with_capacity(MAX_LOGS),
            help_overlay: false,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.status, CatalogStatus::Ready { .. })
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        let stamp = Local::now().format("%H:%M:%S");
        self.logs.push_back(format!("{stamp} {}", msg.into()));
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn focused(&self) -> Option<&PanelSlot> {
        self.panels.get(self.focus)
    }

    pub fn focused_mut(&mut self) -> Option<&mut PanelSlot> {
        self.panels.get_mut(self.focus)
    }

    pub fn focus_next(&mut self) {
        if self.panels.is_empty() {
            return;
        }
        self.focus = (self.focus + 1) % self.panels.len();
    }

    pub fn focus_prev(&mut self) {
        if self.panels.is_empty() {
            return;
        }
        if self.focus == 0 {
            self.focus = self.panels.len() - 1;
        } else {
            self.focus -= 1;
        }
    }

    pub fn select_next(&mut self) {
        let Some(slot) = self.focused_mut() else {
            return;
        };
        let total = slot.panel.list_rows().len();
        if total == 0 {
            slot.cursor = 0;
            return;
        }
        slot.cursor = (slot.cursor + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let Some(slot) = self.focused_mut() else {
            return;
        };
        let total = slot.panel.list_rows().len();
        if total == 0 {
            slot.cursor = 0;
            return;
        }
        if slot.cursor == 0 {
            slot.cursor = total - 1;
        } else {
            slot.cursor -= 1;
        }
    }

    /// Flips the checkbox under the cursor of the focused panel.
    pub fn toggle_at_cursor(&mut self) -> bool {
        let Some(slot) = self.focused_mut() else {
            return false;
        };
        let Some((index, checked)) = slot
            .panel
            .list_rows()
            .get(slot.cursor)
            .map(|row| (row.index, row.checked))
        else {
            return false;
        };
        let changed = slot.panel.toggle_index(index, !checked);
        slot.clamp_cursor();
        changed
    }

    pub fn push_search_char(&mut self, ch: char) {
        let Some(slot) = self.focused_mut() else {
            return;
        };
        let mut term = slot.panel.search_term().to_string();
        term.push(ch);
        slot.panel.set_search_term(term);
        slot.clamp_cursor();
    }

    pub fn pop_search_char(&mut self) {
        let Some(slot) = self.focused_mut() else {
            return;
        };
        let mut term = slot.panel.search_term().to_string();
        term.pop();
        slot.panel.set_search_term(term);
        slot.clamp_cursor();
    }

    pub fn clear_search(&mut self) {
        let Some(slot) = self.focused_mut() else {
            return;
        };
        slot.panel.set_search_term(String::new());
        slot.clamp_cursor();
    }

    /// Display trigger for the focused panel.
    pub fn display_focused(&mut self, colors: &mut dyn ColorSource) {
        let focus = self.focus;
        if focus >= self.panels.len() {
            self.push_log("[INFO] Player data not loaded yet");
            return;
        }
        let slot = &mut self.panels[focus];
        let charts = slot.panel.display(colors, &mut slot.board);
        let selected = slot.panel.selection().len();
        let (fg, ft) = (charts.team_fg, charts.team_ft);
        slot.last_charts = Some(charts);
        self.push_log(format!(
            "[INFO] Panel {}: charted {selected} player(s), FG% {fg}, FT% {ft}",
            focus + 1
        ));
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    CatalogLoaded(PlayerCatalog),
    CatalogFailed(String),
    Log(String),
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::CatalogLoaded(catalog) => {
            if state.is_ready() {
                state.push_log("[WARN] Player data already loaded; ignoring reload");
                return;
            }
            let players = catalog.len();
            let catalog = Arc::new(catalog);
            state.panels = (0..state.panel_count)
                .map(|_| {
                    PanelSlot::new(SelectionPanel::new(
                        Arc::clone(&catalog),
                        state.categories.clone(),
                    ))
                })
                .collect();
            state.focus = 0;
            state.status = CatalogStatus::Ready {
                players,
                loaded_at: Local::now().format("%Y-%m-%d %H:%M").to_string(),
            };
            state.push_log(format!(
                "[INFO] Loaded {players} players into {} panel(s)",
                state.panels.len()
            ));
        }
        Delta::CatalogFailed(error) => {
            state.push_log(format!("[ERROR] {error}"));
            state.status = CatalogStatus::Failed { error };
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
