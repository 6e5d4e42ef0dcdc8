use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph};

use hoops_panels::chart::{Chart, ChartSurface};
use hoops_panels::config::AppConfig;
use hoops_panels::feed::{self, LoadRequest};
use hoops_panels::palette::{self, ColorSource, Rgb};
use hoops_panels::state::{self, AppState, CatalogStatus, InputMode, PanelSlot, apply_delta};

const VALUE_SCALE: f64 = 10.0;

struct App {
    state: AppState,
    colors: Box<dyn ColorSource>,
    should_quit: bool,
}

impl App {
    fn new(config: &AppConfig) -> Self {
        Self {
            state: AppState::new(config),
            colors: palette::color_source_from_config(config),
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        // The help overlay is modal: any key only dismisses it.
        if self.state.help_overlay {
            self.state.help_overlay = false;
            return;
        }

        if self.state.input_mode == InputMode::Search {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => self.state.input_mode = InputMode::Normal,
                KeyCode::Backspace => self.state.pop_search_char(),
                KeyCode::Char(ch) => self.state.push_search_char(ch),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.state.focus_next(),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => self.state.focus_prev(),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char(' ') | KeyCode::Char('x') => {
                self.state.toggle_at_cursor();
            }
            KeyCode::Char('/') => {
                if self.state.is_ready() {
                    self.state.input_mode = InputMode::Search;
                }
            }
            KeyCode::Esc => self.state.clear_search(),
            KeyCode::Char('d') | KeyCode::Enter => {
                self.state.display_focused(self.colors.as_mut());
            }
            KeyCode::Char('?') => self.state.help_overlay = true,
            _ => {}
        }
    }
}

fn main() -> io::Result<()> {
    AppConfig::load_dotenv();
    let config = AppConfig::from_env();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    feed::spawn_catalog_loader(
        tx,
        LoadRequest {
            source: config.data_source.clone(),
            id_category: config.categories.id_category.clone(),
            timeout: config.http_timeout,
        },
    );

    let mut app = App::new(&config);
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<state::Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    if app.state.panels.is_empty() {
        render_status(frame, chunks[1], &app.state);
    } else {
        render_panels(frame, chunks[1], &app.state);
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let status = match &state.status {
        CatalogStatus::Loading { source } => format!("Loading {source}"),
        CatalogStatus::Ready { players, loaded_at } => {
            format!("{players} players | loaded {loaded_at}")
        }
        CatalogStatus::Failed { .. } => "Load failed".to_string(),
    };
    format!(" HOOPS PANELS | {status}")
}

fn footer_text(state: &AppState) -> String {
    match state.input_mode {
        InputMode::Search => "Type to filter | Backspace Delete | Enter/Esc Done".to_string(),
        InputMode::Normal => {
            "Tab/←/→ Panel | j/k/↑/↓ Move | Space Toggle | / Search | Esc Clear search | d/Enter Chart | ? Help | q Quit"
                .to_string()
        }
    }
}

fn render_status(frame: &mut Frame, area: Rect, state: &AppState) {
    let (text, style) = match &state.status {
        CatalogStatus::Loading { source } => (
            format!("Loading player data from {source}..."),
            Style::default().fg(Color::DarkGray),
        ),
        CatalogStatus::Failed { error } => (error.clone(), Style::default().fg(Color::Red)),
        CatalogStatus::Ready { .. } => (
            "No panels configured".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, area);
}

fn render_panels(frame: &mut Frame, area: Rect, state: &AppState) {
    let count = state.panels.len() as u32;
    let constraints: Vec<Constraint> = (0..count).map(|_| Constraint::Ratio(1, count)).collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (idx, slot) in state.panels.iter().enumerate() {
        let focused = idx == state.focus;
        render_panel(frame, columns[idx], idx, slot, focused, state.input_mode);
    }
}

fn render_panel(
    frame: &mut Frame,
    area: Rect,
    idx: usize,
    slot: &PanelSlot,
    focused: bool,
    mode: InputMode,
) {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let selected = slot.panel.selection().len();
    let block = Block::default()
        .title(format!("Panel {} ({selected} selected)", idx + 1))
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(inner);

    let editing = focused && mode == InputMode::Search;
    let search_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let cursor = if editing { "_" } else { "" };
    let search = Paragraph::new(format!("{}{cursor}", slot.panel.search_term()))
        .style(search_style)
        .block(Block::default().title("Search").borders(Borders::ALL));
    frame.render_widget(search, rows[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(10)])
        .split(rows[1]);

    render_player_list(frame, body[0], slot, focused);
    render_chart_grid(frame, body[1], slot);
}

fn render_player_list(frame: &mut Frame, area: Rect, slot: &PanelSlot, focused: bool) {
    let block = Block::default().title("Players").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let rows = slot.panel.list_rows();
    if rows.is_empty() {
        let empty = Paragraph::new("No players match").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let visible = inner.height as usize;
    let (start, end) = visible_range(slot.cursor, rows.len(), visible);
    let lines: Vec<Line> = rows[start..end]
        .iter()
        .enumerate()
        .map(|(offset, row)| {
            let mark = if row.checked { "[x]" } else { "[ ]" };
            let text = format!("{mark} {}", row.player.name());
            let mut style = Style::default();
            if row.checked {
                style = style.fg(Color::Green);
            }
            if focused && start + offset == slot.cursor {
                style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
            }
            Line::styled(text, style)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_chart_grid(frame: &mut Frame, area: Rect, slot: &PanelSlot) {
    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(halves[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(halves[1]);

    let cells = [top[0], top[1], bottom[0], bottom[1]];
    for (surface, cell) in ChartSurface::ALL.into_iter().zip(cells) {
        render_chart(frame, cell, surface, slot.board.get(surface));
    }
}

fn render_chart(frame: &mut Frame, area: Rect, surface: ChartSurface, chart: Option<&Chart>) {
    let block = Block::default().title(surface.title()).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let Some(chart) = chart else {
        let hint = Paragraph::new("Press d to chart").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, inner);
        return;
    };
    if chart.data.is_empty() {
        let empty = Paragraph::new("No data").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let legend_height = if chart.options.show_legend && inner.height > 3 {
        1
    } else {
        0
    };
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(legend_height)])
        .split(inner);

    frame.render_widget(bar_chart(chart), parts[0]);
    if legend_height > 0 {
        frame.render_widget(Paragraph::new(legend_line(chart)), parts[1]);
    }
}

fn bar_chart(chart: &Chart) -> BarChart<'_> {
    let mut widget = BarChart::default().bar_width(3).bar_gap(0).group_gap(1);
    for (idx, label) in chart.data.labels.iter().enumerate() {
        let bars: Vec<Bar> = chart
            .data
            .datasets
            .iter()
            .filter_map(|dataset| {
                let value = *dataset.data.get(idx)?;
                let color = dataset
                    .colors
                    .for_bar(idx)
                    .map(|pair| to_color(pair.border.rgb))
                    .unwrap_or(Color::Blue);
                Some(
                    Bar::default()
                        .value(scaled(value))
                        .text_value(format!("{value:.1}"))
                        .style(Style::default().fg(color)),
                )
            })
            .collect();
        widget = widget.data(
            BarGroup::default()
                .label(Line::from(label.as_str()))
                .bars(&bars),
        );
    }
    let max = scaled(chart.data.max_value()).max(1);
    widget.max(max)
}

fn legend_line(chart: &Chart) -> Line<'_> {
    let spans: Vec<Span> = chart
        .data
        .datasets
        .iter()
        .flat_map(|dataset| {
            let color = dataset
                .colors
                .for_bar(0)
                .map(|pair| to_color(pair.border.rgb))
                .unwrap_or(Color::Blue);
            [
                Span::styled("■ ", Style::default().fg(color)),
                Span::raw(format!("{}  ", dataset.label)),
            ]
        })
        .collect();
    Line::from(spans)
}

// Terminal bars are unsigned and always start at zero.
fn scaled(value: f64) -> u64 {
    (value.max(0.0) * VALUE_SCALE).round() as u64
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    let start = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Hoops Panels - Help",
        "",
        "Panels:",
        "  Tab / ← / →  Switch panel",
        "  j/k or ↑/↓   Move in player list",
        "  Space / x    Toggle player",
        "  /            Edit search (Enter/Esc to finish)",
        "  Esc          Clear search",
        "  d / Enter    Chart selected players",
        "",
        "Global:",
        "  ?            Help (any key closes)",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
