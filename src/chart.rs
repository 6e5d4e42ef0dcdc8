use std::collections::HashMap;
use std::fmt::Write as _;

use crate::aggregate::{
    self, CategoryConfig, FG_ATTEMPTS, FG_MAKES, FT_ATTEMPTS, FT_MAKES, SHOOTING_CATEGORIES,
    SummedCategories, TeamPercentage,
};
use crate::catalog::PlayerRecord;
use crate::palette::{ColorPair, ColorSource, SUM_COLOR, TEAM_FG_COLOR, TEAM_FT_COLOR};

pub const SUM_DATASET_LABEL: &str = "Sum of Categories";
pub const TEAM_DATASET_LABEL: &str = "Team Percentage";
pub const TEAM_FG_LABEL: &str = "Team FG%";
pub const TEAM_FT_LABEL: &str = "Team FT%";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartSurface {
    Players,
    Shooting,
    Sum,
    TeamPercentage,
}

impl ChartSurface {
    pub const ALL: [ChartSurface; 4] = [
        ChartSurface::Players,
        ChartSurface::Sum,
        ChartSurface::Shooting,
        ChartSurface::TeamPercentage,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartSurface::Players => "Players",
            ChartSurface::Shooting => "Shooting Volume",
            ChartSurface::Sum => "Category Sums",
            ChartSurface::TeamPercentage => "Team Shooting %",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DatasetColors {
    Uniform(ColorPair),
    PerBar(Vec<ColorPair>),
}

impl DatasetColors {
    pub fn for_bar(&self, idx: usize) -> Option<ColorPair> {
        match self {
            DatasetColors::Uniform(pair) => Some(*pair),
            DatasetColors::PerBar(pairs) => pairs.get(idx).copied(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub colors: DatasetColors,
    pub border_width: u16,
}

impl ChartDataset {
    pub fn new(label: impl Into<String>, data: Vec<f64>, colors: DatasetColors) -> Self {
        Self {
            label: label.into(),
            data,
            colors,
            border_width: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() || self.datasets.is_empty()
    }

    pub fn max_value(&self) -> f64 {
        self.datasets
            .iter()
            .flat_map(|d| d.data.iter().copied())
            .fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    pub kind: ChartKind,
    pub begin_at_zero: bool,
    pub show_legend: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            kind: ChartKind::Bar,
            begin_at_zero: true,
            show_legend: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chart {
    pub data: ChartData,
    pub options: ChartOptions,
}

/// Anything that can draw a chart onto a named surface.
pub trait ChartRenderer {
    fn render(&mut self, surface: ChartSurface, chart: &Chart);
}

/// The four charts produced by one display trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelCharts {
    pub players: Chart,
    pub sum: Chart,
    pub shooting: Chart,
    pub team_percentage: Chart,
    pub sums: SummedCategories,
    pub team_fg: TeamPercentage,
    pub team_ft: TeamPercentage,
}

impl PanelCharts {
    pub fn build(
        selection: &[&PlayerRecord],
        config: &CategoryConfig,
        colors: &mut dyn ColorSource,
    ) -> Self {
        let sums = aggregate::sum_categories(selection, config);
        let players = player_chart(selection, &sums, colors);
        let sum = sum_chart(&sums);
        let shooting = shooting_chart(selection, colors);
        let team_fg = aggregate::team_percentage(selection, FG_MAKES, FG_ATTEMPTS);
        let team_ft = aggregate::team_percentage(selection, FT_MAKES, FT_ATTEMPTS);
        let team_percentage = team_percentage_chart(team_fg, team_ft);
        Self {
            players,
            sum,
            shooting,
            team_percentage,
            sums,
            team_fg,
            team_ft,
        }
    }

    pub fn get(&self, surface: ChartSurface) -> &Chart {
        match surface {
            ChartSurface::Players => &self.players,
            ChartSurface::Shooting => &self.shooting,
            ChartSurface::Sum => &self.sum,
            ChartSurface::TeamPercentage => &self.team_percentage,
        }
    }

    pub fn render_into(&self, renderer: &mut dyn ChartRenderer) {
        for surface in ChartSurface::ALL {
            renderer.render(surface, self.get(surface));
        }
    }
}

/// One dataset per selected player, values in the order of the summed categories.
pub fn player_chart(
    selection: &[&PlayerRecord],
    sums: &SummedCategories,
    colors: &mut dyn ColorSource,
) -> Chart {
    let labels: Vec<String> = sums.categories().map(str::to_string).collect();
    let datasets = selection
        .iter()
        .map(|player| {
            let data = labels.iter().map(|c| player.stat_or_zero(c)).collect();
            ChartDataset::new(player.name(), data, DatasetColors::Uniform(colors.next_pair()))
        })
        .collect();
    Chart {
        data: ChartData { labels, datasets },
        options: ChartOptions::default(),
    }
}

pub fn sum_chart(sums: &SummedCategories) -> Chart {
    let labels = sums.categories().map(str::to_string).collect();
    let dataset = ChartDataset::new(
        SUM_DATASET_LABEL,
        sums.values().collect(),
        DatasetColors::Uniform(ColorPair::from_rgb(SUM_COLOR)),
    );
    Chart {
        data: ChartData {
            labels,
            datasets: vec![dataset],
        },
        options: ChartOptions::default(),
    }
}

pub fn shooting_chart(selection: &[&PlayerRecord], colors: &mut dyn ColorSource) -> Chart {
    let labels = SHOOTING_CATEGORIES.iter().map(|c| c.to_string()).collect();
    let datasets = selection
        .iter()
        .map(|player| {
            let data = SHOOTING_CATEGORIES
                .iter()
                .map(|c| player.stat_or_zero(c))
                .collect();
            ChartDataset::new(player.name(), data, DatasetColors::Uniform(colors.next_pair()))
        })
        .collect();
    Chart {
        data: ChartData { labels, datasets },
        options: ChartOptions::default(),
    }
}

pub fn team_percentage_chart(team_fg: TeamPercentage, team_ft: TeamPercentage) -> Chart {
    let dataset = ChartDataset::new(
        TEAM_DATASET_LABEL,
        vec![team_fg.chart_value(), team_ft.chart_value()],
        DatasetColors::PerBar(vec![
            ColorPair::from_rgb(TEAM_FG_COLOR),
            ColorPair::from_rgb(TEAM_FT_COLOR),
        ]),
    );
    Chart {
        data: ChartData {
            labels: vec![TEAM_FG_LABEL.to_string(), TEAM_FT_LABEL.to_string()],
            datasets: vec![dataset],
        },
        options: ChartOptions {
            show_legend: false,
            ..ChartOptions::default()
        },
    }
}

/// Keeps the most recent chart per surface; the terminal UI draws from here.
#[derive(Debug, Clone, Default)]
pub struct ChartBoard {
    charts: HashMap<ChartSurface, Chart>,
}

impl ChartBoard {
    pub fn get(&self, surface: ChartSurface) -> Option<&Chart> {
        self.charts.get(&surface)
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

impl ChartRenderer for ChartBoard {
    fn render(&mut self, surface: ChartSurface, chart: &Chart) {
        self.charts.insert(surface, chart.clone());
    }
}

/// Plain-text rendering, one block per surface.
#[derive(Debug, Clone, Default)]
pub struct TextChartRenderer {
    pub out: String,
}

impl ChartRenderer for TextChartRenderer {
    fn render(&mut self, surface: ChartSurface, chart: &Chart) {
        let _ = writeln!(self.out, "== {} ==", surface.title());
        if chart.data.is_empty() {
            let _ = writeln!(self.out, "(no data)");
            return;
        }
        let _ = writeln!(self.out, "{}", chart.data.labels.join(" | "));
        for dataset in &chart.data.datasets {
            let values = dataset
                .data
                .iter()
                .map(|v| format!("{v:.2}"))
                .collect::<Vec<_>>()
                .join(" | ");
            if chart.options.show_legend {
                let _ = writeln!(self.out, "{}: {values}", dataset.label);
            } else {
                let _ = writeln!(self.out, "{values}");
            }
        }
    }
}
