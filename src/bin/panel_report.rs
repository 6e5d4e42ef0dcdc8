use std::sync::Arc;

use anyhow::{Context, Result};

use hoops_panels::catalog;
use hoops_panels::chart::TextChartRenderer;
use hoops_panels::config::AppConfig;
use hoops_panels::palette;
use hoops_panels::panel::SelectionPanel;

fn main() -> Result<()> {
    AppConfig::load_dotenv();
    let config = AppConfig::from_env();
    let args = ReportArgs::parse(std::env::args().skip(1).collect());

    let source = args.source.unwrap_or_else(|| config.data_source.clone());
    let catalog = catalog::load_catalog(&source, &config.categories.id_category, config.http_timeout)
        .context("unable to load player data")?;

    let mut panel = SelectionPanel::new(Arc::new(catalog), config.categories.clone());
    for name in &args.players {
        if !panel.toggle(name, true) && !panel.is_selected(name) {
            eprintln!("unknown player: {name}");
        }
    }
    if let Some(term) = args.search {
        panel.set_search_term(term);
    }

    println!("Source: {source}");
    println!("Players: {}", panel.catalog().len());
    println!();
    for row in panel.list_rows() {
        let mark = if row.checked { "[x]" } else { "[ ]" };
        println!("{mark} {}", row.player.name());
    }
    println!();

    let mut colors = palette::color_source_from_config(&config);
    let mut renderer = TextChartRenderer::default();
    let charts = panel.display(colors.as_mut(), &mut renderer);
    print!("{}", renderer.out);
    println!();
    println!("Team FG%: {}", charts.team_fg);
    println!("Team FT%: {}", charts.team_ft);

    Ok(())
}

#[derive(Debug, Default)]
struct ReportArgs {
    source: Option<String>,
    players: Vec<String>,
    search: Option<String>,
}

impl ReportArgs {
    fn parse(args: Vec<String>) -> Self {
        let mut out = ReportArgs::default();
        let mut idx = 0;
        while idx < args.len() {
            let arg = &args[idx];
            if let Some(value) = arg.strip_prefix("--source=") {
                out.source = non_empty(value);
            } else if let Some(value) = arg.strip_prefix("--player=") {
                out.players.extend(non_empty(value));
            } else if let Some(value) = arg.strip_prefix("--search=") {
                out.search = Some(value.to_string());
            } else if matches!(arg.as_str(), "--source" | "--player" | "--search") {
                let Some(next) = args.get(idx + 1) else {
                    idx += 1;
                    continue;
                };
                match arg.as_str() {
                    "--source" => out.source = non_empty(next),
                    "--player" => out.players.extend(non_empty(next)),
                    _ => out.search = Some(next.clone()),
                }
                idx += 1;
            }
            idx += 1;
        }
        out
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
