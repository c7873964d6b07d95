//! litrank — keyword-weighted ranking of literature search results.
//! Entry point for the command-line binary.

mod cli;
mod explore;
mod render;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use litrank_common::Config;
use litrank_ingestion::matcher::KeywordMatcher;
use litrank_ingestion::{pipeline, reports};
use litrank_ranker::{
    DateRange, RankerState, Session, SortDirection, SortField, SortState, ViewMode, WeightMap,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, OutputFormat, SourceArgs};
use render::{render_table, TableOptions, TableRenderer};

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let env = |key: &str| std::env::var(key).ok();
    let config = match path {
        Some(p) => Config::load_from(p, env),
        None => Config::load_or_default_from(&Config::default_path(), env),
    };
    let shown = path.map(Path::to_path_buf).unwrap_or_else(Config::default_path);
    config.with_context(|| format!("Could not load configuration from {}", shown.display()))
}

fn initial_weights(config: &Config) -> anyhow::Result<WeightMap> {
    let weights = WeightMap::try_from(config.scoring.weights.clone())?;
    if weights.is_empty() {
        tracing::warn!("No keyword weights configured; every score will be 0.");
    }
    Ok(weights)
}

fn initial_sort(config: &Config) -> anyhow::Result<SortState> {
    let field: SortField = config.view.sort.parse()?;
    let direction: SortDirection = config.view.direction.parse()?;
    Ok(SortState::new(field, direction))
}

/// Load the article set: one report (period view) or a whole directory (aggregate view).
fn load_state(source: &SourceArgs, config: &Config) -> anyhow::Result<RankerState> {
    let weights = initial_weights(config)?;
    let state = match &source.report {
        Some(path) => {
            let articles = reports::read_report(path)
                .with_context(|| format!("Could not read report {}", path.display()))?;
            info!(count = articles.len(), report = %path.display(), "Period view loaded");
            RankerState::new(articles, weights, ViewMode::Period)
        }
        None => {
            let dir = source
                .reports_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.reports.reports_dir));
            let combined = reports::combine_reports(&dir)
                .with_context(|| format!("Could not combine reports in {}", dir.display()))?;
            info!(
                count = combined.articles.len(),
                range = %combined.describe_range(),
                "Aggregate view loaded"
            );
            RankerState::new(combined.articles, weights, ViewMode::Aggregate)
        }
    };
    Ok(state.with_sort(initial_sort(config)?))
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

fn run_parse(args: cli::ParseArgs, config: &Config) -> anyhow::Result<()> {
    let weights = initial_weights(config)?;
    if config.scoring.target_keywords.is_empty() || weights.is_empty() {
        bail!(
            "Target keywords and weights must be configured \
             ([scoring] in litrank.toml, or EPMC_TARGET_KEYWORDS / EPMC_KEYWORD_WEIGHTS)"
        );
    }
    let matcher = KeywordMatcher::new(weights, config.scoring.target_keywords.clone());

    if let Some(input) = args.input_file {
        let Some(output) = args.output_file else {
            bail!("--output-file is required when using --input-file");
        };
        if !input.exists() {
            bail!("Input file not found: {}", input.display());
        }
        pipeline::process_json_file(&input, &output, &matcher)?;
    } else if let Some(dir) = args.input_dir {
        if !dir.exists() {
            bail!("Input directory not found: {}", dir.display());
        }
        let output_dir = args
            .output_dir
            .unwrap_or_else(|| PathBuf::from(&config.reports.reports_dir));
        let summaries = pipeline::process_directory(&dir, &output_dir, &matcher)?;
        let written = summaries.iter().filter(|s| s.output.is_some()).count();
        info!(dumps = summaries.len(), written, "Directory processed");
    }
    Ok(())
}

fn run_rank(args: cli::RankArgs, config: &Config) -> anyhow::Result<()> {
    let mut state = load_state(&args.source, config)?;

    for (keyword, value) in &args.weights {
        state = state.with_weight(keyword, *value)?;
    }
    if let Some(field) = args.sort {
        let direction = if args.asc { SortDirection::Asc } else { SortDirection::Desc };
        state = state.with_sort(SortState::new(field, direction));
    } else if args.asc {
        let current = state.sort();
        state = state.with_sort(SortState::new(current.field, SortDirection::Asc));
    }

    if state.mode() == ViewMode::Period && (args.preset.is_some() || args.from.is_some()) {
        tracing::warn!("Date filters apply to the aggregate view only (--reports-dir); ignoring.");
    }
    if let (Some(from), Some(to)) = (&args.from, &args.to) {
        state = state.with_date_range(DateRange::parse(from, to)?);
    } else if let Some(preset) = args.preset {
        state = state.with_preset(preset, today());
    }
    debug!(sort = %state.sort().field, "Rendering view");

    let view = state.view();
    match args.format {
        OutputFormat::Table => {
            let opts = TableOptions { limit: args.limit, details: args.abstracts };
            print!("{}", render_table(&view, opts));
        }
        OutputFormat::Json => {
            let mut view = view;
            if let Some(limit) = args.limit {
                view.rows.truncate(limit);
            }
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
    }
    Ok(())
}

fn run_explore(args: cli::ExploreArgs, config: &Config) -> anyhow::Result<()> {
    let state = load_state(&args.source, config)?;
    let mut session = Session::new(state);
    session.subscribe(Box::new(TableRenderer::new(
        std::io::stdout(),
        TableOptions { limit: Some(args.limit), details: false },
    )));

    let stdin = std::io::stdin();
    explore::run(&mut session, stdin.lock(), std::io::stdout(), today())?;
    Ok(())
}

fn run_reports(args: cli::ReportsArgs, config: &Config) -> anyhow::Result<()> {
    let dir = args
        .reports_dir
        .unwrap_or_else(|| PathBuf::from(&config.reports.reports_dir));
    let groups = reports::catalogue(&dir)?;
    if groups.is_empty() {
        println!("No weekly reports in {}", dir.display());
    }
    for group in groups {
        println!("{}", group.label);
        for r in group.reports {
            println!(
                "  {} to {}  {:>5} articles  {}",
                r.start,
                r.end,
                r.article_count,
                r.path.display()
            );
        }
    }
    Ok(())
}

const DEFAULT_LOG_FILTER: &str = "litrank=info,warn";

/// Load `.env` (or the given file), then build the log filter, so a
/// RUST_LOG set in `.env` takes effect.
fn log_filter(dotenv: Option<&Path>) -> EnvFilter {
    match dotenv {
        Some(path) => {
            dotenvy::from_path(path).ok();
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn main() -> anyhow::Result<()> {
    // Initialise structured logging; stdout is reserved for tables.
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(None))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    debug!(
        weights = config.scoring.weights.len(),
        targets = config.scoring.target_keywords.len(),
        "Configuration loaded"
    );

    match cli.command {
        Command::Parse(args) => run_parse(args, &config),
        Command::Rank(args) => run_rank(args, &config),
        Command::Explore(args) => run_explore(args, &config),
        Command::Reports(args) => run_reports(args, &config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotenv_log_level_reaches_filter() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let dotenv = dir.path().join(".env");
        std::fs::write(&dotenv, "RUST_LOG=litrank=trace\n").unwrap();

        let filter = log_filter(Some(&dotenv));
        assert_eq!(filter.to_string(), "litrank=trace");
    }

    #[test]
    fn test_invalid_config_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("litrank.toml");
        std::fs::write(&path, "[scoring.weights]\nva = 5.0\ndashboard = 10.5\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("dashboard"), "got {err:#}");
    }
}
