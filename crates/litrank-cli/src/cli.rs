//! Command-line interface definition.

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use litrank_ranker::{SortField, TimePreset};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "litrank", author, version, about = "Keyword-weighted ranking of literature search results")]
pub struct Cli {
    /// Path to litrank.toml (defaults to $LITRANK_CONFIG, then ./litrank.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Turn Europe PMC dumps into weekly report CSVs
    Parse(ParseArgs),
    /// Score, filter and sort articles, then print the table
    Rank(RankArgs),
    /// Interactive session: adjust weights, sort and filter from stdin
    Explore(ExploreArgs),
    /// List weekly reports grouped by month
    Reports(ReportsArgs),
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["input_file", "input_dir"])))]
pub struct ParseArgs {
    /// A single dump to process (requires --output-file)
    #[arg(long)]
    pub input_file: Option<PathBuf>,

    /// Process every epmc_*.json in this directory
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    #[arg(long)]
    pub output_file: Option<PathBuf>,

    /// Output directory for --input-dir (defaults to reports.reports_dir)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

/// Where the articles come from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// A single weekly report (period view, no date filtering)
    #[arg(long, conflicts_with = "reports_dir")]
    pub report: Option<PathBuf>,

    /// Combine all weekly reports in a directory (aggregate view)
    #[arg(long)]
    pub reports_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RankArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Override a keyword weight, e.g. --weight "visual analytics=7.5"
    #[arg(long = "weight", value_name = "KEYWORD=VALUE", value_parser = parse_weight)]
    pub weights: Vec<(String, f64)>,

    /// Column to sort by
    #[arg(long, value_parser = parse_sort_field)]
    pub sort: Option<SortField>,

    /// Sort ascending instead of descending
    #[arg(long)]
    pub asc: bool,

    /// Start of a custom date range (YYYY-MM-DD)
    #[arg(long, requires = "to", conflicts_with = "preset")]
    pub from: Option<String>,

    /// End of a custom date range (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    pub to: Option<String>,

    /// week, thisMonth, lastMonth, thisYear, lastYear or all
    #[arg(long, value_parser = parse_preset)]
    pub preset: Option<TimePreset>,

    /// Show only the first N rows
    #[arg(long)]
    pub limit: Option<usize>,

    /// Print DOI link, affiliation, keywords and abstract under each row
    #[arg(long)]
    pub abstracts: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct ExploreArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Rows shown after each change
    #[arg(long, default_value_t = 20)]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct ReportsArgs {
    #[arg(long)]
    pub reports_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

pub fn parse_weight(s: &str) -> Result<(String, f64), String> {
    let (keyword, value) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected KEYWORD=VALUE, got '{s}'"))?;
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err("keyword must not be empty".to_string());
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value.trim()))?;
    Ok((keyword.to_string(), value))
}

fn parse_sort_field(s: &str) -> Result<SortField, String> {
    s.parse().map_err(|e: litrank_common::LitrankError| e.to_string())
}

fn parse_preset(s: &str) -> Result<TimePreset, String> {
    s.parse().map_err(|e: litrank_common::LitrankError| e.to_string())
}
