//! Dump → weekly report pipeline.
//!
//! For each Europe PMC dump:
//!   1. Read the records
//!   2. Match weighted keywords against keywords/title/abstract
//!   3. Keep papers that hit a target keyword, highest score first
//!   4. Write the weekly report CSV

use std::path::{Path, PathBuf};
use serde::Serialize;
use tracing::{info, instrument};

use litrank_common::Result;

use crate::matcher::KeywordMatcher;
use crate::reports::{list_files, write_report};
use crate::sources::europepmc::EuropePmcDump;
use crate::sources::LiteratureDump;

/// Outcome of processing one dump file.
#[derive(Debug, Clone, Serialize)]
pub struct ParseSummary {
    pub input: PathBuf,
    /// `None` when nothing matched and no report was written.
    pub output: Option<PathBuf>,
    pub records: usize,
    pub matched: usize,
}

/// Rank the records of `dump` and write them to `output` if any matched.
pub fn process_dump(
    dump: &dyn LiteratureDump,
    output: &Path,
    matcher: &KeywordMatcher,
) -> Result<(usize, usize, bool)> {
    let papers = dump.papers();
    let articles = matcher.rank_papers(&papers);
    if articles.is_empty() {
        return Ok((papers.len(), 0, false));
    }
    write_report(output, &articles)?;
    Ok((papers.len(), articles.len(), true))
}

#[instrument(skip(matcher))]
pub fn process_json_file(input: &Path, output: &Path, matcher: &KeywordMatcher) -> Result<ParseSummary> {
    let dump = EuropePmcDump::from_path(input)?;
    let (records, matched, written) = process_dump(&dump, output, matcher)?;

    if written {
        info!(matched, records, output = %output.display(), "Weekly report written");
    } else {
        info!(records, input = %input.display(), "No matching articles found");
    }

    Ok(ParseSummary {
        input: input.to_path_buf(),
        output: written.then(|| output.to_path_buf()),
        records,
        matched,
    })
}

/// Process every `epmc_*.json` in `input_dir` into `<output_dir>/<stem>.csv`.
#[instrument(skip(matcher))]
pub fn process_directory(
    input_dir: &Path,
    output_dir: &Path,
    matcher: &KeywordMatcher,
) -> Result<Vec<ParseSummary>> {
    let files = list_files(input_dir, "epmc_", "json")?;
    if files.is_empty() {
        info!(dir = %input_dir.display(), "No JSON dumps found");
    }

    let mut summaries = Vec::with_capacity(files.len());
    for input in files {
        let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("report");
        let output = output_dir.join(format!("{stem}.csv"));
        summaries.push(process_json_file(&input, &output, matcher)?);
    }
    Ok(summaries)
}
