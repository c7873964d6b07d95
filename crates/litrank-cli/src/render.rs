//! Plain-text rendering of a ranked view.

use std::io::Write;

use litrank_ranker::{ScoredArticle, View, ViewSubscriber, WeightMap};

const TITLE_W: usize = 48;
const AUTHORS_W: usize = 24;
const JOURNAL_W: usize = 22;
const DATE_W: usize = 10;
const ABSTRACT_W: usize = 400;

#[derive(Debug, Clone, Copy, Default)]
pub struct TableOptions {
    pub limit: Option<usize>,
    pub details: bool,
}

/// Cut `s` to at most `width` characters, marking the cut with '…'.
pub fn truncate(s: &str, width: usize) -> String {
    let s = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if s.chars().count() <= width {
        return s;
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad(s: &str, width: usize) -> String {
    let t = truncate(s, width);
    let fill = width.saturating_sub(t.chars().count());
    format!("{t}{}", " ".repeat(fill))
}

fn render_row(out: &mut String, rank: usize, row: &ScoredArticle<'_>, details: bool) {
    let a = row.article;
    out.push_str(&format!(
        "{rank:>4}  {score:>6.2}  {title}  {authors}  {journal}  {date}  {matched}\n",
        score = row.score,
        title = pad(&a.title, TITLE_W),
        authors = pad(&a.authors, AUTHORS_W),
        journal = pad(&a.journal, JOURNAL_W),
        date = pad(&a.pub_date, DATE_W),
        matched = a.matched_keywords,
    ));

    if !details {
        return;
    }
    let indent = " ".repeat(14);
    if let Some(url) = a.doi_url() {
        out.push_str(&format!("{indent}{url}\n"));
    }
    if !a.first_author_affiliation.is_empty() {
        out.push_str(&format!("{indent}Affiliation: {}\n", truncate(&a.first_author_affiliation, 120)));
    }
    if !a.api_keywords.is_empty() {
        out.push_str(&format!("{indent}Keywords: {}\n", a.api_keywords));
    }
    if !a.abstract_text.is_empty() {
        out.push_str(&format!("{indent}{}\n", truncate(&a.abstract_text, ABSTRACT_W)));
    }
    out.push('\n');
}

/// Status line, header and rows.
pub fn render_table(view: &View<'_>, opts: TableOptions) -> String {
    let mut out = String::new();
    out.push_str(&view.status.to_string());
    if view.undated_excluded > 0 {
        out.push_str(&format!(" ({} without a readable date hidden)", view.undated_excluded));
    }
    out.push_str(&format!(
        "\nSorted by {} ({})\n\n",
        view.sort.field,
        view.sort.direction.as_str()
    ));

    out.push_str(&format!(
        "{:>4}  {:>6}  {}  {}  {}  {}  {}\n",
        "Rank",
        "Score",
        pad("Title", TITLE_W),
        pad("Authors", AUTHORS_W),
        pad("Journal", JOURNAL_W),
        pad("Date", DATE_W),
        "Matched Keywords",
    ));

    let limit = opts.limit.unwrap_or(usize::MAX);
    for (i, row) in view.rows.iter().take(limit).enumerate() {
        render_row(&mut out, i + 1, row, opts.details);
    }
    if view.rows.len() > limit {
        out.push_str(&format!("… {} more\n", view.rows.len() - limit));
    }
    out
}

pub fn render_weights(weights: &WeightMap) -> String {
    let width = weights.keywords().map(|k| k.chars().count()).max().unwrap_or(0);
    weights
        .iter()
        .map(|(k, v)| format!("  {k:<width$}  {v:>4.1}\n"))
        .collect()
}

/// Writes a table for every view the session produces.
pub struct TableRenderer<W: Write> {
    out: W,
    opts: TableOptions,
}

impl<W: Write> TableRenderer<W> {
    pub fn new(out: W, opts: TableOptions) -> Self {
        Self { out, opts }
    }
}

impl<W: Write> ViewSubscriber for TableRenderer<W> {
    fn on_view(&mut self, view: &View<'_>) {
        let text = render_table(view, self.opts);
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::warn!("Failed to write table: {e}");
        }
    }
}
