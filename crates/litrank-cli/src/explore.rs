//! Interactive session over stdin.
//!
//! Each line is one event; the table is recomputed and printed before the
//! next line is read.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use litrank_ranker::{DateRange, Event, Session, SortField, TimePreset};

use crate::render::{render_table, render_weights, TableOptions};

pub const HELP: &str = "\
Commands:
  weight <keyword> <value>   set a keyword weight (0-10, step 0.1)
  sort <field>               click a column (same field toggles direction)
  range <from> <to>          custom date range, YYYY-MM-DD
  range clear                remove the date range
  preset <name>              week, thisMonth, lastMonth, thisYear, lastYear, all
  weights                    list current weights
  show [N]                   print the table again (optionally the top N rows)
  help                       this text
  quit                       leave
";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Weight { keyword: String, value: f64 },
    Sort(SortField),
    Range(Option<DateRange>),
    Preset(TimePreset),
    Weights,
    Show(Option<usize>),
    Help,
    Quit,
}

impl Command {
    /// The state change this command requests, if any.
    pub fn into_event(self, today: NaiveDate) -> Option<Event> {
        match self {
            Command::Weight { keyword, value } => Some(Event::SetWeight { keyword, value }),
            Command::Sort(field) => Some(Event::ClickSort(field)),
            Command::Range(range) => Some(Event::SetDateRange(range)),
            Command::Preset(preset) => Some(Event::ApplyPreset { preset, today }),
            _ => None,
        }
    }
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else { return Ok(None) };
    let rest: Vec<&str> = words.collect();

    let cmd = match (head.to_ascii_lowercase().as_str(), rest.as_slice()) {
        ("weight" | "w", [keyword @ .., value]) if !keyword.is_empty() => {
            let value = value.parse::<f64>().map_err(|_| format!("'{value}' is not a number"))?;
            Command::Weight { keyword: keyword.join(" "), value }
        }
        ("sort" | "s", [field]) => Command::Sort(field.parse().map_err(|e| format!("{e}"))?),
        ("range" | "r", ["clear"]) => Command::Range(None),
        ("range" | "r", [from, to]) => {
            Command::Range(DateRange::parse(from, to).map_err(|e| format!("{e}"))?)
        }
        ("preset" | "p", [name]) => Command::Preset(name.parse().map_err(|e| format!("{e}"))?),
        ("weights", []) => Command::Weights,
        ("show", []) => Command::Show(None),
        ("show", [n]) => Command::Show(Some(n.parse().map_err(|_| format!("'{n}' is not a row count"))?)),
        ("help" | "?", []) => Command::Help,
        ("quit" | "exit" | "q", []) => Command::Quit,
        _ => return Err(format!("Unrecognised command: {}", line.trim())),
    };
    Ok(Some(cmd))
}

/// Read commands from `input` until EOF or `quit`. Messages go to `out`;
/// tables are written by the session's subscribers.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut out: W,
    today: NaiveDate,
) -> std::io::Result<()> {
    session.refresh();
    writeln!(out, "Type 'help' for commands.")?;

    for line in input.lines() {
        let line = line?;
        let cmd = match parse_command(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(msg) => {
                writeln!(out, "{msg}")?;
                continue;
            }
        };

        match cmd {
            Command::Quit => break,
            Command::Help => write!(out, "{HELP}")?,
            Command::Weights => write!(out, "{}", render_weights(session.state().weights()))?,
            Command::Show(None) => session.refresh(),
            Command::Show(Some(n)) => {
                let opts = TableOptions { limit: Some(n), details: false };
                write!(out, "{}", render_table(&session.state().view(), opts))?
            }
            other => {
                if let Some(event) = other.into_event(today) {
                    if let Err(e) = session.apply(event) {
                        writeln!(out, "{e}")?;
                    }
                }
            }
        }
        out.flush()?;
    }
    Ok(())
}
