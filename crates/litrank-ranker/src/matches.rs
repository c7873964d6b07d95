//! Parser for the matched-keywords micro-format.
//!
//! A report stores matches as `"kw1(tag,tag); kw2(tag)"`. Each segment names
//! a weighted keyword and where it was found. Segments that do not follow
//! `keyword(tags)` are skipped; they never fail the parse.

use std::fmt;
use tracing::trace;

/// Where a keyword was found in an article.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    /// Author/API keyword list
    Keywords,
    Title,
    Abstract,
    /// Any tag the scorer does not recognise
    Other(String),
}

impl Location {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "kw"       => Location::Keywords,
            "title"    => Location::Title,
            "abstract" => Location::Abstract,
            other      => Location::Other(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            Location::Keywords => "kw",
            Location::Title    => "title",
            Location::Abstract => "abstract",
            Location::Other(s) => s,
        }
    }

    /// Fraction of the keyword weight a match in this location is worth.
    pub fn multiplier(&self) -> f64 {
        match self {
            Location::Keywords => 1.0,
            Location::Title    => 0.8,
            Location::Abstract => 0.5,
            Location::Other(_) => 0.0,
        }
    }
}

/// One parsed `keyword(tags)` segment.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchEntry {
    pub keyword: String,
    /// Tags in first-seen order, without duplicates.
    pub locations: Vec<Location>,
}

impl MatchEntry {
    pub fn new(keyword: impl Into<String>, locations: impl IntoIterator<Item = Location>) -> Self {
        let mut entry = Self { keyword: keyword.into(), locations: Vec::new() };
        for loc in locations {
            entry.push_location(loc);
        }
        entry
    }

    pub fn push_location(&mut self, loc: Location) {
        if !self.locations.contains(&loc) {
            self.locations.push(loc);
        }
    }

    /// Best multiplier among the entry's locations; 0.0 when none is recognised.
    pub fn multiplier(&self) -> f64 {
        self.locations
            .iter()
            .map(Location::multiplier)
            .fold(0.0, f64::max)
    }

    /// Parse a single segment. Returns `None` for malformed input.
    pub fn parse(segment: &str) -> Option<Self> {
        let segment = segment.trim();
        let (keyword, rest) = segment.split_once('(')?;
        let tags = rest.strip_suffix(')')?;
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return None;
        }
        Some(Self::new(
            keyword,
            tags.split(',').map(|t| Location::from_tag(t.trim())),
        ))
    }
}

impl fmt::Display for MatchEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.keyword)?;
        for (i, loc) in self.locations.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(loc.as_tag())?;
        }
        f.write_str(")")
    }
}

/// Parse a full matched-keywords string, skipping malformed segments.
pub fn parse_matches(raw: &str) -> Vec<MatchEntry> {
    raw.split(';')
        .filter(|s| !s.trim().is_empty())
        .filter_map(|segment| {
            let parsed = MatchEntry::parse(segment);
            if parsed.is_none() {
                trace!(segment, "Skipping malformed match segment");
            }
            parsed
        })
        .collect()
}

/// Render entries back into the stored `"a(kw); b(title)"` form.
pub fn format_matches(entries: &[MatchEntry]) -> String {
    entries
        .iter()
        .map(MatchEntry::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
