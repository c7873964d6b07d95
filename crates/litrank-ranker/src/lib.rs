//! litrank-ranker — Keyword-weighted article scoring, date filtering and sorting.
//!
//! Pipeline: parse matched keywords → score with the current weights →
//! filter by publication date → stable sort on the chosen column.

pub mod matches;
pub mod weights;
pub mod scorer;
pub mod filter;
pub mod sorter;
pub mod state;
pub mod session;

pub use filter::{DateRange, TimePreset};
pub use matches::{Location, MatchEntry};
pub use scorer::ScoredArticle;
pub use session::{Event, Session, ViewSubscriber};
pub use sorter::{SortDirection, SortField, SortState};
pub use state::{RankerState, StatusLine, View, ViewMode};
pub use weights::WeightMap;
