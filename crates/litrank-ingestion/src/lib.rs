//! litrank-ingestion — Literature dumps to weekly reports.
//! - Europe PMC dump parsing
//! - Keyword matching and initial scoring
//! - Weekly report CSV read/write
//! - Aggregation and cataloguing of report directories

pub mod sources;
pub mod models;
pub mod matcher;
pub mod pipeline;
pub mod reports;
