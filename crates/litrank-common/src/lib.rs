//! litrank-common — Shared types, errors, and configuration used across all litrank crates.

pub mod error;
pub mod article;
pub mod config;
pub mod weights;

// Re-export commonly used types
pub use article::Article;
pub use config::{Config, ReportsConfig, ScoringConfig, ViewConfig};
pub use error::{LitrankError, Result};
pub use weights::KeywordWeights;
