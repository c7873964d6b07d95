//! Configuration loading for litrank.
//! Reads litrank.toml from the current directory or the path in the LITRANK_CONFIG env var.
//! `EPMC_KEYWORD_WEIGHTS` / `EPMC_TARGET_KEYWORDS` (JSON) take precedence over the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{LitrankError, Result};
use crate::weights::KeywordWeights;

pub const CONFIG_ENV: &str = "LITRANK_CONFIG";
pub const WEIGHTS_ENV: &str = "EPMC_KEYWORD_WEIGHTS";
pub const TARGETS_ENV: &str = "EPMC_TARGET_KEYWORDS";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub reports: ReportsConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Initial keyword weights, each in [0, 10], in the order written.
    #[serde(default)]
    pub weights: KeywordWeights,
    /// An article is kept at ingestion only if one of these appears in its matches.
    #[serde(default)]
    pub target_keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsConfig {
    #[serde(default = "default_raw_dir")]
    pub raw_dir: String,
    #[serde(default = "default_reports_dir")]
    pub reports_dir: String,
}

fn default_raw_dir()     -> String { "data/raw".to_string() }
fn default_reports_dir() -> String { "data/weekly_reports".to_string() }

impl Default for ReportsConfig {
    fn default() -> Self {
        Self { raw_dir: default_raw_dir(), reports_dir: default_reports_dir() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_sort")]
    pub sort: String,
    #[serde(default = "default_direction")]
    pub direction: String,
}

fn default_sort()      -> String { "score".to_string() }
fn default_direction() -> String { "desc".to_string() }

impl Default for ViewConfig {
    fn default() -> Self {
        Self { sort: default_sort(), direction: default_direction() }
    }
}

mod tests;

impl Config {
    /// `$LITRANK_CONFIG`, else `litrank.toml` in the current directory.
    pub fn default_path() -> PathBuf {
        std::env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("litrank.toml"))
    }

    /// Load configuration from litrank.toml.
    /// Checks LITRANK_CONFIG env var first, then current directory.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path(), |key| std::env::var(key).ok())
    }

    /// Load a config file that must exist, then apply environment overrides.
    pub fn load_from<F>(path: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if !path.exists() {
            return Err(LitrankError::Config(format!(
                "Config file not found: {}. Copy litrank.example.toml to litrank.toml and edit it.",
                path.display()
            )));
        }
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides(lookup)?;
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file means defaults plus
    /// environment overrides. A file that exists and fails to parse or
    /// validate is still an error.
    pub fn load_or_default() -> Result<Self> {
        Self::load_or_default_from(&Self::default_path(), |key| std::env::var(key).ok())
    }

    pub fn load_or_default_from<F>(path: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if path.exists() {
            return Self::load_from(path, lookup);
        }
        warn!("{} not found; using default configuration", path.display());
        let mut config = Self::default();
        config.apply_env_overrides(lookup)?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.as_ref().display(), "Configuration file parsed");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        validate_weights(&config.scoring.weights)?;
        Ok(config)
    }

    /// Apply `EPMC_KEYWORD_WEIGHTS` / `EPMC_TARGET_KEYWORDS` from `lookup`.
    /// Values that are not valid JSON are ignored with a warning; weights
    /// outside [0, 10] are rejected as they are in the file.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(WEIGHTS_ENV) {
            match serde_json::from_str::<KeywordWeights>(&raw) {
                Ok(weights) => {
                    validate_weights(&weights)?;
                    debug!(count = weights.len(), "Keyword weights taken from environment");
                    self.scoring.weights = weights;
                }
                Err(e) => warn!("Ignoring {WEIGHTS_ENV}: {e}"),
            }
        }
        if let Some(raw) = lookup(TARGETS_ENV) {
            match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(targets) => self.scoring.target_keywords = targets,
                Err(e) => warn!("Ignoring {TARGETS_ENV}: {e}"),
            }
        }
        Ok(())
    }
}

fn validate_weights(weights: &KeywordWeights) -> Result<()> {
    for (keyword, value) in weights.iter() {
        if !value.is_finite() || !(0.0..=10.0).contains(&value) {
            return Err(LitrankError::InvalidWeight { keyword: keyword.to_string(), value });
        }
    }
    Ok(())
}
