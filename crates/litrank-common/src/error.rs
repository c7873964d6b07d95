use thiserror::Error;

#[derive(Debug, Error)]
pub enum LitrankError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid weight for '{keyword}': {value}")]
    InvalidWeight { keyword: String, value: f64 },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown sort field: {0}")]
    UnknownSortField(String),

    #[error("Unknown time preset: {0}")]
    UnknownPreset(String),

    #[error("Malformed report: {0}")]
    Report(String),
}

pub type Result<T> = std::result::Result<T, LitrankError>;
