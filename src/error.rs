use thiserror::Error;

/// Conditions that stop an estimate outright. Per-flight problems are reported as diagnostics instead.
#[derive(Error, Debug)]
pub enum DemandError {
    #[error("No valid flights in any category, nothing to build a time grid from")]
    EmptyInput,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scenario: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
}
