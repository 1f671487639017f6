use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatError {
    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Lookup found nothing at {resource}")]
    NotFound { resource: String },

    #[error("Simulated tree does not match its source: {message}")]
    StructureMismatch { message: String },
}

pub type Result<T> = std::result::Result<T, StatError>;
