use thiserror::Error;

/// Message used when a required parameter is missing and the caller gave none.
pub const DEFAULT_MISSING_MESSAGE: &str = "Missing required query parameter";

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("{message}")]
    MissingParameter { message: String },
    #[error("Invalid delimiter pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("Config error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl QueryError {
    pub fn missing(message: Option<&str>) -> Self {
        Self::MissingParameter {
            message: message.unwrap_or(DEFAULT_MISSING_MESSAGE).to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;

// Helper conversions
impl From<config::ConfigError> for QueryError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
