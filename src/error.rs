use thiserror::Error;

#[derive(Debug, Error)]
pub enum NycError {
    #[error("Menu item not found: {0}")]
    ItemNotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Pinning is only available in combo mode")]
    PinningDisabled,
}

impl From<config::ConfigError> for NycError {
    fn from(err: config::ConfigError) -> Self {
        NycError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NycError>;
