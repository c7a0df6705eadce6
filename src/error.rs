// ABOUTME: Error types with structured exit codes for CLI
// ABOUTME: Maps domain errors to specific exit codes for shell scripting

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing configuration: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error {status} on {endpoint}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),

    #[error("Input error: {0}")]
    Input(String),
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) => 2,
            Error::Network(_) => 3,
            Error::Api { .. } => 4,
            Error::Parse(_) => 5,
            Error::Filesystem(_) => 6,
            Error::Input(_) => 7,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
