use thiserror::Error;
use std::io;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Source error: {0}")]
    Source(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Text processing error: {0}")]
    TextProcessing(String),

    #[error("Index error: {0}")]
    Index(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// Type alias for Result
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error conversions
impl Error {
    pub fn source<S: Into<String>>(msg: S) -> Self {
        Error::Source(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    pub fn text<S: Into<String>>(msg: S) -> Self {
        Error::TextProcessing(msg.into())
    }

    pub fn index<S: Into<String>>(msg: S) -> Self {
        Error::Index(msg.into())
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::TextProcessing(format!("Regex error: {}", err))
    }
}
