use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppError {
    Internal(String),
    UnsupportedFormat(String),
    EncodingError(String),
    EmptyNumericData,
    ValidationError(String),
    UnknownColumn(String),
    ParseError(String),
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::UnsupportedFormat(ext) => write!(f, "Unsupported file type: {}", ext),
            AppError::EncodingError(msg) => write!(f, "Encoding error: {}", msg),
            AppError::EmptyNumericData => {
                write!(f, "No numerical data available for visualization.")
            }
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::UnknownColumn(name) => write!(f, "Unknown column: {}", name),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
