//! Единый тип ошибок публичного API.
//!
//! Ядро генерации payload ошибок не возвращает: признак неудачи там — пустая строка.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WedpayError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid hex color: {0}")]
    InvalidHex(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),
}

pub type Result<T> = std::result::Result<T, WedpayError>;
