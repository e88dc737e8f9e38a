//! Error handling for storm report operations.
//!
//! Only structural problems are errors here. Record-level data quality issues
//! (bad dates, blank numbers, unknown states) are counted in
//! [`LoadStats`](crate::models::LoadStats) and never surface as failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StormError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Dataset not found at path: {path}")]
    DatasetNotFound { path: PathBuf },

    #[error("Invalid CSV input in file: {path} - {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("Required column '{column}' missing from file: {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Processing failed for file: {path} - {reason}")]
    ProcessingFailed { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Failed to write table '{table}' to {path} - {reason}")]
    WriteFailed {
        table: String,
        path: PathBuf,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, StormError>;
