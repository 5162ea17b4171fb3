//! Unified application error type.
//! All modules (db, store, core, cli, host) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Validation / lookup
    // ---------------------------
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    Duplicate(String),

    // ---------------------------
    // Launch sequencing
    // ---------------------------
    #[error("A launch is already in progress ({0} profiles pending)")]
    LaunchInProgress(usize),

    #[error("No launch in progress")]
    NoActiveLaunch,

    #[error("Launch cancelled")]
    Cancelled,

    // ---------------------------
    // Native host
    // ---------------------------
    #[error("Host error: {0}")]
    Host(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::Export(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
