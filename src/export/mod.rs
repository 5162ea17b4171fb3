// src/export/mod.rs

mod csv;
pub(crate) mod fs_utils;
mod json;

use crate::errors::{AppError, AppResult};
use crate::store::Store;
use crate::ui::messages::success;
use clap::ValueEnum;
use crate::utils::path::expand_tilde;
use std::path::Path;

/// Shared completion message for exports.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportSubject {
    Accounts,
    Logs,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

pub struct ExportLogic;

impl ExportLogic {
    pub fn export(
        store: &Store,
        subject: ExportSubject,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<()> {
        let expanded = expand_tilde(file);
        let path = expanded.as_path();
        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output path must be absolute: {}",
                file
            )));
        }
        fs_utils::ensure_writable(path, force)?;

        match (subject, format) {
            (ExportSubject::Accounts, ExportFormat::Csv) => {
                csv::write_accounts(path, &store.accounts()?)?
            }
            (ExportSubject::Accounts, ExportFormat::Json) => {
                json::write_json(path, &store.accounts()?)?
            }
            (ExportSubject::Logs, ExportFormat::Csv) => csv::write_logs(path, &store.logs()?)?,
            (ExportSubject::Logs, ExportFormat::Json) => json::write_json(path, &store.logs()?)?,
        }

        let label = match subject {
            ExportSubject::Accounts => "Accounts",
            ExportSubject::Logs => "Logs",
        };
        notify_export_success(&format!("{} {}", label, format.as_str().to_uppercase()), path);
        Ok(())
    }
}
