use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::error::{AppError, Result};

pub const CSV_MIME: &str = "text/csv";
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// The two tabular formats accepted on upload and offered on export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,
    Xlsx,
}

impl FileFormat {
    /// Lower-cased extension of a file name including the dot, or "" when absent
    pub fn extension_of(file_name: &str) -> String {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default()
    }

    /// Resolve the format of an upload from its file name
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        let ext = Self::extension_of(file_name);
        match ext.as_str() {
            ".csv" => Ok(FileFormat::Csv),
            ".xlsx" => Ok(FileFormat::Xlsx),
            _ => Err(AppError::UnsupportedFormat(ext)),
        }
    }

    /// Resolve the conversion target picked in the UI
    pub fn from_choice(choice: &str) -> Result<Self> {
        match choice.trim().to_lowercase().as_str() {
            "csv" | ".csv" => Ok(FileFormat::Csv),
            "excel" | "xlsx" | ".xlsx" => Ok(FileFormat::Xlsx),
            _ => Err(AppError::EncodingError(format!(
                "Unsupported conversion type: {}",
                choice
            ))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Csv => ".csv",
            FileFormat::Xlsx => ".xlsx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            FileFormat::Csv => CSV_MIME,
            FileFormat::Xlsx => XLSX_MIME,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileFormat::Csv => "CSV",
            FileFormat::Xlsx => "Excel",
        }
    }

    /// Swap the extension of `file_name` for this format's canonical one
    pub fn output_file_name(&self, file_name: &str) -> String {
        let ext = self.extension().trim_start_matches('.');
        Path::new(file_name)
            .with_extension(ext)
            .to_string_lossy()
            .into_owned()
    }
}
