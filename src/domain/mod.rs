pub mod error;
pub mod file_format;
pub mod sweep;

// Tabular data model
pub mod table;
