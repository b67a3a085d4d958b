pub mod codec;
pub mod config;
pub mod csv;
pub mod headers;
pub mod xlsx;
