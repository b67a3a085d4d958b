// ============================================================
// XLSX INFRASTRUCTURE LAYER
// ============================================================
// Spreadsheet decoding via calamine, encoding as a minimal OOXML package

mod xlsx_reader;
mod xlsx_writer;

pub use xlsx_reader::XlsxReader;
pub use xlsx_writer::XlsxWriter;
