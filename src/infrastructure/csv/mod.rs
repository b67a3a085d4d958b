// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// CSV decoding with encoding detection, and CSV encoding

mod csv_parser;
mod csv_writer;

pub use csv_parser::CsvParser;
pub use csv_writer::CsvWriter;
