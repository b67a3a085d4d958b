use crate::domain::error::Result;
use crate::domain::file_format::FileFormat;
use crate::domain::table::Table;
use crate::infrastructure::csv::{CsvParser, CsvWriter};
use crate::infrastructure::xlsx::{XlsxReader, XlsxWriter};

/// Decode an upload, picking the decoder from the file name's extension
pub fn decode_upload(file_name: &str, bytes: &[u8]) -> Result<(FileFormat, Table)> {
    let format = FileFormat::from_file_name(file_name)?;
    let table = decode(format, bytes)?;
    Ok((format, table))
}

pub fn decode(format: FileFormat, bytes: &[u8]) -> Result<Table> {
    match format {
        FileFormat::Csv => CsvParser::new().parse_bytes(bytes),
        FileFormat::Xlsx => XlsxReader::new().parse_bytes(bytes),
    }
}

pub fn encode(format: FileFormat, table: &Table) -> Result<Vec<u8>> {
    match format {
        FileFormat::Csv => CsvWriter::new().write(table),
        FileFormat::Xlsx => XlsxWriter::new().write(table),
    }
}
