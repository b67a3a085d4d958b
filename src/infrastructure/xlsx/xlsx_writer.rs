// ============================================================
// XLSX WRITER
// ============================================================
// Serialize a Table as a single-sheet Office Open XML workbook

use std::io::{Cursor, Write};

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::error::AppError;
use crate::domain::table::{Table, Value};

pub const SHEET_NAME: &str = "Sheet1";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

#[derive(Default)]
pub struct XlsxWriter;

impl XlsxWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write(&self, table: &Table) -> Result<Vec<u8>, AppError> {
        let parts = [
            ("[Content_Types].xml", CONTENT_TYPES.to_string()),
            ("_rels/.rels", ROOT_RELS.to_string()),
            ("xl/workbook.xml", workbook_xml()),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
            ("xl/worksheets/sheet1.xml", sheet_xml(table)),
        ];

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (path, body) in parts {
            zip.start_file(path, options).map_err(|e| {
                AppError::EncodingError(format!("Failed to start workbook part {}: {}", path, e))
            })?;
            zip.write_all(body.as_bytes())?;
        }

        let cursor = zip
            .finish()
            .map_err(|e| AppError::EncodingError(format!("Failed to finish workbook: {}", e)))?;

        Ok(cursor.into_inner())
    }
}

fn workbook_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        SHEET_NAME
    )
}

fn sheet_xml(table: &Table) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    if table.column_count() > 0 {
        xml.push_str(r#"<row r="1">"#);
        for (col, name) in table.column_names().iter().enumerate() {
            xml.push_str(&inline_string_cell(&cell_ref(col, 0), name));
        }
        xml.push_str("</row>");

        for index in 0..table.row_count() {
            let row_number = index + 1;
            xml.push_str(&format!(r#"<row r="{}">"#, row_number + 1));
            for (col, column) in table.columns().iter().enumerate() {
                let reference = cell_ref(col, row_number);
                match &column.values[index] {
                    Value::Missing => {}
                    Value::Int(v) => xml.push_str(&number_cell(&reference, &v.to_string())),
                    Value::Float(v) if v.is_finite() => {
                        xml.push_str(&number_cell(&reference, &v.to_string()))
                    }
                    Value::Float(_) => {}
                    Value::Bool(b) => xml.push_str(&format!(
                        r#"<c r="{}" t="b"><v>{}</v></c>"#,
                        reference,
                        u8::from(*b)
                    )),
                    Value::Text(s) => xml.push_str(&inline_string_cell(&reference, s)),
                }
            }
            xml.push_str("</row>");
        }
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

fn number_cell(reference: &str, value: &str) -> String {
    format!(r#"<c r="{}"><v>{}</v></c>"#, reference, value)
}

fn inline_string_cell(reference: &str, text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
        .collect();
    format!(
        r#"<c r="{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
        reference,
        escape(cleaned.as_str())
    )
}

/// A1-style reference for a zero-based column and row
fn cell_ref(col: usize, row: usize) -> String {
    let mut letters = Vec::new();
    let mut n = col + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    format!("{}{}", String::from_utf8_lossy(&letters), row + 1)
}
