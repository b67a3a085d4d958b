use crate::domain::error::Result;
use crate::domain::file_format::FileFormat;
use crate::domain::sweep::ExportArtifact;
use crate::domain::table::Table;
use crate::infrastructure::codec;

/// Encode `table` for download under the original name with a swapped extension
pub fn convert(table: &Table, original_name: &str, target: FileFormat) -> Result<ExportArtifact> {
    let bytes = codec::encode(target, table)?;

    Ok(ExportArtifact {
        file_name: target.output_file_name(original_name),
        mime_type: target.mime_type().to_string(),
        bytes,
    })
}

/// Same as [`convert`], with the target given as the UI's choice string
pub fn convert_to_choice(table: &Table, original_name: &str, choice: &str) -> Result<ExportArtifact> {
    let target = FileFormat::from_choice(choice)?;
    convert(table, original_name, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AppError;
    use crate::domain::table::{Column, Value};

    fn table() -> Table {
        Table::new(vec![
            Column::new("a", vec![Value::Int(1), Value::Int(2)]),
            Column::new("b", vec![Value::Int(3), Value::Int(4)]),
        ])
        .unwrap()
    }

    #[test]
    fn test_csv_artifact() {
        let artifact = convert(&table(), "numbers.xlsx", FileFormat::Csv).unwrap();
        assert_eq!(artifact.file_name, "numbers.csv");
        assert_eq!(artifact.mime_type, "text/csv");
        assert_eq!(artifact.bytes, b"a,b\n1,3\n2,4\n");
    }

    #[test]
    fn test_excel_artifact() {
        let artifact = convert_to_choice(&table(), "numbers.csv", "Excel").unwrap();
        assert_eq!(artifact.file_name, "numbers.xlsx");
        assert_eq!(
            artifact.mime_type,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(codec::decode(FileFormat::Xlsx, &artifact.bytes).unwrap(), table());
    }

    #[test]
    fn test_unknown_choice_is_encoding_error() {
        let result = convert_to_choice(&table(), "numbers.csv", "JSON");
        assert!(matches!(result, Err(AppError::EncodingError(_))));
    }
}
