use base64::Engine as _;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

use super::table::TablePreview;

/// A file handed over by the host for one render
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub size: usize,
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: content.len(),
            content,
        }
    }

    pub fn size_kb(&self) -> String {
        format!("{:.2} KB", self.size as f64 / 1024.0)
    }
}

fn default_conversion_type() -> String {
    "CSV".to_string()
}

/// Widget state the host keeps for one uploaded file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileControls {
    #[serde(default)]
    pub clean: bool,
    #[serde(default)]
    pub remove_duplicates: bool,
    #[serde(default)]
    pub fill_missing: bool,
    /// `None` selects every column
    #[serde(default)]
    pub selected_columns: Option<Vec<String>>,
    #[serde(default)]
    pub visualize: bool,
    #[serde(default = "default_conversion_type")]
    pub conversion_type: String,
    #[serde(default)]
    pub convert: bool,
}

impl Default for FileControls {
    fn default() -> Self {
        Self {
            clean: false,
            remove_duplicates: false,
            fill_missing: false,
            selected_columns: None,
            visualize: false,
            conversion_type: default_conversion_type(),
            convert: false,
        }
    }
}

/// Widget state for a whole render, keyed by uploaded file name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetState {
    #[serde(default)]
    pub files: HashMap<String, FileControls>,
}

impl WidgetState {
    pub fn controls_for(&self, file_name: &str) -> FileControls {
        self.files.get(file_name).cloned().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// Bar chart input: one category per row, one series per numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub categories: Vec<usize>,
    pub series: Vec<ChartSeries>,
}

/// Download payload: bytes from offset zero, file name and MIME type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: String,
    #[serde(serialize_with = "serialize_base64")]
    pub bytes: Vec<u8>,
}

fn serialize_base64<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
}

/// Pipeline stages a file passes through within one render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Received,
    Decoded,
    Cleaned,
    Projected,
    Visualized,
    Converted,
    Exported,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub name: String,
    pub size_bytes: usize,
    pub size_label: String,
    pub notices: Vec<Notice>,
    pub preview: Option<TablePreview>,
    /// Columns available for selection, after cleaning
    pub columns: Vec<String>,
    pub selected_columns: Vec<String>,
    pub chart: Option<ChartData>,
    pub artifact: Option<ExportArtifact>,
    pub stages: Vec<Stage>,
}

impl FileReport {
    pub fn received(file: &UploadedFile) -> Self {
        Self {
            name: file.name.clone(),
            size_bytes: file.size,
            size_label: file.size_kb(),
            notices: Vec::new(),
            preview: None,
            columns: Vec::new(),
            selected_columns: Vec::new(),
            chart: None,
            artifact: None,
            stages: vec![Stage::Received],
        }
    }

    pub fn reached(&self, stage: Stage) -> bool {
        self.stages.contains(&stage)
    }

    pub fn has_errors(&self) -> bool {
        self.notices.iter().any(|n| n.level == NoticeLevel::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderOutput {
    pub files: Vec<FileReport>,
    pub notices: Vec<Notice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_label() {
        let file = UploadedFile::new("a.csv", vec![0u8; 1536]);
        assert_eq!(file.size, 1536);
        assert_eq!(file.size_kb(), "1.50 KB");
    }

    #[test]
    fn test_controls_defaults_from_json() {
        let controls: FileControls = serde_json::from_str(r#"{"clean": true}"#).unwrap();
        assert!(controls.clean);
        assert!(!controls.convert);
        assert_eq!(controls.conversion_type, "CSV");
        assert_eq!(controls.selected_columns, None);
    }

    #[test]
    fn test_widget_state_falls_back_to_defaults() {
        let state = WidgetState::default();
        assert_eq!(state.controls_for("missing.csv"), FileControls::default());
    }

    #[test]
    fn test_artifact_bytes_serialize_as_base64() {
        let artifact = ExportArtifact {
            file_name: "a.csv".to_string(),
            mime_type: "text/csv".to_string(),
            bytes: b"a\n".to_vec(),
        };
        let json = serde_json::to_value(&artifact).unwrap();
        assert_eq!(json["bytes"], "YQo=");
        assert_eq!(json["fileName"], "a.csv");
    }
}
