use tracing::{info, warn};

use crate::application::use_cases::cleaning::{self, CleaningPlan};
use crate::application::use_cases::{conversion, projection, visualization};
use crate::domain::error::{AppError, Result};
use crate::domain::sweep::{
    ExportArtifact, FileControls, FileReport, Notice, RenderOutput, Stage, UploadedFile,
    WidgetState,
};
use crate::infrastructure::codec;

pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// One render of the sweeper: every uploaded file runs
/// decode → [clean] → project → [visualize] → [convert] on fresh data.
pub struct SweepUseCase {
    preview_rows: usize,
}

impl Default for SweepUseCase {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_ROWS)
    }
}

impl SweepUseCase {
    pub fn new(preview_rows: usize) -> Self {
        Self { preview_rows }
    }

    pub fn render(&self, files: &[UploadedFile], widgets: &WidgetState) -> RenderOutput {
        let reports = files
            .iter()
            .map(|file| self.process_file(file, &widgets.controls_for(&file.name)))
            .collect();

        RenderOutput {
            files: reports,
            notices: vec![Notice::success("All files processed successfully!")],
        }
    }

    /// Run the pipeline for one file; failures become error notices on its report
    pub fn process_file(&self, file: &UploadedFile, controls: &FileControls) -> FileReport {
        let mut report = FileReport::received(file);

        if let Err(err) = self.run_pipeline(file, controls, &mut report) {
            match &err {
                AppError::UnsupportedFormat(_) => {
                    warn!(file = %file.name, error = %err, "Skipping upload")
                }
                _ => warn!(file = %file.name, error = %err, "Pipeline stopped"),
            }
            report.notices.push(Notice::error(err.to_string()));
        }

        report
    }

    /// Run the pipeline with conversion forced on and hand back the artifact
    pub fn export(&self, file: &UploadedFile, controls: &FileControls) -> Result<ExportArtifact> {
        let controls = FileControls {
            convert: true,
            visualize: false,
            ..controls.clone()
        };
        let mut report = FileReport::received(file);
        self.run_pipeline(file, &controls, &mut report)?;

        report
            .artifact
            .ok_or_else(|| AppError::Internal("Conversion produced no artifact".to_string()))
    }

    fn run_pipeline(
        &self,
        file: &UploadedFile,
        controls: &FileControls,
        report: &mut FileReport,
    ) -> Result<()> {
        let (format, table) = codec::decode_upload(&file.name, &file.content)?;
        info!(
            file = %file.name,
            format = format.label(),
            rows = table.row_count(),
            columns = table.column_count(),
            "Decoded upload"
        );
        report.stages.push(Stage::Decoded);
        report.preview = Some(table.head(self.preview_rows));

        let plan = if controls.clean {
            CleaningPlan {
                remove_duplicates: controls.remove_duplicates,
                fill_missing: controls.fill_missing,
            }
        } else {
            CleaningPlan::default()
        };

        let table = if plan.is_empty() {
            table
        } else {
            let cleaned = cleaning::apply(&table, plan);
            if plan.remove_duplicates {
                report.notices.push(Notice::success("Duplicates removed!"));
            }
            if plan.fill_missing {
                report
                    .notices
                    .push(Notice::success("Missing values filled with column mean!"));
            }
            info!(
                file = %file.name,
                rows_before = table.row_count(),
                rows_after = cleaned.row_count(),
                "Cleaned table"
            );
            report.stages.push(Stage::Cleaned);
            cleaned
        };

        report.columns = table.column_names();
        let selected = controls
            .selected_columns
            .clone()
            .unwrap_or_else(|| table.column_names());
        let table = projection::select_columns(&table, &selected)?;
        report.selected_columns = table.column_names();
        report.stages.push(Stage::Projected);

        if controls.visualize {
            match visualization::chart_summary(&table) {
                Ok(chart) => {
                    report.chart = Some(chart);
                    report.stages.push(Stage::Visualized);
                }
                Err(AppError::EmptyNumericData) => {
                    report
                        .notices
                        .push(Notice::warning(AppError::EmptyNumericData.to_string()));
                }
                Err(err) => return Err(err),
            }
        }

        if controls.convert {
            let artifact =
                conversion::convert_to_choice(&table, &file.name, &controls.conversion_type)?;
            report.stages.push(Stage::Converted);
            info!(
                file = %file.name,
                output = %artifact.file_name,
                bytes = artifact.bytes.len(),
                "Prepared download"
            );
            report.artifact = Some(artifact);
            report.stages.push(Stage::Exported);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::file_format::FileFormat;
    use crate::domain::sweep::NoticeLevel;
    use crate::domain::table::Value;

    const PEOPLE: &str = "name,age,score\nann,30,1\nbo,,\nann,30,1\ncy,40,3\n";

    fn people() -> UploadedFile {
        UploadedFile::new("people.csv", PEOPLE.as_bytes().to_vec())
    }

    #[test]
    fn test_defaults_preview_and_project_everything() {
        let report = SweepUseCase::default().process_file(&people(), &FileControls::default());

        assert!(!report.has_errors());
        assert_eq!(
            report.stages,
            vec![Stage::Received, Stage::Decoded, Stage::Projected]
        );
        assert_eq!(report.columns, vec!["name", "age", "score"]);
        assert_eq!(report.selected_columns, report.columns);
        assert_eq!(report.preview.as_ref().unwrap().rows.len(), 4);
        assert!(report.chart.is_none());
        assert!(report.artifact.is_none());
    }

    #[test]
    fn test_cleaning_requires_checkbox() {
        let controls = FileControls {
            remove_duplicates: true,
            fill_missing: true,
            ..FileControls::default()
        };
        let report = SweepUseCase::default().process_file(&people(), &controls);
        assert!(!report.reached(Stage::Cleaned));
        assert!(report.notices.is_empty());
    }

    #[test]
    fn test_full_pipeline_to_csv() {
        let controls = FileControls {
            clean: true,
            remove_duplicates: true,
            fill_missing: true,
            selected_columns: Some(vec!["name".to_string(), "age".to_string()]),
            visualize: true,
            conversion_type: "CSV".to_string(),
            convert: true,
        };
        let report = SweepUseCase::default().process_file(&people(), &controls);

        assert_eq!(
            report.stages,
            vec![
                Stage::Received,
                Stage::Decoded,
                Stage::Cleaned,
                Stage::Projected,
                Stage::Visualized,
                Stage::Converted,
                Stage::Exported,
            ]
        );
        assert_eq!(report.notices.len(), 2);
        assert!(report.notices.iter().all(|n| n.level == NoticeLevel::Success));

        let chart = report.chart.as_ref().unwrap();
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].values, vec![Some(30.0), Some(35.0), Some(40.0)]);

        let artifact = report.artifact.unwrap();
        assert_eq!(artifact.file_name, "people.csv");
        assert_eq!(
            String::from_utf8(artifact.bytes).unwrap(),
            "name,age\nann,30.0\nbo,35.0\ncy,40.0\n"
        );
    }

    #[test]
    fn test_visualize_without_numbers_warns() {
        let file = UploadedFile::new("names.csv", b"first,last\nada,lovelace\n".to_vec());
        let controls = FileControls {
            visualize: true,
            ..FileControls::default()
        };
        let report = SweepUseCase::default().process_file(&file, &controls);

        assert!(report.chart.is_none());
        assert!(!report.has_errors());
        assert_eq!(
            report.notices,
            vec![Notice::warning("No numerical data available for visualization.")]
        );
    }

    #[test]
    fn test_unknown_selected_column_is_reported() {
        let controls = FileControls {
            selected_columns: Some(vec!["salary".to_string()]),
            ..FileControls::default()
        };
        let report = SweepUseCase::default().process_file(&people(), &controls);
        assert_eq!(report.notices, vec![Notice::error("Unknown column: salary")]);
        assert!(!report.reached(Stage::Projected));
    }

    #[test]
    fn test_bad_conversion_choice_is_reported() {
        let controls = FileControls {
            convert: true,
            conversion_type: "PDF".to_string(),
            ..FileControls::default()
        };
        let report = SweepUseCase::default().process_file(&people(), &controls);
        assert!(report.has_errors());
        assert!(report.artifact.is_none());
        assert!(report.reached(Stage::Projected));
    }

    #[test]
    fn test_render_skips_unsupported_and_continues() {
        let files = vec![
            UploadedFile::new("notes.txt", b"just text".to_vec()),
            people(),
        ];
        let mut widgets = WidgetState::default();
        widgets.files.insert(
            "people.csv".to_string(),
            FileControls {
                convert: true,
                conversion_type: "Excel".to_string(),
                ..FileControls::default()
            },
        );

        let output = SweepUseCase::default().render(&files, &widgets);

        assert_eq!(output.files.len(), 2);
        assert_eq!(
            output.files[0].notices,
            vec![Notice::error("Unsupported file type: .txt")]
        );
        assert_eq!(output.files[0].stages, vec![Stage::Received]);

        let artifact = output.files[1].artifact.as_ref().unwrap();
        assert_eq!(artifact.file_name, "people.xlsx");
        let table = codec::decode(FileFormat::Xlsx, &artifact.bytes).unwrap();
        assert_eq!(table.row_count(), 4);
        assert_eq!(table.column("name").unwrap().values[1], Value::Text("bo".into()));

        assert_eq!(
            output.notices,
            vec![Notice::success("All files processed successfully!")]
        );
    }

    #[test]
    fn test_zero_column_selection_keeps_rows() {
        let controls = FileControls {
            selected_columns: Some(Vec::new()),
            convert: true,
            ..FileControls::default()
        };
        let report = SweepUseCase::default().process_file(&people(), &controls);
        assert!(report.selected_columns.is_empty());
        assert_eq!(report.artifact.unwrap().bytes, Vec::<u8>::new());
    }

    #[test]
    fn test_export_forces_conversion() {
        let artifact = SweepUseCase::default()
            .export(&people(), &FileControls::default())
            .unwrap();
        assert_eq!(artifact.mime_type, "text/csv");
        assert!(artifact.bytes.starts_with(b"name,age,score\n"));
    }

    #[test]
    fn test_export_propagates_unsupported_format() {
        let file = UploadedFile::new("image.png", vec![0x89, 0x50]);
        let result = SweepUseCase::default().export(&file, &FileControls::default());
        assert_eq!(
            result.unwrap_err(),
            AppError::UnsupportedFormat(".png".to_string())
        );
    }
}
