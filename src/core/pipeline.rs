use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{EnrollmentRecord, Modality, RawRow, ReportMeta, TermKey, TransformResult};
use crate::domain::services;
use crate::report::{builder, pdf};
use crate::utils::error::{ReportError, Result};

const REQUIRED_COLUMNS: [&str; 4] = ["TERM", "CRS", "CRS_SECT", "MODALITY"];

pub struct ReportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ReportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for ReportPipeline<S, C> {
    /// Loads the CSV and normalizes each row: term codes become sort keys,
    /// modality strings become the enum. Row numbers in errors are 1-based
    /// data rows (the header is row 0).
    fn extract(&self) -> Result<Vec<EnrollmentRecord>> {
        tracing::debug!("Reading enrollment data from: {}", self.config.input_path());
        let data = std::fs::read(self.config.input_path())?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(data.as_slice());

        let headers = reader.headers()?.clone();
        for required in REQUIRED_COLUMNS {
            if !headers.iter().any(|header| header == required) {
                return Err(ReportError::MissingColumnError {
                    column: required.to_string(),
                });
            }
        }

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<RawRow>().enumerate() {
            let row = row?;
            let row_number = index + 1;

            let term_key =
                TermKey::parse(&row.term).map_err(|source| ReportError::TermFormatError {
                    row: row_number,
                    term: row.term.clone(),
                    source,
                })?;

            let modality = Modality::parse(&row.modality).ok_or_else(|| {
                ReportError::InvalidModalityError {
                    row: row_number,
                    value: row.modality.clone(),
                }
            })?;

            records.push(EnrollmentRecord {
                term: row.term,
                term_key,
                course: row.course,
                section: row.section,
                modality,
            });
        }

        Ok(records)
    }

    fn transform(&self, records: Vec<EnrollmentRecord>) -> Result<TransformResult> {
        let prefix = self.config.prefix();
        let (matching, courses) = services::filter_by_prefix(records, prefix);
        tracing::debug!(
            "{} records match prefix {} across {} courses",
            matching.len(),
            prefix,
            courses.len()
        );

        let summaries = services::aggregate(&matching);
        for summary in &summaries {
            tracing::debug!(
                "{}: {} terms, {} enrollments, {} sections",
                summary.course,
                summary.terms.len(),
                summary.grand_total.enrollments,
                summary.grand_total.sections
            );
        }

        let meta = ReportMeta {
            prefix: prefix.to_string(),
            date_range: self.config.date_range().to_string(),
            provider: self.config.provider().to_string(),
            published: self
                .config
                .published()
                .map(str::to_string)
                .unwrap_or_else(|| chrono::Local::now().format("%B %Y").to_string()),
        };
        let document = builder::build_document(&meta, &summaries);

        Ok(TransformResult { summaries, document })
    }

    fn load(&self, result: TransformResult) -> Result<String> {
        let filename = self.config.output_filename();
        let output_path = format!("{}/{}", self.config.output_path(), filename);

        let bytes = pdf::render(&result.document)?;
        tracing::debug!("Writing PDF ({} bytes) to storage", bytes.len());

        self.storage.write_file(&filename, &bytes).map_err(|e| match e {
            ReportError::IoError(source) => ReportError::WriteOutputError {
                path: output_path.clone(),
                source,
            },
            other => other,
        })?;

        Ok(output_path)
    }
}
