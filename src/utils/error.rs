use thiserror::Error;

use crate::domain::model::TermParseError;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("input file is missing required column: {column}")]
    MissingColumnError { column: String },

    #[error("row {row}: unrecognized modality {value:?}")]
    InvalidModalityError { row: usize, value: String },

    #[error("row {row}: term {term:?}: {source}")]
    TermFormatError {
        row: usize,
        term: String,
        #[source]
        source: TermParseError,
    },

    #[error("PDF rendering failed: {message}")]
    RenderError { message: String },

    #[error("failed to write report to {path}: {source}")]
    WriteOutputError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: missing field {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Load,
    Format,
    Render,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::IoError(_)
            | ReportError::CsvError(_)
            | ReportError::MissingColumnError { .. }
            | ReportError::InvalidModalityError { .. } => ErrorCategory::Load,
            ReportError::TermFormatError { .. } => ErrorCategory::Format,
            ReportError::RenderError { .. } | ReportError::WriteOutputError { .. } => {
                ErrorCategory::Render
            }
            ReportError::MissingConfigError { .. }
            | ReportError::InvalidConfigValueError { .. }
            | ReportError::ConfigValidationError { .. } => ErrorCategory::Config,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Load | ErrorCategory::Format => ErrorSeverity::High,
            ErrorCategory::Render => ErrorSeverity::Critical,
            ErrorCategory::Config => ErrorSeverity::Medium,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ReportError::IoError(_) => {
                "Check that the input file exists and is readable".to_string()
            }
            ReportError::CsvError(_) => {
                "Check that the input file is valid CSV with a header row".to_string()
            }
            ReportError::MissingColumnError { column } => format!(
                "Add the {} column to the input file header",
                column
            ),
            ReportError::InvalidModalityError { .. } => {
                "Modality must be one of Face-to-Face, Online or Hybrid".to_string()
            }
            ReportError::TermFormatError { .. } => {
                "Term codes must start with a four-digit year, e.g. 2023FA".to_string()
            }
            ReportError::RenderError { .. } => {
                "Re-run with -v to see the rendering failure in context".to_string()
            }
            ReportError::WriteOutputError { .. } => {
                "Check that the output directory exists and is writable".to_string()
            }
            ReportError::MissingConfigError { field } => {
                format!("Set the {} field in the configuration", field)
            }
            ReportError::InvalidConfigValueError { field, .. }
            | ReportError::ConfigValidationError { field, .. } => {
                format!("Fix the {} value in the configuration", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        let stage = match self.category() {
            ErrorCategory::Load => "Loading the input file failed",
            ErrorCategory::Format => "A term code could not be parsed",
            ErrorCategory::Render => "Writing the PDF report failed",
            ErrorCategory::Config => "The configuration is invalid",
        };
        format!("{}: {}", stage, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let err = ReportError::MissingColumnError {
            column: "TERM".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Load);
        assert_eq!(err.severity(), ErrorSeverity::High);

        let err = ReportError::TermFormatError {
            row: 3,
            term: "20XXFA".to_string(),
            source: TermParseError::InvalidYear,
        };
        assert_eq!(err.category(), ErrorCategory::Format);

        let err = ReportError::RenderError {
            message: "font".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Render);
        assert_eq!(err.severity(), ErrorSeverity::Critical);

        let err = ReportError::MissingConfigError {
            field: "prefix".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Config);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_row_context_in_messages() {
        let err = ReportError::InvalidModalityError {
            row: 7,
            value: "Remote".to_string(),
        };
        assert!(err.to_string().contains("row 7"));
        assert!(err.to_string().contains("Remote"));
    }
}
