pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};

pub const DEFAULT_DATE_RANGE: &str = "Spring 2020 - Spring 2024";
pub const DEFAULT_PROVIDER: &str = "Center for Institutional Effectiveness";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "modality-report")]
#[command(about = "Generates a program-review PDF of enrollments and sections by modality")]
pub struct CliConfig {
    /// CSV file with TERM, CRS, CRS_SECT and MODALITY columns
    #[arg(long, default_value = "demo_course_data.csv")]
    pub input: String,

    /// Department/course prefix to analyze
    #[arg(long, default_value = "ELC")]
    pub prefix: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Date range printed on the cover and page headers
    #[arg(long, default_value = DEFAULT_DATE_RANGE)]
    pub date_range: String,

    /// Attribution printed on the cover
    #[arg(long, default_value = DEFAULT_PROVIDER)]
    pub provider: String,

    /// Publication line on the cover; defaults to the current month
    #[arg(long)]
    pub published: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system resource monitoring")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn date_range(&self) -> &str {
        &self.date_range
    }

    fn provider(&self) -> &str {
        &self.provider
    }

    fn published(&self) -> Option<&str> {
        self.published.as_deref()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_course_prefix("prefix", &self.prefix)?;
        validation::validate_path("input", &self.input)?;
        validation::validate_file_extensions("input", std::slice::from_ref(&self.input), &["csv"])?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_non_empty_string("date_range", &self.date_range)?;
        validation::validate_non_empty_string("provider", &self.provider)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            input: "demo_course_data.csv".to_string(),
            prefix: "ELC".to_string(),
            output_path: "./output".to_string(),
            date_range: DEFAULT_DATE_RANGE.to_string(),
            provider: DEFAULT_PROVIDER.to_string(),
            published: None,
            verbose: false,
            monitor: false,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_csv_input() {
        let config = CliConfig {
            input: "data.xlsx".to_string(),
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_prefix() {
        let config = CliConfig {
            prefix: "EL C".to_string(),
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_derived_output_filename() {
        let config = CliConfig {
            prefix: "SOC".to_string(),
            ..base_config()
        };
        assert_eq!(config.output_filename(), "ProgramReview_SOC_Modality.pdf");
    }
}
