use crate::config::{DEFAULT_DATE_RANGE, DEFAULT_PROVIDER};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub report: ReportSection,
    pub source: SourceSection,
    pub cover: Option<CoverSection>,
    pub output: OutputSection,
    pub monitoring: Option<MonitoringSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSection {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSection {
    pub input: String,
    pub prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverSection {
    pub date_range: Option<String>,
    pub provider: Option<String>,
    pub published: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringSection {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReportError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ReportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` placeholders with environment values; unknown
    /// variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("report.name", &self.report.name)?;
        validation::validate_course_prefix("source.prefix", &self.source.prefix)?;
        validation::validate_path("source.input", &self.source.input)?;
        validation::validate_file_extensions(
            "source.input",
            std::slice::from_ref(&self.source.input),
            &["csv"],
        )?;
        validation::validate_path("output.path", &self.output.path)?;

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.source.input
    }

    fn prefix(&self) -> &str {
        &self.source.prefix
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn date_range(&self) -> &str {
        self.cover
            .as_ref()
            .and_then(|c| c.date_range.as_deref())
            .unwrap_or(DEFAULT_DATE_RANGE)
    }

    fn provider(&self) -> &str {
        self.cover
            .as_ref()
            .and_then(|c| c.provider.as_deref())
            .unwrap_or(DEFAULT_PROVIDER)
    }

    fn published(&self) -> Option<&str> {
        self.cover.as_ref().and_then(|c| c.published.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
