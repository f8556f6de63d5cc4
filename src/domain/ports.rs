use crate::domain::model::{EnrollmentRecord, TransformResult};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn prefix(&self) -> &str;
    fn output_path(&self) -> &str;
    fn date_range(&self) -> &str;
    fn provider(&self) -> &str;
    /// Publication line on the cover; `None` falls back to the current month.
    fn published(&self) -> Option<&str>;

    fn output_filename(&self) -> String {
        format!("ProgramReview_{}_Modality.pdf", self.prefix())
    }
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<EnrollmentRecord>>;
    fn transform(&self, records: Vec<EnrollmentRecord>) -> Result<TransformResult>;
    fn load(&self, result: TransformResult) -> Result<String>;
}
