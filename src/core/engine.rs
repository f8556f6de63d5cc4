use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(pipeline: P, enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(enabled),
        }
    }

    /// Drives the pipeline once: load, aggregate, render. Returns the path
    /// of the written PDF.
    pub fn run(&self) -> Result<String> {
        tracing::info!("Loading enrollment records...");
        let records = self.pipeline.extract()?;
        tracing::info!("Loaded {} records", records.len());
        self.monitor.log_stats("Extract");

        tracing::info!("Aggregating by course, term and modality...");
        let result = self.pipeline.transform(records)?;
        tracing::info!("Aggregated {} courses", result.summaries.len());
        self.monitor.log_stats("Transform");

        tracing::info!("Rendering PDF report...");
        let output_path = self.pipeline.load(result)?;
        tracing::info!("Report saved to: {}", output_path);
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
