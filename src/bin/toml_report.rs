use clap::Parser;
use modality_report::config::toml_config::TomlConfig;
use modality_report::domain::ports::{ConfigProvider, Pipeline};
use modality_report::domain::services;
use modality_report::utils::{logger, validation::Validate};
use modality_report::{LocalStorage, ReportEngine, ReportPipeline};

#[derive(Parser)]
#[command(name = "toml-report")]
#[command(about = "Program-review report generator with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "report-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Dry run - load and aggregate without writing the PDF
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based report tool");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config);

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = ReportPipeline::new(storage, config.clone());

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No PDF will be written");
        perform_dry_run(&pipeline, &config)?;
        return Ok(());
    }

    let engine = ReportEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run() {
        Ok(output_path) => {
            println!("✅ PDF generated: {}", output_path);
        }
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Report: {} ({})", config.report.name, config.report.version);
    tracing::info!("📄 Input: {}", config.input_path());
    tracing::info!("🔤 Prefix: {}", config.prefix());
    tracing::info!("📁 Output: {}/{}", config.output_path(), config.output_filename());
}

fn perform_dry_run<P: Pipeline>(
    pipeline: &P,
    config: &TomlConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let records = pipeline.extract()?;
    let total = records.len();

    let (matching, courses) = services::filter_by_prefix(records, config.prefix());

    tracing::info!(
        "🔍 {} of {} records match prefix {}",
        matching.len(),
        total,
        config.prefix()
    );
    for course in &courses {
        tracing::info!("🔍   {}", course);
    }
    println!(
        "✅ Dry run complete: {} matching records across {} courses",
        matching.len(),
        courses.len()
    );

    Ok(())
}
