use crate::cli::args::Cli;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::processors::{PipelineSummary, WeatherPipeline};
use std::fs::File;
use std::sync::Mutex;
use tracing::{debug, info};
use validator::Validate;

pub fn run(cli: Cli) -> Result<PipelineSummary> {
    setup_logging(&cli)?;

    let mut config = PipelineConfig::load_layered(cli.config.as_deref())?;
    apply_cli_overrides(&mut config, &cli);
    config.validate()?;
    debug!("Effective configuration: {:?}", config);

    if !config.quiet {
        println!("Input file: {}", config.input_path.display());
        println!("Output directory: {}", config.output_dir.display());
    }

    let summary = WeatherPipeline::new(config.clone()).run()?;

    if !config.quiet {
        println!("\n{}", summary.summary());
        println!("\nAll tasks completed.");
    }
    info!(
        "Processed {} rows into {} records",
        summary.rows_loaded, summary.cleaning.rows_kept
    );
    Ok(summary)
}

/// Command-line values win over file and environment settings
pub fn apply_cli_overrides(config: &mut PipelineConfig, cli: &Cli) {
    if let Some(input) = &cli.input {
        config.input_path = input.clone();
    }
    if let Some(output_dir) = &cli.output_dir {
        config.output_dir = output_dir.clone();
    }
    if let Some(rows) = cli.preview_rows {
        config.preview_rows = rows;
    }
    if cli.no_charts {
        config.render_charts = false;
    }
    if cli.quiet {
        config.quiet = true;
    }
}

fn setup_logging(cli: &Cli) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("weather_lab={}", cli.log_level())));

    // A second initialization (tests, embedding) keeps the existing subscriber
    let initialized = match &cli.log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
        None => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init(),
    };

    if initialized.is_ok() {
        debug!("Logging initialized at level: {}", cli.log_level());
    }
    Ok(())
}
