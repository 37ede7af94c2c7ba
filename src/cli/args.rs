use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "weather-lab")]
#[command(about = "Clean, summarize and chart a daily weather CSV")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, help = "Input CSV file [default: weather.csv]")]
    pub input: Option<PathBuf>,

    #[arg(short, long, help = "Directory for charts, cleaned CSV and report [default: .]")]
    pub output_dir: Option<PathBuf>,

    #[arg(short = 'n', long, help = "Rows shown in previews and the report")]
    pub preview_rows: Option<usize>,

    #[arg(long, help = "Skip PNG chart rendering")]
    pub no_charts: bool,

    #[arg(short, long, help = "Configuration file (TOML)")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, help = "Suppress banners and previews", conflicts_with = "verbose")]
    pub quiet: bool,

    #[arg(long, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}
