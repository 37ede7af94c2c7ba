//! Layered run configuration: defaults, optional TOML file, environment, CLI.

use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, DEFAULT_CONFIG_FILE, DEFAULT_INPUT_FILE,
    DEFAULT_PREVIEW_ROWS, ENV_PREFIX,
};
use ::config::{Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct PipelineConfig {
    /// Input CSV with `date, temp, rain, humidity` columns
    pub input_path: PathBuf,

    /// Directory receiving the charts, cleaned CSV and report
    pub output_dir: PathBuf,

    /// Rows shown in console previews and in the report's monthly section
    #[validate(range(min = 1, max = 1000))]
    pub preview_rows: usize,

    pub render_charts: bool,

    #[validate(range(min = 200, max = 4000))]
    pub chart_width: u32,

    #[validate(range(min = 200, max = 4000))]
    pub chart_height: u32,

    /// Suppress banners and previews on stdout
    pub quiet: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_FILE),
            output_dir: PathBuf::from("."),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            render_charts: true,
            chart_width: DEFAULT_CHART_WIDTH,
            chart_height: DEFAULT_CHART_HEIGHT,
            quiet: false,
        }
    }
}

impl PipelineConfig {
    /// Load defaults, then an optional config file, then `WEATHER_LAB_*` variables
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();
        let mut builder = ::config::Config::builder()
            .set_default("input_path", defaults.input_path.to_string_lossy().to_string())?
            .set_default("output_dir", defaults.output_dir.to_string_lossy().to_string())?
            .set_default("preview_rows", defaults.preview_rows as i64)?
            .set_default("render_charts", defaults.render_charts)?
            .set_default("chart_width", defaults.chart_width as i64)?
            .set_default("chart_height", defaults.chart_height as i64)?
            .set_default("quiet", defaults.quiet)?;

        match config_file {
            Some(path) => {
                info!("Using config file: {}", path.display());
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                debug!("Looking for optional {}", DEFAULT_CONFIG_FILE);
                builder = builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false));
            }
        }

        let config: Self = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}
