/// Input file names
pub const DEFAULT_INPUT_FILE: &str = "weather.csv";
pub const DEFAULT_CONFIG_FILE: &str = "weather_lab.toml";

/// Output file names
pub const CLEANED_CSV_FILE: &str = "weather_cleaned.csv";
pub const REPORT_FILE: &str = "weather_report.txt";
pub const DAILY_TEMPERATURE_CHART: &str = "daily_temperature.png";
pub const MONTHLY_RAINFALL_CHART: &str = "monthly_rainfall.png";
pub const HUMIDITY_TEMPERATURE_CHART: &str = "humidity_vs_temperature.png";
pub const COMBINED_CHART: &str = "combined_temp_rain.png";

/// Column names
pub const DATE_COLUMN: &str = "date";
pub const TEMP_COLUMN: &str = "temp";
pub const RAIN_COLUMN: &str = "rain";
pub const HUMIDITY_COLUMN: &str = "humidity";
pub const REQUIRED_COLUMNS: [&str; 4] = [DATE_COLUMN, TEMP_COLUMN, RAIN_COLUMN, HUMIDITY_COLUMN];

/// Tokens read as missing values in numeric and date columns
pub const NULL_TOKENS: &[&str] = &[
    "", "na", "n/a", "nan", "-nan", "null", "none", "<na>", "#n/a", "nat",
];

/// Processing defaults
pub const DEFAULT_PREVIEW_ROWS: usize = 5;
pub const DEFAULT_CHART_WIDTH: u32 = 800;
pub const DEFAULT_CHART_HEIGHT: u32 = 600;
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
pub const ENV_PREFIX: &str = "WEATHER_LAB";
