use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::TempDir;
use weather_lab::config::PipelineConfig;
use weather_lab::models::{Season, WeatherTable, YearMonth};
use weather_lab::processors::{Aggregator, Cleaner, WeatherPipeline};
use weather_lab::readers::WeatherCsvReader;
use weather_lab::utils::constants::{
    CLEANED_CSV_FILE, COMBINED_CHART, DAILY_TEMPERATURE_CHART, HUMIDITY_TEMPERATURE_CHART,
    MONTHLY_RAINFALL_CHART, REPORT_FILE,
};
use weather_lab::ProcessingError;

const SCENARIO_CSV: &str = "\
date,temp,rain,humidity
2020-01-01,10,0,50
2020-01-02,null,1,55
2020-02-01,20,2,60
not-a-date,5,5,5
";

fn write_input(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("weather.csv");
    std::fs::write(&path, content).expect("Failed to write input");
    path
}

fn quiet_config(dir: &TempDir, content: &str, render_charts: bool) -> PipelineConfig {
    PipelineConfig {
        input_path: write_input(dir.path(), content),
        output_dir: dir.path().join("output"),
        render_charts,
        chart_width: 400,
        chart_height: 300,
        quiet: true,
        ..Default::default()
    }
}

fn synthetic_csv(days: i64) -> String {
    let start = NaiveDate::from_ymd_opt(2019, 11, 1).unwrap();
    let mut csv = String::from("date,temp,rain,humidity\n");
    for day in 0..days {
        let date = start + chrono::Duration::days(day);
        let temp = if day % 17 == 0 {
            String::new()
        } else {
            format!("{:.1}", 5.0 + (day % 30) as f64 * 0.5)
        };
        csv.push_str(&format!(
            "{},{},{:.1},{}\n",
            date,
            temp,
            (day % 4) as f64 * 1.5,
            40 + day % 50
        ));
    }
    csv
}

#[test]
fn test_scenario_end_to_end() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config = quiet_config(&temp_dir, SCENARIO_CSV, false);
    let output_dir = config.output_dir.clone();

    let summary = WeatherPipeline::new(config).run().expect("Pipeline failed");
    assert_eq!(summary.rows_loaded, 4);
    assert_eq!(summary.cleaning.rows_kept, 2);
    assert_eq!(summary.cleaning.dropped_bad_date, 1);
    assert_eq!(summary.cleaning.dropped_missing_value, 1);

    let cleaned = std::fs::read_to_string(output_dir.join(CLEANED_CSV_FILE)).unwrap();
    assert_eq!(
        cleaned,
        "date,temp,rain,humidity,month,season\n\
         2020-01-01,10.0,0.0,50.0,1,Winter\n\
         2020-02-01,20.0,2.0,60.0,2,Winter\n"
    );

    let report = std::fs::read_to_string(output_dir.join(REPORT_FILE)).unwrap();
    assert!(report.starts_with("Weather Data Report\n===================\n"));
    assert!(report.contains("Total records after cleaning: 2"));
    assert!(report.contains("2020-02"));
    assert!(report.contains("Winter"));
    assert!(report.contains("15.00"));
    assert!(report.contains("NaN"));
}

#[test]
fn test_scenario_aggregates() {
    let raw = WeatherCsvReader::new()
        .read_from(SCENARIO_CSV.as_bytes())
        .unwrap();
    let (table, _) = Cleaner::new().clean(&raw).unwrap();
    let aggregates = Aggregator::new().aggregate(&table);

    assert_eq!(aggregates.daily.len(), 32);
    assert_eq!(aggregates.daily[0].temp_mean, Some(10.0));
    assert_eq!(aggregates.daily[1].temp_mean, None);
    assert_eq!(aggregates.daily[31].temp_mean, Some(20.0));
    assert_eq!(aggregates.observed_days(), 2);

    assert_eq!(aggregates.monthly.len(), 2);
    let january = &aggregates.monthly[0];
    assert_eq!(january.period, YearMonth::new(2020, 1).unwrap());
    assert_eq!(january.count, 1);
    assert_eq!(january.temp_mean, 10.0);
    assert_eq!(january.temp_std, None);
    assert_eq!(aggregates.monthly[1].period, YearMonth::new(2020, 2).unwrap());
    assert_eq!(aggregates.monthly[1].rain_sum, 2.0);

    assert_eq!(aggregates.by_season.len(), 1);
    let winter = &aggregates.by_season[0];
    assert_eq!(winter.key, Season::Winter);
    assert_eq!(winter.temp_mean, 15.0);
    assert_eq!(winter.rain_sum, 2.0);
    assert_eq!(winter.humidity_mean, 55.0);
}

#[test]
fn test_full_run_with_charts() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config = quiet_config(&temp_dir, &synthetic_csv(400), true);
    let output_dir = config.output_dir.clone();

    let summary = WeatherPipeline::new(config).run().expect("Pipeline failed");
    assert_eq!(summary.charts.len(), 4);

    for name in [
        DAILY_TEMPERATURE_CHART,
        MONTHLY_RAINFALL_CHART,
        HUMIDITY_TEMPERATURE_CHART,
        COMBINED_CHART,
    ] {
        let bytes = std::fs::read(output_dir.join(name)).expect("Chart missing");
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']), "{} is not a PNG", name);
    }
    assert!(summary.yearly_periods >= 2);
}

#[test]
fn test_cleaned_csv_reloads_to_same_table() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let content = synthetic_csv(120);
    let config = quiet_config(&temp_dir, &content, false);

    let summary = WeatherPipeline::new(config).run().expect("Pipeline failed");

    let original_raw = WeatherCsvReader::new().read_from(content.as_bytes()).unwrap();
    let (original, _) = Cleaner::new().clean(&original_raw).unwrap();

    let reloaded_raw = WeatherCsvReader::new()
        .read_table(&summary.cleaned_csv)
        .unwrap();
    let (reloaded, stats) = Cleaner::new().clean(&reloaded_raw).unwrap();

    assert_eq!(stats.rows_dropped(), 0);
    assert_eq!(reloaded, original);
}

#[test]
fn test_reruns_are_identical() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config = quiet_config(&temp_dir, &synthetic_csv(90), false);
    let pipeline = WeatherPipeline::new(config);

    let first = pipeline.run().expect("First run failed");
    let csv_before = std::fs::read(&first.cleaned_csv).unwrap();
    let report_before = std::fs::read_to_string(&first.report).unwrap();

    let second = pipeline.run().expect("Second run failed");
    assert_eq!(std::fs::read(&second.cleaned_csv).unwrap(), csv_before);
    assert_eq!(std::fs::read_to_string(&second.report).unwrap(), report_before);
    assert_eq!(first, second);
}

#[test]
fn test_header_only_input() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config = quiet_config(&temp_dir, "date,temp,rain,humidity\n", true);

    let summary = WeatherPipeline::new(config).run().expect("Pipeline failed");
    assert_eq!(summary.cleaning.rows_kept, 0);
    assert_eq!(summary.monthly_periods, 0);

    let cleaned = std::fs::read_to_string(&summary.cleaned_csv).unwrap();
    assert_eq!(cleaned, "date,temp,rain,humidity,month,season\n");

    let report = std::fs::read_to_string(&summary.report).unwrap();
    assert!(report.contains("Total records after cleaning: 0"));
}

#[test]
fn test_missing_column_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config = quiet_config(&temp_dir, "date,temp,humidity\n2020-01-01,1,2\n", false);

    let result = WeatherPipeline::new(config).run();
    match result {
        Err(ProcessingError::MissingColumn(column)) => assert_eq!(column, "rain"),
        other => panic!("Expected missing column error, got {:?}", other),
    }
}

#[test]
fn test_missing_input_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config = PipelineConfig {
        input_path: temp_dir.path().join("nope.csv"),
        output_dir: temp_dir.path().join("output"),
        quiet: true,
        ..Default::default()
    };

    let result = WeatherPipeline::new(config).run();
    assert!(matches!(result, Err(ProcessingError::Io(_))));
}

#[test]
fn test_unwritable_output_dir() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let blocker = temp_dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let config = PipelineConfig {
        output_dir: blocker.join("nested"),
        ..quiet_config(&temp_dir, SCENARIO_CSV, false)
    };

    let result = WeatherPipeline::new(config).run();
    assert!(matches!(result, Err(ProcessingError::Io(_))));
}

#[test]
fn test_cleaned_table_is_sorted() {
    let shuffled = "\
date,temp,rain,humidity
2021-03-05,1,0,40
2020-12-31,2,0,41
2021-01-15,3,0,42
";
    let raw = WeatherCsvReader::new().read_from(shuffled.as_bytes()).unwrap();
    let (table, _): (WeatherTable, _) = Cleaner::new().clean(&raw).unwrap();

    assert!(table.is_sorted_by_date());
    assert_eq!(
        table.first_date(),
        NaiveDate::from_ymd_opt(2020, 12, 31)
    );
    assert_eq!(table.records()[2].season(), Season::Spring);
}
