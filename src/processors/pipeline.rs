use crate::analyzers::TableProfiler;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{Aggregates, RawTable, WeatherTable};
use crate::plotting::ChartRenderer;
use crate::processors::aggregator::daily_span;
use crate::processors::{Aggregator, Cleaner, CleaningStats};
use crate::readers::WeatherCsvReader;
use crate::utils::constants::{CLEANED_CSV_FILE, REPORT_FILE};
use crate::utils::progress::ProgressReporter;
use crate::writers::table_format::{
    render_daily, render_group_stats, render_period_stats, render_profile, render_raw_head,
    render_records,
};
use crate::writers::{CleanedCsvWriter, ReportWriter};
use std::path::PathBuf;
use tracing::{info, warn};

/// What a completed run produced
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSummary {
    pub rows_loaded: usize,
    pub cleaning: CleaningStats,
    pub monthly_periods: usize,
    pub yearly_periods: usize,
    pub charts: Vec<PathBuf>,
    pub cleaned_csv: PathBuf,
    pub report: PathBuf,
}

impl PipelineSummary {
    pub fn summary(&self) -> String {
        let charts = if self.charts.is_empty() {
            "none".to_string()
        } else {
            self.charts
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };

        format!(
            "Run Summary:\n\
            - Rows loaded: {}\n\
            - Records after cleaning: {}\n\
            - Monthly periods: {}\n\
            - Yearly periods: {}\n\
            - Charts: {}\n\
            - Cleaned data: {}\n\
            - Report: {}",
            self.rows_loaded,
            self.cleaning.rows_kept,
            self.monthly_periods,
            self.yearly_periods,
            charts,
            self.cleaned_csv.display(),
            self.report.display()
        )
    }
}

/// Runs load, clean, aggregate, plot, group and export strictly in sequence.
///
/// Every stage consumes the previous stage's output; any error aborts the
/// run at that point.
pub struct WeatherPipeline {
    config: PipelineConfig,
}

impl WeatherPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run(&self) -> Result<PipelineSummary> {
        let raw = self.load()?;
        let (table, cleaning) = self.clean(&raw)?;
        let aggregates = self.analyze(&table);

        std::fs::create_dir_all(&self.config.output_dir)?;
        let charts = self.visualize(&table, &aggregates)?;
        self.group(&aggregates);
        let (cleaned_csv, report) = self.export(&table, &aggregates)?;

        let summary = PipelineSummary {
            rows_loaded: raw.len(),
            cleaning,
            monthly_periods: aggregates.monthly.len(),
            yearly_periods: aggregates.yearly.len(),
            charts,
            cleaned_csv,
            report,
        };
        info!("Pipeline complete");
        Ok(summary)
    }

    fn spinner(&self, message: &str) -> ProgressReporter {
        ProgressReporter::new_spinner(message, self.config.quiet)
    }

    fn load(&self) -> Result<RawTable> {
        let progress = self.spinner("Loading data...");
        progress.banner(1, "Data Loading");

        let raw = WeatherCsvReader::new().read_table(&self.config.input_path)?;
        let profile = TableProfiler::new().profile(&raw);

        progress.section("Head:", &render_raw_head(&raw, self.config.preview_rows));
        progress.section("Info:", &profile.summary());
        progress.section("Describe:", &render_profile(&profile));
        progress.finish_with_message(&format!("Loaded {} rows", raw.len()));
        Ok(raw)
    }

    fn clean(&self, raw: &RawTable) -> Result<(WeatherTable, CleaningStats)> {
        let progress = self.spinner("Cleaning data...");
        progress.banner(2, "Cleaning & Processing");

        let (table, stats) = Cleaner::new().clean(raw)?;

        progress.section(
            "After cleaning:",
            &render_records(table.head(self.config.preview_rows)),
        );
        progress.println(&stats.summary());
        progress.finish_with_message(&format!("{} records after cleaning", table.len()));
        Ok((table, stats))
    }

    fn analyze(&self, table: &WeatherTable) -> Aggregates {
        let progress = self.spinner("Computing statistics...");
        progress.banner(3, "Statistical Analysis");

        let aggregates = Aggregator::new().aggregate(table);
        let rows = self.config.preview_rows;

        if let Some((first, last)) = daily_span(&aggregates.daily) {
            info!(
                "Daily index covers {} to {} ({} days observed)",
                first,
                last,
                aggregates.observed_days()
            );
        }
        progress.section(
            &format!("Daily mean temperature (first {}):", rows),
            &render_daily(&aggregates.daily[..rows.min(aggregates.daily.len())]),
        );
        progress.section(
            &format!("Monthly stats (first {}):", rows),
            &render_period_stats("month", &aggregates.monthly[..rows.min(aggregates.monthly.len())]),
        );
        progress.section("Yearly stats:", &render_period_stats("year", &aggregates.yearly));
        progress.finish_with_message("Statistics computed");
        aggregates
    }

    fn visualize(&self, table: &WeatherTable, aggregates: &Aggregates) -> Result<Vec<PathBuf>> {
        let progress = ProgressReporter::new(4, "Rendering charts...", self.config.quiet);
        progress.banner(4, "Visualization (PNG files will be saved)");

        if !self.config.render_charts {
            warn!("Chart rendering disabled by configuration");
            progress.finish_with_message("Charts skipped");
            return Ok(Vec::new());
        }

        let charts = ChartRenderer::new()
            .with_size(self.config.chart_width, self.config.chart_height)
            .render_all(table, aggregates, &self.config.output_dir, Some(&progress))?;
        progress.finish_with_message(&format!("Saved {} charts", charts.len()));
        Ok(charts)
    }

    fn group(&self, aggregates: &Aggregates) {
        let progress = self.spinner("Grouping...");
        progress.banner(5, "Grouping & Aggregation");
        progress.section(
            "Grouped by month:",
            &render_group_stats("month", &aggregates.by_month),
        );
        progress.section(
            "Grouped by season:",
            &render_group_stats("season", &aggregates.by_season),
        );
        progress.finish_with_message("Grouping complete");
    }

    fn export(&self, table: &WeatherTable, aggregates: &Aggregates) -> Result<(PathBuf, PathBuf)> {
        let progress = self.spinner("Exporting...");
        progress.banner(6, "Export & Report");

        let cleaned_csv = self.config.output_path(CLEANED_CSV_FILE);
        CleanedCsvWriter::new().write_table(table, &cleaned_csv)?;
        progress.println(&format!("Cleaned data saved to {}", cleaned_csv.display()));

        let report = self.config.output_path(REPORT_FILE);
        ReportWriter::new()
            .with_monthly_rows(self.config.preview_rows)
            .write_report(table, aggregates, &report)?;
        progress.println(&format!("Report saved to {}", report.display()));

        progress.finish_with_message("Export complete");
        Ok((cleaned_csv, report))
    }
}
