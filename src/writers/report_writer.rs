use crate::error::Result;
use crate::models::{Aggregates, WeatherTable};
use crate::utils::constants::DEFAULT_PREVIEW_ROWS;
use crate::writers::table_format::{render_group_stats, render_period_stats};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

const INTERPRETATION_PROMPTS: &str = "Interpretation (fill in by yourself):\n\
    - Comment on temperature trends.\n\
    - Comment on rainfall trends.\n\
    - Mention any extreme values / anomalies.\n";

/// Composes and writes the plain-text summary report.
pub struct ReportWriter {
    monthly_rows: usize,
}

impl ReportWriter {
    pub fn new() -> Self {
        Self {
            monthly_rows: DEFAULT_PREVIEW_ROWS,
        }
    }

    /// Number of monthly rows shown in the report
    pub fn with_monthly_rows(mut self, rows: usize) -> Self {
        self.monthly_rows = rows;
        self
    }

    pub fn compose(&self, table: &WeatherTable, aggregates: &Aggregates) -> String {
        let monthly_head = &aggregates.monthly[..self.monthly_rows.min(aggregates.monthly.len())];

        let mut report = String::new();
        report.push_str("Weather Data Report\n");
        report.push_str("===================\n\n");
        report.push_str(&format!(
            "Total records after cleaning: {}\n\n",
            table.len()
        ));

        let sections = [
            (
                "Monthly stats (first few rows):",
                render_period_stats("month", monthly_head),
            ),
            ("Yearly stats:", render_period_stats("year", &aggregates.yearly)),
            ("Grouped by month:", render_group_stats("month", &aggregates.by_month)),
            ("Grouped by season:", render_group_stats("season", &aggregates.by_season)),
        ];
        for (title, body) in sections {
            report.push_str(title);
            report.push('\n');
            report.push_str(&body);
            report.push_str("\n\n");
        }

        report.push_str(INTERPRETATION_PROMPTS);
        report
    }

    pub fn write_report(
        &self,
        table: &WeatherTable,
        aggregates: &Aggregates,
        path: &Path,
    ) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(self.compose(table, aggregates).as_bytes())?;
        writer.flush()?;

        info!("Report saved to {}", path.display());
        Ok(())
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}
