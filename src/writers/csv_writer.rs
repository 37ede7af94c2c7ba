use crate::error::Result;
use crate::models::{CleanedRow, WeatherTable};
use csv::Writer;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// Writes the cleaned table, date first, with the month and season helper columns.
pub struct CleanedCsvWriter;

impl CleanedCsvWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_table(&self, table: &WeatherTable, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = Writer::from_writer(BufWriter::new(file));

        if table.is_empty() {
            // serialize() only emits a header alongside the first row
            writer.write_record(["date", "temp", "rain", "humidity", "month", "season"])?;
        }

        for record in table {
            writer.serialize(CleanedRow::from(record))?;
        }

        writer.flush()?;
        info!("Wrote {} rows to {}", table.len(), path.display());
        Ok(())
    }
}

impl Default for CleanedCsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeatherRecord;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_write_cleaned_csv() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("cleaned.csv");

        let table = WeatherTable::new(vec![
            WeatherRecord::new(NaiveDate::from_ymd_opt(2020, 6, 2).unwrap(), 21.5, 0.0, 45.0),
            WeatherRecord::new(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(), -2.25, 1.2, 80.0),
        ]);
        CleanedCsvWriter::new().write_table(&table, &path)?;

        let content = std::fs::read_to_string(&path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "date,temp,rain,humidity,month,season");
        assert_eq!(lines[1], "2020-01-01,-2.25,1.2,80.0,1,Winter");
        assert_eq!(lines[2], "2020-06-02,21.5,0.0,45.0,6,Summer");
        Ok(())
    }

    #[test]
    fn test_write_empty_table_keeps_header() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("empty.csv");

        CleanedCsvWriter::new().write_table(&WeatherTable::default(), &path)?;

        let content = std::fs::read_to_string(&path)?;
        assert_eq!(content, "date,temp,rain,humidity,month,season\n");
        Ok(())
    }

    #[test]
    fn test_unwritable_location_is_fatal() {
        let result = CleanedCsvWriter::new()
            .write_table(&WeatherTable::default(), Path::new("/nonexistent/dir/out.csv"));
        assert!(result.is_err());
    }
}
