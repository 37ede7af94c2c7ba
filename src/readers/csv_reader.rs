use crate::error::{ProcessingError, Result};
use crate::models::RawTable;
use crate::utils::constants::DEFAULT_BUFFER_SIZE;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Reads a weather CSV into a `RawTable` without interpreting any field.
pub struct WeatherCsvReader;

impl WeatherCsvReader {
    pub fn new() -> Self {
        Self
    }

    /// Read a CSV file with a header row
    pub fn read_table(&self, path: &Path) -> Result<RawTable> {
        info!("Loading {}", path.display());
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let table = self.read_from(reader)?;

        info!(
            "Loaded {} rows with columns {:?}",
            table.len(),
            table.headers()
        );
        Ok(table)
    }

    /// Read CSV content from any reader
    pub fn read_from<R: Read>(&self, reader: R) -> Result<RawTable> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for (index, result) in csv_reader.records().enumerate() {
            let record = result?;

            // Header is line 1, first data row is line 2
            if record.len() > headers.len() {
                return Err(ProcessingError::InvalidFormat(format!(
                    "Expected {} fields on line {}, saw {}",
                    headers.len(),
                    index + 2,
                    record.len()
                )));
            }

            let mut row: Vec<String> = record.iter().map(|f| f.to_string()).collect();
            if row.len() < headers.len() {
                debug!("Padding short row on line {}", index + 2);
                row.resize(headers.len(), String::new());
            }
            rows.push(row);
        }

        Ok(RawTable::new(headers, rows))
    }
}

impl Default for WeatherCsvReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_preserves_column_order() {
        let data = "date,temp,rain,humidity,station\n2020-01-01,10,0,50,A\n";
        let table = WeatherCsvReader::new().read_from(data.as_bytes()).unwrap();

        assert_eq!(table.headers(), &["date", "temp", "rain", "humidity", "station"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0][4], "A");
    }

    #[test]
    fn test_short_rows_are_padded() {
        let data = "date,temp,rain,humidity\n2020-01-01,10\n";
        let table = WeatherCsvReader::new().read_from(data.as_bytes()).unwrap();

        assert_eq!(table.rows()[0], vec!["2020-01-01", "10", "", ""]);
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let data = "date,temp,rain,humidity\n2020-01-01,10,0,50,extra\n";
        let result = WeatherCsvReader::new().read_from(data.as_bytes());

        assert!(matches!(result, Err(ProcessingError::InvalidFormat(_))));
    }

    #[test]
    fn test_header_only_file() {
        let table = WeatherCsvReader::new()
            .read_from("date,temp,rain,humidity\n".as_bytes())
            .unwrap();

        assert!(table.is_empty());
        assert_eq!(table.headers().len(), 4);
    }

    #[test]
    fn test_read_file_and_missing_file() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "date,temp,rain,humidity")?;
        writeln!(temp_file, "2020-01-01, 10.5 ,0,null")?;

        let table = WeatherCsvReader::new().read_table(temp_file.path())?;
        assert_eq!(table.rows()[0][1], "10.5");
        assert_eq!(table.rows()[0][3], "null");

        let missing = WeatherCsvReader::new().read_table(Path::new("does/not/exist.csv"));
        assert!(matches!(missing, Err(ProcessingError::Io(_))));

        Ok(())
    }
}
