use crate::error::{ProcessingError, Result};
use crate::models::{RawTable, WeatherRecord, WeatherTable};
use crate::readers::{parse_date, parse_number};
use crate::utils::constants::{DATE_COLUMN, HUMIDITY_COLUMN, RAIN_COLUMN, TEMP_COLUMN};
use tracing::{debug, info, warn};

/// Row accounting for one cleaning pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleaningStats {
    pub rows_read: usize,
    pub rows_kept: usize,
    /// Rows whose date was missing or unparsable
    pub dropped_bad_date: usize,
    /// Rows with a valid date but a missing or non-numeric measurement
    pub dropped_missing_value: usize,
}

impl CleaningStats {
    pub fn rows_dropped(&self) -> usize {
        self.dropped_bad_date + self.dropped_missing_value
    }

    pub fn summary(&self) -> String {
        format!(
            "Cleaning Summary:\n\
            - Rows read: {}\n\
            - Rows kept: {}\n\
            - Dropped (bad date): {}\n\
            - Dropped (missing value): {}",
            self.rows_read, self.rows_kept, self.dropped_bad_date, self.dropped_missing_value
        )
    }
}

/// Positions of the required columns in the raw header
struct ColumnIndices {
    date: usize,
    temp: usize,
    rain: usize,
    humidity: usize,
}

/// Turns a raw table into a date-sorted table without nulls.
///
/// Dates and numbers that cannot be parsed are treated as missing, and any
/// row with a missing required field is dropped. Extra columns are ignored.
pub struct Cleaner;

impl Cleaner {
    pub fn new() -> Self {
        Self
    }

    pub fn clean(&self, raw: &RawTable) -> Result<(WeatherTable, CleaningStats)> {
        let columns = self.locate_columns(raw)?;
        let mut stats = CleaningStats {
            rows_read: raw.len(),
            ..Default::default()
        };

        let mut records = Vec::with_capacity(raw.len());
        for (index, row) in raw.rows().iter().enumerate() {
            let field = |i: usize| row.get(i).map(String::as_str).unwrap_or("");

            let Some(date) = parse_date(field(columns.date)) else {
                debug!("Row {}: unparsable date '{}'", index, field(columns.date));
                stats.dropped_bad_date += 1;
                continue;
            };

            match (
                parse_number(field(columns.temp)),
                parse_number(field(columns.rain)),
                parse_number(field(columns.humidity)),
            ) {
                (Some(temp), Some(rain), Some(humidity)) => {
                    records.push(WeatherRecord::new(date, temp, rain, humidity));
                }
                _ => {
                    debug!("Row {}: missing measurement on {}", index, date);
                    stats.dropped_missing_value += 1;
                }
            }
        }

        let table = WeatherTable::new(records);
        stats.rows_kept = table.len();

        if stats.rows_dropped() > 0 {
            warn!(
                "Dropped {} of {} rows ({} bad dates, {} missing values)",
                stats.rows_dropped(),
                stats.rows_read,
                stats.dropped_bad_date,
                stats.dropped_missing_value
            );
        }
        info!("Cleaned table holds {} records", table.len());

        Ok((table, stats))
    }

    fn locate_columns(&self, raw: &RawTable) -> Result<ColumnIndices> {
        let find = |name: &str| {
            raw.column_index(name)
                .ok_or_else(|| ProcessingError::MissingColumn(name.to_string()))
        };

        Ok(ColumnIndices {
            date: find(DATE_COLUMN)?,
            temp: find(TEMP_COLUMN)?,
            rain: find(RAIN_COLUMN)?,
            humidity: find(HUMIDITY_COLUMN)?,
        })
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new()
    }
}
