use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{Season, YearMonth};

/// One cleaned daily observation; every field is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub date: NaiveDate,
    pub temp: f64,
    pub rain: f64,
    pub humidity: f64,
}

impl WeatherRecord {
    pub fn new(date: NaiveDate, temp: f64, rain: f64, humidity: f64) -> Self {
        Self {
            date,
            temp,
            rain,
            humidity,
        }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn year_month(&self) -> YearMonth {
        YearMonth::from_date(self.date)
    }

    pub fn season(&self) -> Season {
        Season::from_date(self.date)
    }
}

/// A row as written to the cleaned CSV, with the grouping helper columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedRow {
    pub date: NaiveDate,
    pub temp: f64,
    pub rain: f64,
    pub humidity: f64,
    pub month: u32,
    pub season: Season,
}

impl From<&WeatherRecord> for CleanedRow {
    fn from(record: &WeatherRecord) -> Self {
        Self {
            date: record.date,
            temp: record.temp,
            rain: record.rain,
            humidity: record.humidity,
            month: record.month(),
            season: record.season(),
        }
    }
}
