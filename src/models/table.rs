use chrono::NaiveDate;

use crate::models::WeatherRecord;

/// Table as read from disk: header names and raw string fields, column order preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Raw values of one column; short rows yield an empty string
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(String::as_str).unwrap_or(""))
    }

    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }
}

/// Cleaned observations keyed by date, ascending.
///
/// Equal dates keep their input order. Lookups by date use binary search
/// over the sorted records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherTable {
    records: Vec<WeatherRecord>,
}

impl WeatherTable {
    pub fn new(mut records: Vec<WeatherRecord>) -> Self {
        // Stable sort keeps duplicate dates in input order
        records.sort_by_key(|r| r.date);
        Self { records }
    }

    pub fn records(&self) -> &[WeatherRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeatherRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.first_date()?, self.last_date()?))
    }

    pub fn head(&self, n: usize) -> &[WeatherRecord] {
        &self.records[..n.min(self.records.len())]
    }

    pub fn is_sorted_by_date(&self) -> bool {
        self.records.windows(2).all(|w| w[0].date <= w[1].date)
    }
}

impl<'a> IntoIterator for &'a WeatherTable {
    type Item = &'a WeatherRecord;
    type IntoIter = std::slice::Iter<'a, WeatherRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weather_table_sorts_by_date() {
        let table = WeatherTable::new(vec![
            WeatherRecord::new(date(2020, 1, 3), 3.0, 0.0, 50.0),
            WeatherRecord::new(date(2020, 1, 1), 1.0, 0.0, 50.0),
            WeatherRecord::new(date(2020, 1, 2), 2.0, 0.0, 50.0),
        ]);

        assert!(table.is_sorted_by_date());
        assert_eq!(table.records()[0].temp, 1.0);
        assert_eq!(table.date_range(), Some((date(2020, 1, 1), date(2020, 1, 3))));
    }

    #[test]
    fn test_duplicate_dates_keep_input_order() {
        let table = WeatherTable::new(vec![
            WeatherRecord::new(date(2020, 1, 2), 20.0, 0.0, 50.0),
            WeatherRecord::new(date(2020, 1, 1), 1.0, 0.0, 50.0),
            WeatherRecord::new(date(2020, 1, 2), 10.0, 0.0, 50.0),
        ]);

        let temps: Vec<f64> = table.iter().map(|r| r.temp).collect();
        assert_eq!(temps, vec![1.0, 20.0, 10.0]);
    }

    #[test]
    fn test_head_is_clamped() {
        let table = WeatherTable::new(vec![
            WeatherRecord::new(date(2020, 1, 1), 1.0, 0.0, 50.0),
            WeatherRecord::new(date(2020, 2, 1), 2.0, 0.0, 50.0),
        ]);

        assert_eq!(table.head(1).len(), 1);
        assert_eq!(table.head(10).len(), 2);
        assert!(WeatherTable::default().head(5).is_empty());
    }

    #[test]
    fn test_raw_table_column_access() {
        let table = RawTable::new(
            vec!["date".to_string(), "temp".to_string()],
            vec![
                vec!["2020-01-01".to_string(), "10".to_string()],
                vec!["2020-01-02".to_string()],
            ],
        );

        assert_eq!(table.column_index("temp"), Some(1));
        assert_eq!(table.column_index("rain"), None);
        let temps: Vec<&str> = table.column_values(1).collect();
        assert_eq!(temps, vec!["10", ""]);
        assert_eq!(table.head(10).len(), 2);
    }
}
