use chrono::NaiveDate;

use crate::models::{Season, YearMonth};

/// Mean temperature of one calendar day; `None` for days without observations.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyMean {
    pub date: NaiveDate,
    pub temp_mean: Option<f64>,
}

/// Resampled statistics for one calendar period (month or year).
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodStats<K> {
    pub period: K,
    pub count: usize,
    pub temp_mean: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Sample standard deviation, undefined below two observations
    pub temp_std: Option<f64>,
    pub rain_sum: f64,
    pub rain_mean: f64,
    pub humidity_mean: f64,
}

/// Grouped statistics for a categorical key (month-of-year or season).
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStats<K> {
    pub key: K,
    pub count: usize,
    pub temp_mean: f64,
    pub rain_sum: f64,
    pub humidity_mean: f64,
}

pub type MonthlyStats = PeriodStats<YearMonth>;
pub type YearlyStats = PeriodStats<i32>;
pub type MonthGroup = GroupStats<u32>;
pub type SeasonGroup = GroupStats<Season>;

/// Every derived view of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregates {
    pub daily: Vec<DailyMean>,
    pub monthly: Vec<MonthlyStats>,
    pub yearly: Vec<YearlyStats>,
    pub by_month: Vec<MonthGroup>,
    pub by_season: Vec<SeasonGroup>,
}

impl Aggregates {
    /// Monthly rainfall totals as `(YYYY-MM, sum)` pairs
    pub fn monthly_rain_totals(&self) -> Vec<(String, f64)> {
        self.monthly
            .iter()
            .map(|m| (m.period.to_string(), m.rain_sum))
            .collect()
    }

    pub fn observed_days(&self) -> usize {
        self.daily.iter().filter(|d| d.temp_mean.is_some()).count()
    }
}
