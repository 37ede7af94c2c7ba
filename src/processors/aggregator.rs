use crate::models::{
    Aggregates, DailyMean, GroupStats, MonthGroup, MonthlyStats, PeriodStats, Season,
    SeasonGroup, WeatherRecord, WeatherTable, YearMonth, YearlyStats,
};
use crate::processors::statistics;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Resamples and groups a cleaned table.
///
/// Each view is built the same way: records are bucketed into a `BTreeMap`
/// keyed by period or category, then every non-empty bucket is reduced.
/// Buckets come out in key order.
pub struct Aggregator;

impl Aggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn aggregate(&self, table: &WeatherTable) -> Aggregates {
        let aggregates = Aggregates {
            daily: self.daily_mean_temperature(table),
            monthly: self.monthly_stats(table),
            yearly: self.yearly_stats(table),
            by_month: self.group_by_month(table),
            by_season: self.group_by_season(table),
        };

        info!(
            "Aggregated {} days ({} observed), {} months, {} years",
            aggregates.daily.len(),
            aggregates.observed_days(),
            aggregates.monthly.len(),
            aggregates.yearly.len()
        );
        aggregates
    }

    /// Mean temperature per calendar day over the full date span.
    ///
    /// Days between the first and last observation without any record are
    /// kept with `temp_mean = None` so the series has no calendar gaps.
    pub fn daily_mean_temperature(&self, table: &WeatherTable) -> Vec<DailyMean> {
        let Some((first, last)) = table.date_range() else {
            return Vec::new();
        };

        let buckets = group_records(table, |r| r.date);
        let daily: Vec<DailyMean> = first
            .iter_days()
            .take_while(|day| *day <= last)
            .map(|date| DailyMean {
                date,
                temp_mean: buckets.get(&date).and_then(|records| {
                    statistics::mean(&column(records, |r| r.temp))
                }),
            })
            .collect();

        debug!("Daily index spans {} to {}", first, last);
        daily
    }

    pub fn monthly_stats(&self, table: &WeatherTable) -> Vec<MonthlyStats> {
        group_records(table, WeatherRecord::year_month)
            .into_iter()
            .filter_map(|(period, records)| reduce_period(period, &records))
            .collect()
    }

    pub fn yearly_stats(&self, table: &WeatherTable) -> Vec<YearlyStats> {
        group_records(table, WeatherRecord::year)
            .into_iter()
            .filter_map(|(period, records)| reduce_period(period, &records))
            .collect()
    }

    /// Month-of-year (1-12) groups, merged across years
    pub fn group_by_month(&self, table: &WeatherTable) -> Vec<MonthGroup> {
        group_records(table, WeatherRecord::month)
            .into_iter()
            .filter_map(|(key, records)| reduce_group(key, &records))
            .collect()
    }

    /// Season groups, merged across years, ordered by season name
    pub fn group_by_season(&self, table: &WeatherTable) -> Vec<SeasonGroup> {
        let mut groups: Vec<SeasonGroup> = group_records(table, WeatherRecord::season)
            .into_iter()
            .filter_map(|(key, records)| reduce_group::<Season>(key, &records))
            .collect();
        groups.sort_by_key(|g| g.key.as_str());
        groups
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

fn group_records<K, F>(table: &WeatherTable, key: F) -> BTreeMap<K, Vec<&WeatherRecord>>
where
    K: Ord,
    F: Fn(&WeatherRecord) -> K,
{
    let mut groups: BTreeMap<K, Vec<&WeatherRecord>> = BTreeMap::new();
    for record in table {
        groups.entry(key(record)).or_default().push(record);
    }
    groups
}

fn column<F>(records: &[&WeatherRecord], field: F) -> Vec<f64>
where
    F: Fn(&WeatherRecord) -> f64,
{
    records.iter().map(|r| field(r)).collect()
}

fn reduce_period<K>(period: K, records: &[&WeatherRecord]) -> Option<PeriodStats<K>> {
    let temps = column(records, |r| r.temp);
    let rains = column(records, |r| r.rain);
    let humidities = column(records, |r| r.humidity);

    Some(PeriodStats {
        period,
        count: records.len(),
        temp_mean: statistics::mean(&temps)?,
        temp_min: statistics::min(&temps)?,
        temp_max: statistics::max(&temps)?,
        temp_std: statistics::sample_std(&temps),
        rain_sum: statistics::sum(&rains),
        rain_mean: statistics::mean(&rains)?,
        humidity_mean: statistics::mean(&humidities)?,
    })
}

fn reduce_group<K>(key: K, records: &[&WeatherRecord]) -> Option<GroupStats<K>> {
    Some(GroupStats {
        key,
        count: records.len(),
        temp_mean: statistics::mean(&column(records, |r| r.temp))?,
        rain_sum: statistics::sum(&column(records, |r| r.rain)),
        humidity_mean: statistics::mean(&column(records, |r| r.humidity))?,
    })
}

/// Inclusive calendar span covered by a list of daily means
pub fn daily_span(daily: &[DailyMean]) -> Option<(NaiveDate, NaiveDate)> {
    Some((daily.first()?.date, daily.last()?.date))
}
