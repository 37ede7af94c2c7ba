use crate::error::{ProcessingError, Result};
use crate::models::{Aggregates, WeatherRecord, WeatherTable};
use crate::utils::constants::{
    COMBINED_CHART, DAILY_TEMPERATURE_CHART, DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH,
    HUMIDITY_TEMPERATURE_CHART, MONTHLY_RAINFALL_CHART,
};
use crate::utils::progress::ProgressReporter;
use chrono::{Duration, NaiveDate};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info};

/// DejaVu Sans, registered under the family plotters uses for captions and labels
static FONT_DATA: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
const FONT_FAMILY: &str = "sans-serif";
const CAPTION_FONT: (&str, u32) = (FONT_FAMILY, 22);

/// Most month labels drawn under the rainfall bars
const MAX_MONTH_LABELS: usize = 24;

/// Register the embedded font with plotters; later calls reuse the first outcome
pub fn ensure_font_registered() -> Result<()> {
    static REGISTERED: OnceLock<std::result::Result<(), String>> = OnceLock::new();

    REGISTERED
        .get_or_init(|| {
            register_font(FONT_FAMILY, FontStyle::Normal, FONT_DATA)
                .map_err(|_| "embedded chart font could not be loaded".to_string())
        })
        .clone()
        .map_err(ProcessingError::Plot)
}

/// Renders the four PNG charts.
///
/// Every chart is drawn through an explicit `DrawingArea`, so the combined
/// figure reuses the same drawing functions on its two panels.
pub struct ChartRenderer {
    width: u32,
    height: u32,
}

impl ChartRenderer {
    pub fn new() -> Self {
        Self {
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Render every chart into `output_dir`, returning the written paths in order
    pub fn render_all(
        &self,
        table: &WeatherTable,
        aggregates: &Aggregates,
        output_dir: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<PathBuf>> {
        let rain_totals = aggregates.monthly_rain_totals();
        let mut written = Vec::with_capacity(4);

        let daily = output_dir.join(DAILY_TEMPERATURE_CHART);
        announce(progress, &daily);
        self.render_daily_temperature(table.records(), &daily)?;
        written.push(daily);
        advance(progress);

        let monthly = output_dir.join(MONTHLY_RAINFALL_CHART);
        announce(progress, &monthly);
        self.render_monthly_rainfall(&rain_totals, &monthly)?;
        written.push(monthly);
        advance(progress);

        let scatter = output_dir.join(HUMIDITY_TEMPERATURE_CHART);
        announce(progress, &scatter);
        self.render_humidity_vs_temperature(table.records(), &scatter)?;
        written.push(scatter);
        advance(progress);

        let combined = output_dir.join(COMBINED_CHART);
        announce(progress, &combined);
        self.render_combined(table.records(), &rain_totals, &combined)?;
        written.push(combined);
        advance(progress);

        info!("Rendered {} charts into {}", written.len(), output_dir.display());
        Ok(written)
    }

    pub fn render_daily_temperature(&self, records: &[WeatherRecord], path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        draw_temperature_line(&root, records)?;
        root.present().map_err(ProcessingError::plot)?;
        debug!("Saved {}", path.display());
        Ok(())
    }

    pub fn render_monthly_rainfall(&self, totals: &[(String, f64)], path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        draw_rainfall_bars(&root, totals)?;
        root.present().map_err(ProcessingError::plot)?;
        debug!("Saved {}", path.display());
        Ok(())
    }

    pub fn render_humidity_vs_temperature(
        &self,
        records: &[WeatherRecord],
        path: &Path,
    ) -> Result<()> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        draw_humidity_scatter(&root, records)?;
        root.present().map_err(ProcessingError::plot)?;
        debug!("Saved {}", path.display());
        Ok(())
    }

    /// Temperature line above monthly rainfall bars on one canvas
    pub fn render_combined(
        &self,
        records: &[WeatherRecord],
        totals: &[(String, f64)],
        path: &Path,
    ) -> Result<()> {
        let root = BitMapBackend::new(path, (self.width, self.height * 2)).into_drawing_area();
        root.fill(&WHITE).map_err(ProcessingError::plot)?;

        let panels = root.split_evenly((2, 1));
        draw_temperature_line(&panels[0], records)?;
        draw_rainfall_bars(&panels[1], totals)?;

        root.present().map_err(ProcessingError::plot)?;
        debug!("Saved {}", path.display());
        Ok(())
    }
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn announce(progress: Option<&ProgressReporter>, path: &Path) {
    if let Some(p) = progress {
        p.set_message(&format!("Rendering {}", path.display()));
    }
}

fn advance(progress: Option<&ProgressReporter>) {
    if let Some(p) = progress {
        p.increment(1);
    }
}

/// Line chart of per-row temperature against date
pub fn draw_temperature_line<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    records: &[WeatherRecord],
) -> Result<()> {
    ensure_font_registered()?;
    area.fill(&WHITE).map_err(ProcessingError::plot)?;

    // Dates are plotted as day offsets from the first observation
    let origin = records.first().map(|r| r.date);
    let points: Vec<(f64, f64)> = records
        .iter()
        .map(|r| (day_offset(origin, r.date), r.temp))
        .collect();

    let x_range = padded_range(points.iter().map(|p| p.0));
    let y_range = padded_range(points.iter().map(|p| p.1));
    let date_label = |x: &f64| {
        origin
            .and_then(|o| o.checked_add_signed(Duration::days(x.round() as i64)))
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    };

    let mut chart = ChartBuilder::on(area)
        .caption("Daily Temperature", CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, y_range)
        .map_err(ProcessingError::plot)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Temperature")
        .x_labels(6)
        .x_label_formatter(&date_label)
        .draw()
        .map_err(ProcessingError::plot)?;

    chart
        .draw_series(LineSeries::new(points, &BLUE))
        .map_err(ProcessingError::plot)?;
    Ok(())
}

/// Bar chart of monthly rainfall totals, one bar per `YYYY-MM` label
pub fn draw_rainfall_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    totals: &[(String, f64)],
) -> Result<()> {
    ensure_font_registered()?;
    area.fill(&WHITE).map_err(ProcessingError::plot)?;

    let x_range = -0.5..(totals.len().max(1) as f64 - 0.5);
    let y_range = padded_range(totals.iter().map(|t| t.1).chain(std::iter::once(0.0)));
    let step = month_label_step(totals.len());
    let month_label = |x: &f64| month_tick_label(totals, step, *x);

    let mut chart = ChartBuilder::on(area)
        .caption("Monthly Rainfall Total", CAPTION_FONT)
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, y_range)
        .map_err(ProcessingError::plot)?;

    chart
        .configure_mesh()
        .x_desc("Month")
        .y_desc("Rainfall")
        // Twice as many ticks as bars keeps every bar centre on a tick
        .x_labels(totals.len().max(1) * 2)
        .x_label_formatter(&month_label)
        .disable_x_mesh()
        .draw()
        .map_err(ProcessingError::plot)?;

    chart
        .draw_series(totals.iter().enumerate().map(|(i, (_, total))| {
            let center = i as f64;
            Rectangle::new([(center - 0.4, 0.0), (center + 0.4, *total)], BLUE.filled())
        }))
        .map_err(ProcessingError::plot)?;
    Ok(())
}

/// Scatter of humidity against temperature, one point per record
pub fn draw_humidity_scatter<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    records: &[WeatherRecord],
) -> Result<()> {
    ensure_font_registered()?;
    area.fill(&WHITE).map_err(ProcessingError::plot)?;

    let x_range = padded_range(records.iter().map(|r| r.temp));
    let y_range = padded_range(records.iter().map(|r| r.humidity));

    let mut chart = ChartBuilder::on(area)
        .caption("Humidity vs Temperature", CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, y_range)
        .map_err(ProcessingError::plot)?;

    chart
        .configure_mesh()
        .x_desc("Temperature")
        .y_desc("Humidity")
        .draw()
        .map_err(ProcessingError::plot)?;

    chart
        .draw_series(
            records
                .iter()
                .map(|r| Circle::new((r.temp, r.humidity), 3, BLUE.filled())),
        )
        .map_err(ProcessingError::plot)?;
    Ok(())
}

/// Bars per labelled bar, so at most `MAX_MONTH_LABELS` labels are drawn
fn month_label_step(months: usize) -> usize {
    ((months + MAX_MONTH_LABELS - 1) / MAX_MONTH_LABELS).max(1)
}

/// `YYYY-MM` label for a tick at a bar centre whose index is a multiple of `step`
fn month_tick_label(totals: &[(String, f64)], step: usize, x: f64) -> String {
    let index = x.round();
    if (x - index).abs() > 1e-9 || index < 0.0 {
        return String::new();
    }

    let index = index as usize;
    if index % step != 0 {
        return String::new();
    }
    totals
        .get(index)
        .map(|(label, _)| label.clone())
        .unwrap_or_default()
}

fn day_offset(origin: Option<NaiveDate>, date: NaiveDate) -> f64 {
    origin
        .map(|o| date.signed_duration_since(o).num_days() as f64)
        .unwrap_or(0.0)
}

/// Axis range covering all values with a 5% margin; never empty or zero-width
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    if max - min < f64::EPSILON {
        return (min - 1.0)..(max + 1.0);
    }

    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}
