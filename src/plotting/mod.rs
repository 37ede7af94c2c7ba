pub mod charts;

pub use charts::{draw_humidity_scatter, draw_rainfall_bars, draw_temperature_line, ChartRenderer};
