pub mod aggregator;
pub mod cleaner;
pub mod pipeline;
pub mod statistics;

pub use aggregator::Aggregator;
pub use cleaner::{Cleaner, CleaningStats};
pub use pipeline::{PipelineSummary, WeatherPipeline};
