pub mod aggregates;
pub mod observation;
pub mod period;
pub mod season;
pub mod table;

pub use aggregates::{
    Aggregates, DailyMean, GroupStats, MonthGroup, MonthlyStats, PeriodStats, SeasonGroup,
    YearlyStats,
};
pub use observation::{CleanedRow, WeatherRecord};
pub use period::YearMonth;
pub use season::Season;
pub use table::{RawTable, WeatherTable};
