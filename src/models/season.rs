use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Meteorological season of the northern hemisphere.
///
/// Variants are declared in calendar order starting from December. Season
/// groupings are reported by name instead (Autumn, Spring, Summer, Winter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Autumn];

    /// Season for a 1-based month number, `None` outside 1..=12
    pub fn from_month_number(month: u32) -> Option<Self> {
        u8::try_from(month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(Season::from)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_month_number(date.month()).unwrap_or(Season::Winter)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
        }
    }

    pub fn months(&self) -> [Month; 3] {
        match self {
            Season::Winter => [Month::December, Month::January, Month::February],
            Season::Spring => [Month::March, Month::April, Month::May],
            Season::Summer => [Month::June, Month::July, Month::August],
            Season::Autumn => [Month::September, Month::October, Month::November],
        }
    }
}

impl From<Month> for Season {
    fn from(month: Month) -> Self {
        match month {
            Month::December | Month::January | Month::February => Season::Winter,
            Month::March | Month::April | Month::May => Season::Spring,
            Month::June | Month::July | Month::August => Season::Summer,
            Month::September | Month::October | Month::November => Season::Autumn,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
