use crate::models::RawTable;
use crate::processors::statistics;
use crate::readers::{is_null_token, parse_number};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Text,
    /// Every value is missing
    Empty,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "float64",
            ColumnKind::Text => "object",
            ColumnKind::Empty => "empty",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextSummary {
    pub count: usize,
    pub unique: usize,
    pub top: String,
    pub freq: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    pub name: String,
    pub non_null: usize,
    pub kind: ColumnKind,
    pub numeric: Option<NumericSummary>,
    pub text: Option<TextSummary>,
}

/// Shape and per-column description of a raw table
#[derive(Debug, Clone, PartialEq)]
pub struct TableProfile {
    pub rows: usize,
    pub columns: Vec<ColumnProfile>,
}

impl TableProfile {
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "RangeIndex: {} entries, {} columns",
            self.rows,
            self.columns.len()
        )];
        for (i, column) in self.columns.iter().enumerate() {
            lines.push(format!(
                " {:>2}  {:<12} {:>6} non-null  {}",
                i,
                column.name,
                column.non_null,
                column.kind.as_str()
            ));
        }
        lines.join("\n")
    }
}

/// Describes a raw table before any cleaning: counts, inferred kinds and
/// distribution statistics for each column.
pub struct TableProfiler;

impl TableProfiler {
    pub fn new() -> Self {
        Self
    }

    pub fn profile(&self, table: &RawTable) -> TableProfile {
        let columns = table
            .headers()
            .iter()
            .enumerate()
            .map(|(index, name)| self.profile_column(name, table.column_values(index)))
            .collect();

        TableProfile {
            rows: table.len(),
            columns,
        }
    }

    fn profile_column<'a>(
        &self,
        name: &str,
        values: impl Iterator<Item = &'a str>,
    ) -> ColumnProfile {
        let present: Vec<&str> = values.filter(|v| !is_null_token(v)).collect();
        let numbers: Vec<f64> = present.iter().filter_map(|v| parse_number(v)).collect();

        let kind = if present.is_empty() {
            ColumnKind::Empty
        } else if numbers.len() == present.len() {
            ColumnKind::Numeric
        } else {
            ColumnKind::Text
        };

        ColumnProfile {
            name: name.to_string(),
            non_null: present.len(),
            kind,
            numeric: match kind {
                ColumnKind::Numeric => describe_numbers(&numbers),
                _ => None,
            },
            text: match kind {
                ColumnKind::Text => describe_text(&present),
                _ => None,
            },
        }
    }
}

impl Default for TableProfiler {
    fn default() -> Self {
        Self::new()
    }
}

fn describe_numbers(values: &[f64]) -> Option<NumericSummary> {
    Some(NumericSummary {
        count: values.len(),
        mean: statistics::mean(values)?,
        std: statistics::sample_std(values),
        min: statistics::min(values)?,
        q25: statistics::quantile(values, 0.25)?,
        median: statistics::quantile(values, 0.5)?,
        q75: statistics::quantile(values, 0.75)?,
        max: statistics::max(values)?,
    })
}

fn describe_text(values: &[&str]) -> Option<TextSummary> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(*value).or_default() += 1;
    }

    // Ties resolve to the lexically smallest value
    let (top, freq) = counts
        .iter()
        .fold(None::<(&str, usize)>, |best, (value, count)| match best {
            Some((_, best_count)) if best_count >= *count => best,
            _ => Some((*value, *count)),
        })?;

    Some(TextSummary {
        count: values.len(),
        unique: counts.len(),
        top: top.to_string(),
        freq,
    })
}
