pub mod profiler;

pub use profiler::{ColumnKind, ColumnProfile, NumericSummary, TableProfile, TableProfiler, TextSummary};
