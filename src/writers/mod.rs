pub mod csv_writer;
pub mod report_writer;
pub mod table_format;

pub use csv_writer::CleanedCsvWriter;
pub use report_writer::ReportWriter;
