pub mod csv_reader;
pub mod field_parser;

pub use csv_reader::WeatherCsvReader;
pub use field_parser::{is_null_token, parse_date, parse_number};
