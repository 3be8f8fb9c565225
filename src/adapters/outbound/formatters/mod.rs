/// Formatter adapters for the report output formats
mod csv_formatter;
mod table_formatter;

pub use csv_formatter::CsvFormatter;
pub use table_formatter::TableFormatter;
