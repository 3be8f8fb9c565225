/// Output format of the scan reports
///
/// Shared by the CLI (argument parsing) and the formatter factory, so it lives
/// in the application layer rather than in either adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// CSV files written to the output directory (default)
    #[default]
    Csv,
    /// Markdown style tables printed to stdout
    Table,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "table" | "markdown" | "md" => Ok(OutputFormat::Table),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'csv' or 'table'",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Table => write!(f, "table"),
        }
    }
}
