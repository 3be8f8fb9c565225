use crate::adapters::outbound::formatters::{CsvFormatter, TableFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::ReportFormatter;

/// Factory for creating report formatters
///
/// This factory encapsulates the creation logic for different formatter implementations,
/// following the Factory Pattern. It belongs in the application layer as it orchestrates
/// the selection of infrastructure adapters based on application needs.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use ado_scanner::application::dto::OutputFormat;
    /// use ado_scanner::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Csv);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn ReportFormatter> {
        match format {
            OutputFormat::Csv => Box::new(CsvFormatter::new()),
            OutputFormat::Table => Box::new(TableFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    ///
    /// # Examples
    /// ```
    /// use ado_scanner::application::dto::OutputFormat;
    /// use ado_scanner::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Csv);
    /// assert_eq!(message, "📝 Writing CSV reports...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Csv => "📝 Writing CSV reports...",
            OutputFormat::Table => "📝 Rendering report tables...",
        }
    }
}
