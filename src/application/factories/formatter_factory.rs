use crate::adapters::outbound::formatters::{JsonFormatter, TableFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::CatalogFormatter;

/// Factory for creating catalog formatters
///
/// Selects the formatter adapter for an output format. Table output is
/// coloured only when asked to, so the caller decides based on whether
/// stdout is a terminal.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use stig_catalog::application::dto::OutputFormat;
    /// use stig_catalog::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Json, false);
    /// ```
    pub fn create(format: OutputFormat, colored: bool) -> Box<dyn CatalogFormatter> {
        match format {
            OutputFormat::Table => Box::new(TableFormatter::new(colored)),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }
}
