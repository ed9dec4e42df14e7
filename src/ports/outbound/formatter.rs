use crate::application::read_models::RuleDetailView;
use crate::shared::Result;
use crate::stig_catalog::domain::{Benchmark, Rule};

/// CatalogFormatter port for rendering query results
///
/// One implementation per output format (table, JSON).
pub trait CatalogFormatter {
    /// Renders the benchmark listing
    fn format_benchmarks(&self, benchmarks: &[Benchmark]) -> Result<String>;

    /// Renders the rule listing of one benchmark
    fn format_rules(&self, rules: &[Rule]) -> Result<String>;

    /// Renders full rule details, each paired with its benchmark title
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format_rule_details(&self, details: &[RuleDetailView]) -> Result<String>;
}
