use crate::application::read_models::RuleDetailView;
use crate::ports::outbound::CatalogFormatter;
use crate::shared::error::StigError;
use crate::shared::Result;
use crate::stig_catalog::domain::{Benchmark, Rule};
use serde::Serialize;

/// Top-level JSON document: every listing is wrapped in `data`
#[derive(Serialize)]
struct DataEnvelope<'a, T> {
    data: &'a [T],
}

/// JsonFormatter adapter producing `{"data": [...]}` documents
///
/// Field names follow the snapshot (camelCase, RFC 3339 dates).
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    fn render<T: Serialize>(records: &[T]) -> Result<String> {
        let mut output = serde_json::to_string_pretty(&DataEnvelope { data: records })
            .map_err(|e| StigError::parse(format!("failed to serialize output: {}", e)))?;
        output.push('\n');
        Ok(output)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogFormatter for JsonFormatter {
    fn format_benchmarks(&self, benchmarks: &[Benchmark]) -> Result<String> {
        Self::render(benchmarks)
    }

    fn format_rules(&self, rules: &[Rule]) -> Result<String> {
        Self::render(rules)
    }

    fn format_rule_details(&self, details: &[RuleDetailView]) -> Result<String> {
        Self::render(details)
    }
}
