use crate::stig_catalog::domain::Rule;
use serde::Serialize;

/// A rule paired with the title of the benchmark that owns it
///
/// Serializes flat: the rule's own fields plus `benchmarkTitle`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDetailView {
    pub benchmark_title: String,
    #[serde(flatten)]
    pub rule: Rule,
}

impl RuleDetailView {
    pub fn new(benchmark_title: impl Into<String>, rule: Rule) -> Self {
        Self {
            benchmark_title: benchmark_title.into(),
            rule,
        }
    }
}
