use super::benchmark::BenchmarkIndex;
use serde::{Deserialize, Serialize};

/// Categorical risk level of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::High, Severity::Medium, Severity::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    /// Source documents use lowercase values; anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            _ => Err(format!(
                "Invalid severity: '{}'. Expected one of high, medium, low",
                s
            )),
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized rule that is not yet attached to a benchmark
#[derive(Debug, Clone, PartialEq)]
pub struct RuleDraft {
    pub stig_id: String,
    pub rule_id: String,
    pub severity: Severity,
    pub title: String,
    pub version: String,
    pub description: String,
    pub fix_text: String,
    pub check_text: String,
}

impl RuleDraft {
    pub fn attach(self, benchmark_index: BenchmarkIndex) -> Rule {
        Rule {
            stig_id: self.stig_id,
            rule_id: self.rule_id,
            severity: self.severity,
            title: self.title,
            version: self.version,
            description: self.description,
            fix_text: self.fix_text,
            check_text: self.check_text,
            benchmark_index,
        }
    }
}

/// One compliance check as stored in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Vulnerability identifier (e.g. `V-68105`)
    pub stig_id: String,
    /// Check identifier (e.g. `SV-82595r1_rule`), unique across the catalog
    pub rule_id: String,
    pub severity: Severity,
    pub title: String,
    pub version: String,
    pub description: String,
    pub fix_text: String,
    pub check_text: String,
    pub benchmark_index: BenchmarkIndex,
}
