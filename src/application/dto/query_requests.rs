//! Selector DTOs for catalog queries.
//!
//! Every selector is optional so that callers can pass whatever they were
//! given; the query engine checks that exactly one was supplied. Blank
//! strings count as absent.

use crate::shared::error::StigError;
use crate::shared::Result;
use crate::stig_catalog::domain::{BenchmarkIndex, Severity};

/// Selects one benchmark by composite title or by index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetBenchmarkRequest {
    pub title: Option<String>,
    pub index: Option<u32>,
}

/// Selects the rules of one benchmark, optionally filtered by severity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetRulesRequest {
    pub benchmark_title: Option<String>,
    pub benchmark_index: Option<u32>,
    /// `None` disables the filter; an empty list matches nothing
    pub severities: Option<Vec<Severity>>,
}

/// Selects one rule by STIG ID or rule ID
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetRuleRequest {
    pub stig_id: Option<String>,
    pub rule_id: Option<String>,
}

/// A validated benchmark selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchmarkSelector<'a> {
    Title(&'a str),
    Index(BenchmarkIndex),
}

/// A validated rule selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSelector<'a> {
    StigId(&'a str),
    RuleId(&'a str),
}

impl GetBenchmarkRequest {
    pub fn by_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            index: None,
        }
    }

    pub fn by_index(index: u32) -> Self {
        Self {
            title: None,
            index: Some(index),
        }
    }

    pub fn selector(&self) -> Result<BenchmarkSelector<'_>> {
        benchmark_selector(self.title.as_deref(), self.index, "title", "index")
    }
}

impl GetRulesRequest {
    pub fn by_benchmark_title(title: impl Into<String>) -> Self {
        Self {
            benchmark_title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn by_benchmark_index(index: u32) -> Self {
        Self {
            benchmark_index: Some(index),
            ..Self::default()
        }
    }

    pub fn with_severities(mut self, severities: Vec<Severity>) -> Self {
        self.severities = Some(severities);
        self
    }

    pub fn selector(&self) -> Result<BenchmarkSelector<'_>> {
        benchmark_selector(
            self.benchmark_title.as_deref(),
            self.benchmark_index,
            "benchmarkTitle",
            "benchmarkIndex",
        )
    }

    pub fn matches_severity(&self, severity: Severity) -> bool {
        self.severities
            .as_ref()
            .map_or(true, |allowed| allowed.contains(&severity))
    }
}

impl GetRuleRequest {
    pub fn by_stig_id(stig_id: impl Into<String>) -> Self {
        Self {
            stig_id: Some(stig_id.into()),
            rule_id: None,
        }
    }

    pub fn by_rule_id(rule_id: impl Into<String>) -> Self {
        Self {
            stig_id: None,
            rule_id: Some(rule_id.into()),
        }
    }

    pub fn selector(&self) -> Result<RuleSelector<'_>> {
        match (present(self.stig_id.as_deref()), present(self.rule_id.as_deref())) {
            (Some(stig_id), None) => Ok(RuleSelector::StigId(stig_id)),
            (None, Some(rule_id)) => Ok(RuleSelector::RuleId(rule_id)),
            (Some(_), Some(_)) => Err(StigError::invalid_argument(
                "specify either stigId or ruleId, not both",
            )),
            (None, None) => Err(StigError::invalid_argument(
                "one of stigId or ruleId is required",
            )),
        }
    }
}

fn benchmark_selector<'a>(
    title: Option<&'a str>,
    index: Option<u32>,
    title_name: &str,
    index_name: &str,
) -> Result<BenchmarkSelector<'a>> {
    match (present(title), index) {
        (Some(title), None) => Ok(BenchmarkSelector::Title(title)),
        (None, Some(index)) => Ok(BenchmarkSelector::Index(BenchmarkIndex::new(index))),
        (Some(_), Some(_)) => Err(StigError::invalid_argument(format!(
            "specify either {} or {}, not both",
            title_name, index_name
        ))),
        (None, None) => Err(StigError::invalid_argument(format!(
            "one of {} or {} is required",
            title_name, index_name
        ))),
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}
