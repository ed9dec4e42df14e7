use super::benchmark::{Benchmark, BenchmarkDraft, BenchmarkIndex};
use super::rule::Rule;
use crate::shared::error::StigError;
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Version of the on-disk snapshot layout
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// In-memory indexed store of benchmarks and rules
///
/// Benchmarks are unique by composite title, rules are unique by rule ID and
/// every rule references an existing benchmark. Secondary indices on
/// `stigId`, `ruleId` and `benchmarkIndex` are maintained on insert.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    benchmarks: Vec<Benchmark>,
    rules: Vec<Rule>,
    benchmark_by_title: HashMap<String, usize>,
    benchmark_by_index: BTreeMap<BenchmarkIndex, usize>,
    rules_by_stig_id: HashMap<String, Vec<usize>>,
    rule_by_rule_id: HashMap<String, usize>,
    rules_by_benchmark: BTreeMap<BenchmarkIndex, Vec<usize>>,
    next_index: Option<BenchmarkIndex>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns the next sequential identity to `draft` and stores it
    ///
    /// # Errors
    /// Returns `DuplicateTitle` if another benchmark already uses the same
    /// composite title. The catalog is left unchanged in that case.
    pub fn insert_benchmark(&mut self, draft: BenchmarkDraft) -> Result<BenchmarkIndex> {
        let index = self.next_index.unwrap_or(BenchmarkIndex::FIRST);
        let benchmark = draft.into_benchmark(index);
        self.store_benchmark(benchmark)?;
        Ok(index)
    }

    /// Stores a rule under its benchmark
    ///
    /// # Errors
    /// - `Parse` if the owning benchmark does not exist
    /// - `DuplicateRuleId` if the rule ID is already present
    pub fn insert_rule(&mut self, rule: Rule) -> Result<()> {
        let Some(&owner) = self.benchmark_by_index.get(&rule.benchmark_index) else {
            return Err(StigError::parse(format!(
                "rule {} references unknown benchmark {}",
                rule.rule_id, rule.benchmark_index
            )));
        };
        if self.rule_by_rule_id.contains_key(&rule.rule_id) {
            return Err(StigError::DuplicateRuleId {
                rule_id: rule.rule_id,
                title: self.benchmarks[owner].title.clone(),
            });
        }

        let position = self.rules.len();
        self.rule_by_rule_id.insert(rule.rule_id.clone(), position);
        self.rules_by_stig_id
            .entry(rule.stig_id.clone())
            .or_default()
            .push(position);
        self.rules_by_benchmark
            .entry(rule.benchmark_index)
            .or_default()
            .push(position);
        self.rules.push(rule);
        Ok(())
    }

    fn store_benchmark(&mut self, benchmark: Benchmark) -> Result<()> {
        if self.benchmark_by_title.contains_key(&benchmark.title) {
            return Err(StigError::DuplicateTitle {
                title: benchmark.title,
            });
        }
        if self.benchmark_by_index.contains_key(&benchmark.index) {
            return Err(StigError::parse(format!(
                "benchmark index {} is used twice",
                benchmark.index
            )));
        }

        let next = benchmark.index.next().ok_or_else(|| {
            StigError::parse(format!("benchmark index {} is out of range", benchmark.index))
        })?;
        let position = self.benchmarks.len();
        if self.next_index.map_or(true, |current| next > current) {
            self.next_index = Some(next);
        }
        self.benchmark_by_title
            .insert(benchmark.title.clone(), position);
        self.benchmark_by_index.insert(benchmark.index, position);
        self.benchmarks.push(benchmark);
        Ok(())
    }

    /// All benchmarks in insertion order
    pub fn benchmarks(&self) -> &[Benchmark] {
        &self.benchmarks
    }

    /// All rules in insertion order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn benchmark_count(&self) -> usize {
        self.benchmarks.len()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn benchmark_by_title(&self, title: &str) -> Option<&Benchmark> {
        self.benchmark_by_title
            .get(title)
            .map(|&position| &self.benchmarks[position])
    }

    pub fn benchmark_by_index(&self, index: BenchmarkIndex) -> Option<&Benchmark> {
        self.benchmark_by_index
            .get(&index)
            .map(|&position| &self.benchmarks[position])
    }

    /// Rules of one benchmark in insertion order
    pub fn rules_for_benchmark(&self, index: BenchmarkIndex) -> impl Iterator<Item = &Rule> {
        self.rules_by_benchmark
            .get(&index)
            .into_iter()
            .flatten()
            .map(|&position| &self.rules[position])
    }

    /// First inserted rule with the given vulnerability ID
    pub fn rule_by_stig_id(&self, stig_id: &str) -> Option<&Rule> {
        self.rules_by_stig_id
            .get(stig_id)
            .and_then(|positions| positions.first())
            .map(|&position| &self.rules[position])
    }

    pub fn rule_by_rule_id(&self, rule_id: &str) -> Option<&Rule> {
        self.rule_by_rule_id
            .get(rule_id)
            .map(|&position| &self.rules[position])
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            format_version: SNAPSHOT_FORMAT_VERSION,
            benchmarks: Collection {
                unique: vec!["title".to_string()],
                indices: Vec::new(),
                records: self.benchmarks.clone(),
            },
            rules: Collection {
                unique: Vec::new(),
                indices: vec![
                    "stigId".to_string(),
                    "ruleId".to_string(),
                    "benchmarkIndex".to_string(),
                ],
                records: self.rules.clone(),
            },
        }
    }

    /// Rebuilds a catalog and its indices from a persisted snapshot
    ///
    /// Every invariant is checked again, so a hand-edited or truncated
    /// snapshot is reported instead of producing inconsistent answers.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(StigError::parse(format!(
                "unsupported snapshot format version {} (expected {})",
                snapshot.format_version, SNAPSHOT_FORMAT_VERSION
            )));
        }

        let mut catalog = Catalog::new();
        for benchmark in snapshot.benchmarks.records {
            catalog.store_benchmark(benchmark)?;
        }
        for rule in snapshot.rules.records {
            catalog.insert_rule(rule)?;
        }
        Ok(catalog)
    }
}

/// Persisted form of a catalog: two named collections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub format_version: u32,
    pub benchmarks: Collection<Benchmark>,
    pub rules: Collection<Rule>,
}

/// One named collection with the field names it is keyed on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection<T> {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unique: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indices: Vec<String>,
    pub records: Vec<T>,
}
