use super::*;
use crate::stig_catalog::domain::{BenchmarkDraft, BenchmarkIndex, RuleDraft, Severity, Snapshot};
use chrono::{TimeZone, Utc};
use std::cell::Cell;
use std::path::{Path, PathBuf};

// Mock repository counting loads
struct MockSnapshotRepository {
    location: PathBuf,
    snapshot: Option<Snapshot>,
    loads: Cell<usize>,
}

impl MockSnapshotRepository {
    fn with(snapshot: Option<Snapshot>) -> Self {
        Self {
            location: PathBuf::from("/mock/catalog.json"),
            snapshot,
            loads: Cell::new(0),
        }
    }
}

impl SnapshotRepository for MockSnapshotRepository {
    fn location(&self) -> &Path {
        &self.location
    }

    fn load(&self) -> Result<Snapshot> {
        self.loads.set(self.loads.get() + 1);
        self.snapshot
            .clone()
            .ok_or_else(|| StigError::StoreNotInitialized {
                path: self.location.clone(),
            })
    }

    fn save(&self, _snapshot: &Snapshot) -> Result<()> {
        Ok(())
    }
}

fn rule(stig_id: &str, rule_id: &str, severity: Severity, index: BenchmarkIndex) -> Rule {
    RuleDraft {
        stig_id: stig_id.to_string(),
        rule_id: rule_id.to_string(),
        severity,
        title: format!("{} title", rule_id),
        version: "APP-000001".to_string(),
        description: "Discussion".to_string(),
        fix_text: String::new(),
        check_text: "Check".to_string(),
    }
    .attach(index)
}

fn sample_snapshot() -> Snapshot {
    let mut catalog = Catalog::new();
    let date = Utc.with_ymd_and_hms(2021, 3, 1, 0, 0, 0).unwrap();
    let mut indices = Vec::new();
    for (title, release) in [("Alpha", 1), ("Beta", 2)] {
        indices.push(
            catalog
                .insert_benchmark(BenchmarkDraft {
                    title: title.to_string(),
                    description: None,
                    version: 1,
                    release,
                    date,
                })
                .unwrap(),
        );
    }
    catalog.insert_rule(rule("V-1", "SV-1", Severity::High, indices[0])).unwrap();
    catalog.insert_rule(rule("V-2", "SV-2", Severity::Low, indices[0])).unwrap();
    catalog.insert_rule(rule("V-3", "SV-3", Severity::High, indices[1])).unwrap();
    catalog.insert_rule(rule("V-1", "SV-1-B", Severity::Medium, indices[1])).unwrap();
    catalog.to_snapshot()
}

fn use_case() -> QueryCatalogUseCase<MockSnapshotRepository> {
    QueryCatalogUseCase::new(MockSnapshotRepository::with(Some(sample_snapshot())))
}

#[test]
fn test_list_benchmarks_in_insertion_order() {
    let benchmarks = use_case().list_benchmarks().unwrap();
    let titles: Vec<&str> = benchmarks.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Alpha v1 r1", "Beta v1 r2"]);
}

#[test]
fn test_get_benchmark_by_title_and_index_agree() {
    let use_case = use_case();
    let by_title = use_case
        .get_benchmark(&GetBenchmarkRequest::by_title("Beta v1 r2"))
        .unwrap();
    let by_index = use_case
        .get_benchmark(&GetBenchmarkRequest::by_index(2))
        .unwrap();
    assert_eq!(by_title, by_index);
}

#[test]
fn test_get_benchmark_not_found() {
    let use_case = use_case();
    assert!(matches!(
        use_case.get_benchmark(&GetBenchmarkRequest::by_index(0)),
        Err(StigError::NotFound { .. })
    ));
    assert!(matches!(
        use_case.get_benchmark(&GetBenchmarkRequest::by_title("Gamma v1 r1")),
        Err(StigError::NotFound { .. })
    ));
}

#[test]
fn test_get_rules_for_benchmark() {
    let rules = use_case()
        .get_rules(&GetRulesRequest::by_benchmark_index(1))
        .unwrap();
    let ids: Vec<&str> = rules.iter().map(|r| r.rule_id.as_str()).collect();
    assert_eq!(ids, vec!["SV-1", "SV-2"]);
    assert!(rules.iter().all(|r| r.benchmark_index.value() == 1));
}

#[test]
fn test_get_rules_filtered_by_severity() {
    let use_case = use_case();
    let all = use_case
        .get_rules(&GetRulesRequest::by_benchmark_title("Alpha v1 r1"))
        .unwrap();
    let high = use_case
        .get_rules(
            &GetRulesRequest::by_benchmark_title("Alpha v1 r1").with_severities(vec![Severity::High]),
        )
        .unwrap();
    assert!(high.len() <= all.len());
    assert_eq!(high.len(), 1);
    assert!(high.iter().all(|r| r.severity == Severity::High));
}

#[test]
fn test_get_rules_unknown_benchmark() {
    assert!(matches!(
        use_case().get_rules(&GetRulesRequest::by_benchmark_index(9)),
        Err(StigError::NotFound { .. })
    ));
}

#[test]
fn test_get_rule_by_either_id() {
    let use_case = use_case();
    let by_rule_id = use_case.get_rule(&GetRuleRequest::by_rule_id("SV-3")).unwrap();
    let by_stig_id = use_case.get_rule(&GetRuleRequest::by_stig_id("V-3")).unwrap();
    assert_eq!(by_rule_id, by_stig_id);
}

#[test]
fn test_get_rule_shared_stig_id_returns_first_inserted() {
    let rule = use_case().get_rule(&GetRuleRequest::by_stig_id("V-1")).unwrap();
    assert_eq!(rule.rule_id, "SV-1");
}

#[test]
fn test_get_rule_not_found() {
    assert!(matches!(
        use_case().get_rule(&GetRuleRequest::by_rule_id("SV-404")),
        Err(StigError::NotFound { .. })
    ));
}

#[test]
fn test_uninitialized_store() {
    let use_case = QueryCatalogUseCase::new(MockSnapshotRepository::with(None));
    assert!(matches!(
        use_case.list_benchmarks(),
        Err(StigError::StoreNotInitialized { .. })
    ));
}

#[test]
fn test_invalid_arguments_checked_before_load() {
    let use_case = QueryCatalogUseCase::new(MockSnapshotRepository::with(None));
    assert!(matches!(
        use_case.get_rule(&GetRuleRequest::default()),
        Err(StigError::InvalidArgument { .. })
    ));
    assert!(matches!(
        use_case.get_benchmark(&GetBenchmarkRequest::default()),
        Err(StigError::InvalidArgument { .. })
    ));
    assert_eq!(use_case.repository.loads.get(), 0);
}

#[test]
fn test_catalog_is_loaded_once() {
    let use_case = use_case();
    use_case.list_benchmarks().unwrap();
    use_case.get_rule(&GetRuleRequest::by_rule_id("SV-1")).unwrap();
    use_case.get_benchmark(&GetBenchmarkRequest::by_index(1)).unwrap();
    assert_eq!(use_case.repository.loads.get(), 1);
}

#[test]
fn test_describe_rules_pairs_benchmark_title() {
    let use_case = use_case();
    let rules = use_case
        .get_rules(&GetRulesRequest::by_benchmark_index(2))
        .unwrap();
    let details = use_case.describe_rules(rules).unwrap();
    assert_eq!(details.len(), 2);
    assert!(details.iter().all(|d| d.benchmark_title == "Beta v1 r2"));
}
