use crate::application::dto::{
    BenchmarkSelector, GetBenchmarkRequest, GetRuleRequest, GetRulesRequest, RuleSelector,
};
use crate::application::read_models::RuleDetailView;
use crate::ports::inbound::CatalogQueryPort;
use crate::ports::outbound::SnapshotRepository;
use crate::shared::error::StigError;
use crate::shared::Result;
use crate::stig_catalog::domain::{Benchmark, Catalog, Rule};
use std::sync::OnceLock;

/// QueryCatalogUseCase - Read-only lookups against the persisted catalog
///
/// The snapshot is loaded on first use and cached for the lifetime of the
/// use case. Requests are validated before the store is touched.
///
/// # Type Parameters
/// * `R` - SnapshotRepository implementation
pub struct QueryCatalogUseCase<R> {
    repository: R,
    catalog: OnceLock<Catalog>,
}

impl<R: SnapshotRepository> QueryCatalogUseCase<R> {
    /// Creates a new QueryCatalogUseCase reading from `repository`
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            catalog: OnceLock::new(),
        }
    }

    fn catalog(&self) -> Result<&Catalog> {
        if let Some(catalog) = self.catalog.get() {
            return Ok(catalog);
        }
        let snapshot = self.repository.load()?;
        let catalog = Catalog::from_snapshot(snapshot)?;
        tracing::debug!(
            benchmarks = catalog.benchmark_count(),
            rules = catalog.rule_count(),
            location = %self.repository.location().display(),
            "catalog loaded"
        );
        Ok(self.catalog.get_or_init(|| catalog))
    }

    fn resolve_benchmark<'c>(
        catalog: &'c Catalog,
        selector: BenchmarkSelector<'_>,
    ) -> Result<&'c Benchmark> {
        match selector {
            BenchmarkSelector::Title(title) => catalog
                .benchmark_by_title(title)
                .ok_or_else(|| StigError::not_found(format!("benchmark titled '{}'", title))),
            BenchmarkSelector::Index(index) => catalog
                .benchmark_by_index(index)
                .ok_or_else(|| StigError::not_found(format!("benchmark with index {}", index))),
        }
    }

    /// Pairs each rule with the title of its benchmark
    ///
    /// # Errors
    /// Returns `NotFound` if a rule references a benchmark that is not in
    /// the catalog (only possible for rules that did not come from it).
    pub fn describe_rules(&self, rules: Vec<Rule>) -> Result<Vec<RuleDetailView>> {
        let catalog = self.catalog()?;
        rules
            .into_iter()
            .map(|rule| {
                let benchmark = catalog.benchmark_by_index(rule.benchmark_index).ok_or_else(|| {
                    StigError::not_found(format!(
                        "benchmark with index {} (owner of {})",
                        rule.benchmark_index, rule.rule_id
                    ))
                })?;
                Ok(RuleDetailView::new(benchmark.title.clone(), rule))
            })
            .collect()
    }
}

impl<R: SnapshotRepository> CatalogQueryPort for QueryCatalogUseCase<R> {
    fn list_benchmarks(&self) -> Result<Vec<Benchmark>> {
        tracing::debug!("list_benchmarks");
        Ok(self.catalog()?.benchmarks().to_vec())
    }

    fn get_benchmark(&self, request: &GetBenchmarkRequest) -> Result<Benchmark> {
        let selector = request.selector()?;
        tracing::debug!(?selector, "get_benchmark");
        let catalog = self.catalog()?;
        Self::resolve_benchmark(catalog, selector).cloned()
    }

    fn get_rules(&self, request: &GetRulesRequest) -> Result<Vec<Rule>> {
        let selector = request.selector()?;
        tracing::debug!(?selector, severities = ?request.severities, "get_rules");
        let catalog = self.catalog()?;
        let benchmark = Self::resolve_benchmark(catalog, selector)?;
        Ok(catalog
            .rules_for_benchmark(benchmark.index)
            .filter(|rule| request.matches_severity(rule.severity))
            .cloned()
            .collect())
    }

    fn get_rule(&self, request: &GetRuleRequest) -> Result<Rule> {
        let selector = request.selector()?;
        tracing::debug!(?selector, "get_rule");
        let catalog = self.catalog()?;
        let rule = match selector {
            RuleSelector::StigId(stig_id) => catalog
                .rule_by_stig_id(stig_id)
                .ok_or_else(|| StigError::not_found(format!("rule with STIG ID '{}'", stig_id))),
            RuleSelector::RuleId(rule_id) => catalog
                .rule_by_rule_id(rule_id)
                .ok_or_else(|| StigError::not_found(format!("rule with rule ID '{}'", rule_id))),
        }?;
        Ok(rule.clone())
    }
}

#[cfg(test)]
mod tests;
